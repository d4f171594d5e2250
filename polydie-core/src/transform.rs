/// Model transforms: manual rotation, turntable animation and matrix builders
use nalgebra::{Matrix4, Unit, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// How the tilt of a [`Turntable`] evolves with its spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tilt {
    /// Constant tilt in degrees
    Fixed(f32),
    /// `base + amplitude * cos(spin)`, in degrees
    Wobble { base: f32, amplitude: f32 },
}

/// A model spinning about a vertical axis while tilted towards the viewer.
///
/// The model matrix is `tilt about X * spin about up * manual rotation`, the
/// same order the rotations would be pushed onto a fixed-function matrix
/// stack.
#[derive(Debug, Clone, Copy)]
pub struct Turntable {
    /// Current spin in degrees, kept in `[0, 360)`
    pub spin: f32,
    /// Spin rate in degrees per second
    pub rate: f32,
    pub tilt: Tilt,
    /// Axis the model spins about
    pub up: Vector3<f32>,
}

impl Turntable {
    /// Die viewer: Z-up solid, wobbling 18° ± 10° tilt, 40°/s spin
    pub fn die() -> Self {
        Self {
            spin: 0.0,
            rate: 40.0,
            tilt: Tilt::Wobble {
                base: 18.0,
                amplitude: 10.0,
            },
            up: Vector3::z(),
        }
    }

    /// Model viewer: Y-up model, fixed 22° tilt, 5° per frame at 60 fps
    pub fn model() -> Self {
        Self {
            spin: 0.0,
            rate: 300.0,
            tilt: Tilt::Fixed(22.0),
            up: Vector3::y(),
        }
    }

    /// Current tilt in degrees
    pub fn tilt_deg(&self) -> f32 {
        match self.tilt {
            Tilt::Fixed(deg) => deg,
            Tilt::Wobble { base, amplitude } => base + amplitude * self.spin.to_radians().cos(),
        }
    }

    /// Advances the spin by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.spin = (self.spin + self.rate * dt).rem_euclid(360.0);
    }

    /// Model matrix for the current frame, with `manual` applied first
    pub fn model_matrix(&self, manual: &RotationState) -> Matrix4<f32> {
        Transform::axis_angle(&Vector3::x(), self.tilt_deg())
            * Transform::axis_angle(&self.up, self.spin)
            * Transform::rotation_matrix(manual)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Rotation of `degrees` about `axis` (right-handed)
    pub fn axis_angle(axis: &Vector3<f32>, degrees: f32) -> Matrix4<f32> {
        match Unit::try_new(*axis, 1e-12) {
            Some(axis) => Matrix4::from_axis_angle(&axis, degrees.to_radians()),
            None => Matrix4::identity(),
        }
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Turns a Z-up model into a Y-up one
    pub fn z_up_to_y_up() -> Matrix4<f32> {
        Self::axis_angle(&Vector3::x(), -90.0)
    }
}
