/// Ambient + Lambertian lighting, evaluated per face
use nalgebra::{Point3, Vector3};

/// Linear RGB with channels in `0.0..=1.0`
pub type Rgb = [f32; 3];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Light travelling from infinitely far away in the opposite of this
    /// direction (the vector points towards the light)
    Directional(Vector3<f32>),
    /// Light radiating from a point
    Point(Point3<f32>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub diffuse: Rgb,
}

impl Light {
    pub fn directional(towards: Vector3<f32>, diffuse: Rgb) -> Self {
        Self {
            kind: LightKind::Directional(towards),
            diffuse,
        }
    }

    pub fn point(position: Point3<f32>, diffuse: Rgb) -> Self {
        Self {
            kind: LightKind::Point(position),
            diffuse,
        }
    }

    /// Unit vector from `at` towards the light, if defined
    fn direction_from(&self, at: &Point3<f32>) -> Option<Vector3<f32>> {
        match self.kind {
            LightKind::Directional(d) => d.try_normalize(1e-12),
            LightKind::Point(p) => (p.coords - at.coords).try_normalize(1e-12),
        }
    }
}

/// A set of lights plus a global ambient term
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: Rgb,
    pub lights: Vec<Light>,
}

impl Lighting {
    /// Single white key light up and to the right of a Z-up die
    pub fn die() -> Self {
        Self {
            ambient: [0.25; 3],
            lights: vec![Light::directional(
                Vector3::new(1.5, -2.0, 3.0),
                [1.0; 3],
            )],
        }
    }

    /// Blue light up-left and red light down-right of a Y-up model
    pub fn two_tone() -> Self {
        Self {
            ambient: [0.2; 3],
            lights: vec![
                Light::point(Point3::new(3.0, 5.0, 5.0), [0.0, 0.0, 1.0]),
                Light::point(Point3::new(-3.0, -2.5, 3.0), [1.0, 0.0, 0.0]),
            ],
        }
    }

    /// White light shining along the view axis
    pub fn headlight() -> Self {
        Self {
            ambient: [0.2; 3],
            lights: vec![Light::directional(Vector3::z(), [1.0; 3])],
        }
    }

    /// Colour of a surface with `albedo` at `point` facing `normal`
    pub fn shade(&self, point: &Point3<f32>, normal: &Vector3<f32>, albedo: Rgb) -> Rgb {
        let n = normal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
        let mut light = self.ambient;
        for l in &self.lights {
            if let Some(dir) = l.direction_from(point) {
                let lambert = n.dot(&dir).max(0.0);
                for (c, d) in light.iter_mut().zip(l.diffuse) {
                    *c += d * lambert;
                }
            }
        }
        // Saturated light never brightens a surface past its albedo
        [0, 1, 2].map(|i| light[i].clamp(0.0, 1.0) * albedo[i].clamp(0.0, 1.0))
    }

    /// Brightness of a white surface, as the strongest channel
    pub fn intensity(&self, point: &Point3<f32>, normal: &Vector3<f32>) -> f32 {
        self.shade(point, normal, [1.0; 3])
            .into_iter()
            .fold(0.0, f32::max)
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::headlight()
    }
}
