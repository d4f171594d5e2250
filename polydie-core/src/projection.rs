/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Perspective camera at `(0, 0, 5)` looking at the origin
    pub fn new(aspect: f32) -> Self {
        Self::looking_at(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            Vector3::y(),
            45.0,
            aspect,
        )
    }

    /// Perspective camera with a vertical field of view in degrees
    pub fn looking_at(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_deg: f32,
        aspect: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov: fov_deg.to_radians(),
            aspect,
            near: 0.1,
            far: 50.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Die viewer: Z-up, slightly above and in front of the solid
    pub fn die_view(aspect: f32) -> Self {
        Self::looking_at(
            Point3::new(0.0, -3.6, 1.2),
            Point3::origin(),
            Vector3::z(),
            70.0,
            aspect,
        )
    }

    /// Model viewer: Y-up, looking at a model fitted to the unit cube
    pub fn model_view(aspect: f32) -> Self {
        Self {
            far: 100.0,
            ..Self::looking_at(
                Point3::new(0.0, 0.1, 3.5),
                Point3::origin(),
                Vector3::y(),
                45.0,
                aspect,
            )
        }
    }

    /// Wireframe viewer: orthographic box spanning [-2, 2] vertically
    pub fn wireframe_view(aspect: f32) -> Self {
        Self {
            mode: ProjectionMode::Orthographic,
            ..Self::looking_at(
                Point3::new(0.0, 0.0, 4.0),
                Point3::origin(),
                Vector3::y(),
                45.0,
                aspect,
            )
        }
    }

    /// Orrery: 60 units back from the sun, orbital plane tilted by
    /// `tilt_deg` about the X axis (0 looks straight down on the orbits)
    pub fn orrery_view(aspect: f32, tilt_deg: f32) -> Self {
        let orbit = Transform::axis_angle(&Vector3::x(), -tilt_deg);
        Self {
            far: 1000.0,
            ..Self::looking_at(
                orbit.transform_point(&Point3::new(0.0, 0.0, 60.0)),
                Point3::origin(),
                orbit.transform_vector(&Vector3::y()),
                45.0,
                aspect,
            )
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Projects a model-space point to screen space as `(x, y, depth)`,
    /// where depth is the distance along the view axis.
    ///
    /// Points outside the near/far range yield `None`; points beside the
    /// viewport are still returned so that triangles can be clipped
    /// per pixel.
    pub fn project_point(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let eye = (self.view_matrix() * model_matrix).transform_point(point);
        let depth = -eye.z;
        if depth < self.near || depth > self.far {
            return None;
        }

        let ndc = self.projection_matrix().transform_point(&eye);
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }

    /// Project a 3D point to 2D screen space, rejecting points outside the
    /// viewport
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let (x, y, depth) = self.project_point(point, model_matrix, width, height)?;
        let inside = (0.0..=width as f32).contains(&x) && (0.0..=height as f32).contains(&y);
        inside.then_some((x, y, depth))
    }

    /// Screen rows covered by one world unit at view `depth`
    pub fn pixels_per_unit(&self, depth: f32, height: u32) -> f32 {
        let view_height = match self.mode {
            ProjectionMode::Perspective => 2.0 * depth * (self.fov / 2.0).tan(),
            ProjectionMode::Orthographic => (self.position - self.target).norm(),
        };
        height as f32 / view_height.max(f32::EPSILON)
    }

    /// Whether a surface at `point` with `normal` (both in model space)
    /// faces the camera
    pub fn is_facing(
        &self,
        point: &Point3<f32>,
        normal: &Vector3<f32>,
        model_matrix: &Matrix4<f32>,
    ) -> bool {
        let world_point = model_matrix.transform_point(point);
        let world_normal = model_matrix.transform_vector(normal);
        let to_eye = match self.mode {
            ProjectionMode::Perspective => self.position - world_point,
            ProjectionMode::Orthographic => self.position - self.target,
        };
        world_normal.dot(&to_eye) > 0.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800.0 / 600.0);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::die_view(1.0);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!((depth - (3.6_f32.powi(2) + 1.2_f32.powi(2)).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(1.0);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_point(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_offscreen_point_only_clipped_by_project_to_screen() {
        let camera = Camera::new(1.0);
        let far_right = Point3::new(50.0, 0.0, -5.0);
        let identity = Matrix4::identity();
        assert!(camera.project_point(&far_right, &identity, 80, 40).is_some());
        assert!(camera.project_to_screen(&far_right, &identity, 80, 40).is_none());
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::model_view(1.0);
        let identity = Matrix4::identity();
        let (_, y_top, _) = camera
            .project_to_screen(&Point3::new(0.0, 0.5, 0.0), &identity, 80, 40)
            .unwrap();
        assert!(y_top < 20.0);
    }

    #[test]
    fn test_pixels_per_unit_shrinks_with_depth() {
        let camera = Camera::new(1.0);
        let near = camera.pixels_per_unit(2.0, 40);
        let far = camera.pixels_per_unit(4.0, 40);
        assert!((near - 2.0 * far).abs() < 1e-4);

        let ortho = Camera::wireframe_view(1.0);
        assert!((ortho.pixels_per_unit(1.0, 40) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_is_facing() {
        let camera = Camera::new(1.0);
        let identity = Matrix4::identity();
        let p = Point3::origin();
        assert!(camera.is_facing(&p, &Vector3::z(), &identity));
        assert!(!camera.is_facing(&p, &-Vector3::z(), &identity));
    }

    #[test]
    fn test_orrery_view_tilt() {
        let flat = Camera::orrery_view(1.0, 0.0);
        assert!((flat.position - Point3::new(0.0, 0.0, 60.0)).norm() < 1e-4);

        let edge_on = Camera::orrery_view(1.0, 90.0);
        assert!((edge_on.position - Point3::new(0.0, 60.0, 0.0)).norm() < 1e-3);
    }
}
