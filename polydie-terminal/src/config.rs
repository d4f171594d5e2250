use polydie_core::{LabelPolicy, Rgb};

/// Viewer settings shared by every scene.
///
/// Holds frame pacing, key-driven rotation steps and the default colours
/// and tunables of the die, wireframe, model and orrery scenes.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    // Frame loop
    pub target_fps: u32,
    /// Height of a terminal cell relative to its width
    pub cell_aspect: f32,

    // Manual rotation
    pub rotation_step: f32,

    // Die scene
    pub label_policy: LabelPolicy,
    /// Surface colour of each solid, in number-key order
    pub solid_colors: [Rgb; 5],
    pub label_color: Rgb,
    /// How far labels float above their face, in model units
    pub label_lift: f32,
    pub cull_back_faces: bool,

    // Wireframe scene
    /// Degrees turned about (1, 1, 1) per frame
    pub wire_spin_deg: f32,
    pub wire_color: Rgb,
    pub circle_color: Rgb,

    // Model scene
    pub model_albedo: Rgb,
    /// Reorient models authored with Z up
    pub model_z_up: bool,

    // Orrery scene
    pub orrery_tilt: f32,
    pub orrery_tilt_step: f32,
    pub orbit_color: Rgb,
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self {
            target_fps: 30,
            cell_aspect: 2.0,

            rotation_step: 0.1,

            label_policy: LabelPolicy::OppositeSum,
            solid_colors: [
                [0.90, 0.35, 0.35],
                [0.35, 0.85, 0.45],
                [0.35, 0.55, 0.95],
                [0.75, 0.55, 0.90],
                [0.95, 0.85, 0.35],
            ],
            label_color: [1.0, 1.0, 1.0],
            label_lift: 0.01,
            cull_back_faces: true,

            wire_spin_deg: 1.0,
            wire_color: [1.0, 1.0, 1.0],
            circle_color: [1.0, 0.0, 1.0],

            model_albedo: [0.7, 0.7, 0.7],
            model_z_up: true,

            orrery_tilt: 60.0,
            orrery_tilt_step: 2.0,
            orbit_color: [0.5, 0.5, 0.6],
        }
    }

    /// Aspect ratio to give the camera for a `width` x `height` cell grid
    pub fn aspect(&self, width: usize, height: usize) -> f32 {
        width as f32 / (height.max(1) as f32 * self.cell_aspect)
    }

    pub fn frame_millis(&self) -> u64 {
        1000 / u64::from(self.target_fps.max(1))
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}
