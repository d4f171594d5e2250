/// The four viewers the terminal app can show
use anyhow::Result;
use nalgebra::{Matrix4, Point3, Vector3};
use polydie_core::{
    solids, Camera, Edge, LabelCache, Lighting, Mesh, Orrery, Polyhedron, RotationState, Solid,
    Transform, Turntable,
};

use crate::config::ViewerConfig;
use crate::renderer::{to_color, AsciiRenderer, Cell, ScreenPoint};

const AXIS_LENGTH: f32 = 1.5;
const CIRCLE_SEGMENTS: usize = 36;
const ORBIT_SEGMENTS: usize = 96;
/// Depth slack that keeps a face label in front of its own face
const LABEL_BIAS: f32 = 0.05;

/// Which viewer is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Dice,
    Wireframe,
    Model,
    Orrery,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Dice,
        SceneKind::Wireframe,
        SceneKind::Model,
        SceneKind::Orrery,
    ];

    /// Parses a command-line scene name
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dice" | "die" => Some(SceneKind::Dice),
            "wire" | "wireframe" => Some(SceneKind::Wireframe),
            "model" => Some(SceneKind::Model),
            "orrery" => Some(SceneKind::Orrery),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Dice => "dice",
            SceneKind::Wireframe => "wire",
            SceneKind::Model => "model",
            SceneKind::Orrery => "orrery",
        }
    }

    /// The following scene, skipping the model viewer when nothing is loaded
    pub fn next(self, has_model: bool) -> Self {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        let next = Self::ALL[(i + 1) % Self::ALL.len()];
        if next == SceneKind::Model && !has_model {
            next.next(has_model)
        } else {
            next
        }
    }
}

/// A loaded OBJ model and the name it is shown under
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub poly: Polyhedron,
}

/// Per-scene state
pub enum Scene {
    /// Shaded, numbered die on a turntable
    Dice {
        solid: Solid,
        poly: Polyhedron,
        mesh: Mesh,
        turntable: Turntable,
    },
    /// White edges spinning about (1, 1, 1) inside the unit circle
    Wireframe {
        solid: Solid,
        vertices: Vec<Point3<f32>>,
        edges: Vec<Edge>,
        spin: Matrix4<f32>,
    },
    /// Loaded model lit by two coloured lights
    Model {
        name: String,
        mesh: Mesh,
        turntable: Turntable,
    },
    Orrery(Orrery),
}

impl Scene {
    pub fn dice(solid: Solid) -> Self {
        let poly = solid.build();
        let mesh = poly.to_mesh();
        Scene::Dice {
            solid,
            poly,
            mesh,
            turntable: Turntable::die(),
        }
    }

    pub fn wireframe(solid: Solid) -> Self {
        let poly = solid.build().normalized();
        Scene::Wireframe {
            solid,
            edges: poly.edges(),
            vertices: poly.vertices().to_vec(),
            spin: Matrix4::identity(),
        }
    }

    /// Fits the model to the view and turns it Y-up if configured
    pub fn model(model: &LoadedModel, config: &ViewerConfig) -> Self {
        let mut poly = model.poly.fit_to_view();
        if config.model_z_up {
            poly = poly.transformed(&Transform::z_up_to_y_up());
        }
        log::info!(
            "showing {} ({} faces, {} vertices)",
            model.name,
            poly.face_count(),
            poly.vertex_count()
        );
        Scene::Model {
            name: model.name.clone(),
            mesh: poly.to_mesh(),
            turntable: Turntable::model(),
        }
    }

    pub fn orrery(config: &ViewerConfig) -> Self {
        let mut orrery = Orrery::inner_planets();
        orrery.tilt_by(config.orrery_tilt - orrery.tilt);
        Scene::Orrery(orrery)
    }

    /// Builds the scene of `kind`, or `None` for the model viewer without a model
    pub fn build(
        kind: SceneKind,
        solid: Solid,
        model: Option<&LoadedModel>,
        config: &ViewerConfig,
    ) -> Option<Self> {
        match kind {
            SceneKind::Dice => Some(Self::dice(solid)),
            SceneKind::Wireframe => Some(Self::wireframe(solid)),
            SceneKind::Model => model.map(|m| Self::model(m, config)),
            SceneKind::Orrery => Some(Self::orrery(config)),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Dice { .. } => SceneKind::Dice,
            Scene::Wireframe { .. } => SceneKind::Wireframe,
            Scene::Model { .. } => SceneKind::Model,
            Scene::Orrery(_) => SceneKind::Orrery,
        }
    }

    pub fn solid(&self) -> Option<Solid> {
        match self {
            Scene::Dice { solid, .. } | Scene::Wireframe { solid, .. } => Some(*solid),
            _ => None,
        }
    }

    /// Swaps the solid of the die and wireframe viewers. The die keeps its
    /// turntable position.
    pub fn select_solid(&mut self, next: Solid) {
        match self {
            Scene::Dice {
                solid,
                poly,
                mesh,
                ..
            } => {
                *poly = next.build();
                *mesh = poly.to_mesh();
                *solid = next;
            }
            Scene::Wireframe { .. } => *self = Self::wireframe(next),
            _ => {}
        }
    }

    /// Tilts the orrery; other scenes ignore it
    pub fn tilt_by(&mut self, delta: f32) -> bool {
        match self {
            Scene::Orrery(orrery) => {
                orrery.tilt_by(delta);
                true
            }
            _ => false,
        }
    }

    /// Advances animations by `dt` seconds
    pub fn update(&mut self, dt: f32, config: &ViewerConfig) {
        match self {
            Scene::Dice { turntable, .. } | Scene::Model { turntable, .. } => {
                turntable.advance(dt)
            }
            Scene::Wireframe { spin, .. } => {
                *spin = Transform::axis_angle(&Vector3::new(1.0, 1.0, 1.0), config.wire_spin_deg)
                    * *spin;
            }
            Scene::Orrery(orrery) => orrery.step(),
        }
    }

    /// Draws the scene into `renderer`, which should be cleared first
    pub fn render(
        &self,
        renderer: &mut AsciiRenderer,
        rotation: &RotationState,
        cache: &mut LabelCache,
        config: &ViewerConfig,
    ) -> Result<()> {
        let aspect = config.aspect(renderer.width(), renderer.height());
        match self {
            Scene::Dice {
                solid,
                poly,
                mesh,
                turntable,
            } => {
                let camera = Camera::die_view(aspect);
                let model = turntable.model_matrix(rotation);
                let albedo = config.solid_colors[solid.index()];
                renderer.render_mesh(
                    mesh,
                    &model,
                    &camera,
                    &Lighting::die(),
                    config.cull_back_faces,
                    |_| albedo,
                );
                draw_labels(renderer, poly, &model, &camera, cache, config)?;
            }
            Scene::Wireframe {
                vertices,
                edges,
                spin,
                ..
            } => {
                let camera = Camera::wireframe_view(aspect);
                let model = spin * Transform::rotation_matrix(rotation);
                draw_axes(renderer, &model, &camera);

                let edge_cell = Cell {
                    ch: '#',
                    color: to_color(config.wire_color),
                };
                for &(a, b) in edges {
                    let ends = (
                        renderer.project(&vertices[a], &model, &camera),
                        renderer.project(&vertices[b], &model, &camera),
                    );
                    if let (Some(pa), Some(pb)) = ends {
                        renderer.draw_line(pa, pb, edge_cell, false);
                    }
                }

                let circle_cell = Cell {
                    ch: 'o',
                    color: to_color(config.circle_color),
                };
                let circle = solids::circle(CIRCLE_SEGMENTS, 1.0);
                draw_loop(renderer, &circle, &Matrix4::identity(), &camera, circle_cell);
            }
            Scene::Model {
                mesh, turntable, ..
            } => {
                let camera = Camera::model_view(aspect);
                let model = turntable.model_matrix(rotation);
                let albedo = config.model_albedo;
                renderer.render_mesh(
                    mesh,
                    &model,
                    &camera,
                    &Lighting::two_tone(),
                    config.cull_back_faces,
                    |_| albedo,
                );
            }
            Scene::Orrery(orrery) => {
                let camera = Camera::orrery_view(aspect, orrery.tilt);
                let identity = Matrix4::identity();
                let ring_cell = Cell {
                    ch: '.',
                    color: to_color(config.orbit_color),
                };
                for radius in orrery.orbit_radii() {
                    let ring = solids::circle(ORBIT_SEGMENTS, radius);
                    draw_loop(renderer, &ring, &identity, &camera, ring_cell);
                }

                let lighting = Lighting::headlight();
                let height = renderer.height() as u32;
                for body in orrery.placements() {
                    if let Some(center) = renderer.project(&body.center, &identity, &camera) {
                        let rows = body.radius * camera.pixels_per_unit(center.2, height);
                        renderer.draw_ball(center, rows, &lighting, body.color);
                    }
                }
            }
        }
        Ok(())
    }

    /// One-line description for the status bar
    pub fn status(&self) -> String {
        match self {
            Scene::Dice { solid, .. } => {
                format!("{solid} die, {} faces | 1-5 solid", solid.face_count())
            }
            Scene::Wireframe { solid, .. } => format!("{solid} wireframe | 1-5 solid"),
            Scene::Model { name, mesh, .. } => {
                format!("{name}, {} triangles", mesh.triangles.len())
            }
            Scene::Orrery(orrery) => format!("orrery, tilt {:.0} deg | Up/Down tilt", orrery.tilt),
        }
    }
}

/// Stamps each visible face's number just above its centroid
fn draw_labels(
    renderer: &mut AsciiRenderer,
    poly: &Polyhedron,
    model: &Matrix4<f32>,
    camera: &Camera,
    cache: &mut LabelCache,
    config: &ViewerConfig,
) -> Result<()> {
    let labels = cache.get_or_compute(poly, config.label_policy)?;
    let color = to_color(config.label_color);
    for face in 0..poly.face_count() {
        let normal = poly.face_normal(face);
        let centroid = poly.face_centroid(face);
        if !camera.is_facing(&centroid, &normal, model) {
            continue;
        }
        let lifted = centroid + normal * config.label_lift;
        if let Some(at) = renderer.project(&lifted, model, camera) {
            renderer.stamp_text(at, &labels.label(face).to_string(), color, LABEL_BIAS);
        }
    }
    Ok(())
}

fn draw_axes(renderer: &mut AsciiRenderer, model: &Matrix4<f32>, camera: &Camera) {
    let origin = Point3::origin();
    let axes = [
        (Vector3::x(), [1.0, 0.0, 0.0]),
        (Vector3::y(), [0.0, 1.0, 0.0]),
        (Vector3::z(), [0.0, 0.0, 1.0]),
    ];
    for (axis, rgb) in axes {
        let tip = origin + axis * AXIS_LENGTH;
        let ends = (
            renderer.project(&origin, model, camera),
            renderer.project(&tip, model, camera),
        );
        if let (Some(a), Some(b)) = ends {
            let cell = Cell {
                ch: '+',
                color: to_color(rgb),
            };
            renderer.draw_line(a, b, cell, false);
        }
    }
}

/// Draws a closed polyline over everything already in the frame
fn draw_loop(
    renderer: &mut AsciiRenderer,
    points: &[Point3<f32>],
    model: &Matrix4<f32>,
    camera: &Camera,
    cell: Cell,
) {
    let projected: Vec<Option<ScreenPoint>> = points
        .iter()
        .map(|p| renderer.project(p, model, camera))
        .collect();
    for (i, a) in projected.iter().enumerate() {
        let b = projected[(i + 1) % projected.len()];
        if let (Some(a), Some(b)) = (*a, b) {
            renderer.draw_line(a, b, cell, false);
        }
    }
}
