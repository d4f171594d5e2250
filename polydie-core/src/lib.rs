/// polydie core library - polyhedron geometry and die-style face numbering
///
/// This library provides the stateless core: the five Platonic solids,
/// opposite-face pairing and labeling, an explicit label cache, OBJ loading,
/// and the transform, camera and lighting math the viewers share.

pub mod cache;
pub mod error;
pub mod geometry;
pub mod labeling;
pub mod lighting;
pub mod obj;
pub mod orrery;
pub mod pairing;
pub mod projection;
pub mod solids;
pub mod transform;

// Re-export commonly used types
pub use cache::{GeometryKey, LabelCache};
pub use error::{Error, Result};
pub use geometry::{Edge, Face, Mesh, Polyhedron, Triangle, Vertex};
pub use labeling::{label_opposite_sum, label_polyhedron, LabelPolicy, Labeling};
pub use lighting::{Light, Lighting, Rgb};
pub use orrery::Orrery;
pub use pairing::{pair_faces, pair_normals, Pairing};
pub use projection::{Camera, ProjectionMode};
pub use solids::Solid;
pub use transform::{RotationState, Tilt, Transform, Turntable};
