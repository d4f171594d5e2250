/// The five Platonic solids.
///
/// Every factory returns a fresh [`Polyhedron`] centred on the origin with
/// its vertices on the unit sphere and every face wound outward.
use std::f32::consts::PI;
use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::geometry::{tangent_frame, Face, Polyhedron};

/// Golden ratio
const PHI: f32 = 1.618_034;

/// Selector for one of the five Platonic solids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl Solid {
    /// All solids, in number-key order
    pub const ALL: [Solid; 5] = [
        Solid::Tetrahedron,
        Solid::Cube,
        Solid::Octahedron,
        Solid::Dodecahedron,
        Solid::Icosahedron,
    ];

    /// Maps the keys `1`..=`5` to solids
    pub fn from_digit(digit: u32) -> Option<Self> {
        let i = usize::try_from(digit).ok()?.checked_sub(1)?;
        Self::ALL.get(i).copied()
    }

    /// Position in [`Solid::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The following solid in key order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Cube => "cube",
            Solid::Octahedron => "octahedron",
            Solid::Dodecahedron => "dodecahedron",
            Solid::Icosahedron => "icosahedron",
        }
    }

    pub fn face_count(self) -> usize {
        match self {
            Solid::Tetrahedron => 4,
            Solid::Cube => 6,
            Solid::Octahedron => 8,
            Solid::Dodecahedron => 12,
            Solid::Icosahedron => 20,
        }
    }

    pub fn build(self) -> Polyhedron {
        match self {
            Solid::Tetrahedron => tetrahedron(),
            Solid::Cube => cube(),
            Solid::Octahedron => octahedron(),
            Solid::Dodecahedron => dodecahedron(),
            Solid::Icosahedron => icosahedron(),
        }
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Regular tetrahedron: alternate corners of the cube.
pub fn tetrahedron() -> Polyhedron {
    let vertices = unit_points(&[
        [1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
    ]);
    let faces = faces(&[[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]]);
    solid(vertices, faces)
}

/// Cube with corners at (±1, ±1, ±1)/√3.
///
/// Faces are ordered as three opposite pairs: -z, +z, +x, -x, +y, -y.
pub fn cube() -> Polyhedron {
    let vertices = unit_points(&[
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ]);
    let faces = faces(&[
        [0, 1, 2, 3],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 3, 6, 7],
        [1, 2, 7, 5],
        [0, 3, 6, 4],
    ]);
    solid(vertices, faces)
}

/// Regular octahedron with vertices at (±1, 0, 0), (0, ±1, 0), (0, 0, ±1).
pub fn octahedron() -> Polyhedron {
    let vertices = unit_points(&[
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ]);
    let faces = faces(&[
        [0, 2, 4],
        [1, 2, 4],
        [1, 3, 4],
        [0, 3, 4],
        [0, 2, 5],
        [0, 3, 5],
        [1, 3, 5],
        [1, 2, 5],
    ]);
    solid(vertices, faces)
}

/// Regular icosahedron with vertices at the cyclic permutations of
/// (±1, ±φ, 0), scaled onto the unit sphere.
pub fn icosahedron() -> Polyhedron {
    let vertices = unit_points(&[
        [-1.0, PHI, 0.0],
        [1.0, PHI, 0.0],
        [-1.0, -PHI, 0.0],
        [1.0, -PHI, 0.0],
        [0.0, -1.0, PHI],
        [0.0, 1.0, PHI],
        [0.0, -1.0, -PHI],
        [0.0, 1.0, -PHI],
        [PHI, 0.0, -1.0],
        [PHI, 0.0, 1.0],
        [-PHI, 0.0, -1.0],
        [-PHI, 0.0, 1.0],
    ]);
    #[rustfmt::skip]
    let faces = faces(&[
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ]);
    solid(vertices, faces)
}

/// Regular dodecahedron, built as the dual of the icosahedron.
///
/// Each icosahedron face contributes one vertex (its centre pushed out to
/// the unit sphere); each icosahedron vertex becomes a pentagon through the
/// centres of the five faces around it.
pub fn dodecahedron() -> Polyhedron {
    let ico = icosahedron();

    let vertices: Vec<_> = (0..ico.face_count())
        .map(|fi| Point3::from(ico.face_centroid(fi).coords.normalize()))
        .collect();

    let mut incident = vec![Vec::new(); ico.vertex_count()];
    for (fi, face) in ico.faces().iter().enumerate() {
        for &vi in face.indices() {
            incident[vi].push(fi);
        }
    }

    let faces = incident
        .into_iter()
        .enumerate()
        .map(|(vi, around)| {
            let n = ico.vertices()[vi].coords.normalize();
            let (u, v) = tangent_frame(&n);
            let mut by_angle: Vec<(f32, usize)> = around
                .into_iter()
                .map(|fi| {
                    let p = vertices[fi].coords;
                    let q = p - n * p.dot(&n);
                    (q.dot(&v).atan2(q.dot(&u)), fi)
                })
                .collect();
            by_angle.sort_by(|a, b| a.0.total_cmp(&b.0));
            Face::new(by_angle.into_iter().map(|(_, fi)| fi).collect::<Vec<_>>())
        })
        .collect();

    solid(vertices, faces)
}

/// Points on a circle of `radius` in the XY plane, used for orbit rings and
/// the wireframe viewer's bounding circle
pub fn circle(segments: usize, radius: f32) -> Vec<Point3<f32>> {
    (0..segments)
        .map(|i| {
            let theta = 2.0 * PI * i as f32 / segments as f32;
            Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        })
        .collect()
}

fn unit_points(coords: &[[f32; 3]]) -> Vec<Point3<f32>> {
    coords
        .iter()
        .map(|&[x, y, z]| Point3::from(Vector3::new(x, y, z).normalize()))
        .collect()
}

fn faces<const N: usize>(table: &[[usize; N]]) -> Vec<Face> {
    table.iter().map(|&f| Face::from(f)).collect()
}

fn solid(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Polyhedron {
    Polyhedron::from_tables(vertices, faces).oriented_outward()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_vertex_and_face_counts() {
        let expected = [(4, 4), (8, 6), (6, 8), (20, 12), (12, 20)];
        for (solid, (v, f)) in Solid::ALL.into_iter().zip(expected) {
            let poly = solid.build();
            assert_eq!(poly.vertex_count(), v, "{solid}");
            assert_eq!(poly.face_count(), f, "{solid}");
            assert_eq!(solid.face_count(), f, "{solid}");
        }
    }

    #[test]
    fn test_euler_characteristic() {
        for solid in Solid::ALL {
            let poly = solid.build();
            let chi = poly.vertex_count() as i64 - poly.edges().len() as i64
                + poly.face_count() as i64;
            assert_eq!(chi, 2, "{solid}");
        }
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        for solid in Solid::ALL {
            for p in solid.build().vertices() {
                assert!((p.coords.norm() - 1.0).abs() < EPS, "{solid}");
            }
        }
    }

    #[test]
    fn test_faces_point_outward() {
        for solid in Solid::ALL {
            let poly = solid.build();
            for fi in 0..poly.face_count() {
                let n = poly.face_normal(fi);
                let c = poly.face_centroid(fi);
                assert!(n.dot(&c.coords) > 0.0, "{solid} face {fi}");
            }
        }
    }

    #[test]
    fn test_faces_are_planar() {
        for solid in Solid::ALL {
            let poly = solid.build();
            for (fi, face) in poly.faces().iter().enumerate() {
                let n = poly.face_normal(fi);
                let c = poly.face_centroid(fi);
                for &vi in face.indices() {
                    let d = (poly.vertices()[vi] - c).dot(&n);
                    assert!(d.abs() < EPS, "{solid} face {fi}");
                }
            }
        }
    }

    #[test]
    fn test_dodecahedron_faces_are_pentagons() {
        let dodeca = dodecahedron();
        assert!(dodeca.faces().iter().all(|f| f.len() == 5));
    }

    #[test]
    fn test_cube_face_order() {
        let cube = cube();
        let axes = [
            -Vector3::z(),
            Vector3::z(),
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
        ];
        for (fi, axis) in axes.iter().enumerate() {
            assert!((cube.face_normal(fi) - axis).norm() < EPS, "face {fi}");
        }
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(Solid::from_digit(1), Some(Solid::Tetrahedron));
        assert_eq!(Solid::from_digit(2), Some(Solid::Cube));
        assert_eq!(Solid::from_digit(5), Some(Solid::Icosahedron));
        assert_eq!(Solid::from_digit(0), None);
        assert_eq!(Solid::from_digit(6), None);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, solid) in Solid::ALL.into_iter().enumerate() {
            assert_eq!(solid.index(), i);
        }
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Solid::Tetrahedron.next(), Solid::Cube);
        assert_eq!(Solid::Icosahedron.next(), Solid::Tetrahedron);
    }

    #[test]
    fn test_circle() {
        let ring = circle(36, 2.0);
        assert_eq!(ring.len(), 36);
        assert!((ring[0] - Point3::new(2.0, 0.0, 0.0)).norm() < EPS);
        assert!(ring.iter().all(|p| (p.coords.norm() - 2.0).abs() < EPS));
    }
}
