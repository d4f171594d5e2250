/// Geometry primitives: polyhedra with polygonal faces, and the triangle
/// meshes the rasterizer consumes
use std::collections::HashSet;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{Error, Result};

/// An undirected edge between two vertex indices, stored with `.0 < .1`
pub type Edge = (usize, usize);

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle of a mesh, tagged with the polyhedron face it was cut from
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub face: usize,
}

impl Triangle {
    pub fn new(face: usize, v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
            face,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [a, b, c] = self.vertices.map(|v| v.position);
        plane_normal(&a, &b, &c)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }
}

/// A polygonal face: vertex indices in outward (counter-clockwise) order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Boundary edges in winding order, each normalized to `(min, max)`
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| {
            let (a, b) = (self.indices[i], self.indices[(i + 1) % n]);
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        })
    }

    fn reverse(&mut self) {
        self.indices.reverse();
    }
}

impl<const N: usize> From<[usize; N]> for Face {
    fn from(indices: [usize; N]) -> Self {
        Self::new(indices.to_vec())
    }
}

/// A polyhedron: a vertex list and a list of faces indexing into it.
///
/// Constructed through [`Polyhedron::new`], which validates the face
/// indices, and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
}

impl Polyhedron {
    /// Builds a polyhedron, rejecting empty face lists, faces with fewer
    /// than three vertices and out-of-range vertex indices.
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Result<Self> {
        if faces.is_empty() {
            return Err(Error::InvalidGeometry("polyhedron has no faces".into()));
        }
        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::InvalidGeometry(format!(
                    "face {fi} has {} vertices, at least 3 required",
                    face.len()
                )));
            }
            if let Some(&vi) = face.indices().iter().find(|&&vi| vi >= vertices.len()) {
                return Err(Error::InvalidGeometry(format!(
                    "face {fi} references vertex {vi}, but only {} vertices exist",
                    vertices.len()
                )));
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Wraps static solid tables that are known to be well formed
    pub(crate) fn from_tables(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Self {
        debug_assert!(Self::new(vertices.clone(), faces.clone()).is_ok());
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Unit normal of face `i`, from the first three vertices' winding.
    /// Degenerate faces report +Y.
    pub fn face_normal(&self, i: usize) -> Vector3<f32> {
        let idx = self.faces[i].indices();
        plane_normal(
            &self.vertices[idx[0]],
            &self.vertices[idx[1]],
            &self.vertices[idx[2]],
        )
    }

    pub fn face_normals(&self) -> Vec<Vector3<f32>> {
        (0..self.faces.len()).map(|i| self.face_normal(i)).collect()
    }

    /// Mean of face `i`'s vertices
    pub fn face_centroid(&self, i: usize) -> Point3<f32> {
        let idx = self.faces[i].indices();
        let sum = idx
            .iter()
            .fold(Vector3::zeros(), |acc, &vi| acc + self.vertices[vi].coords);
        Point3::from(sum / idx.len() as f32)
    }

    /// Unique edges, in the order they are first met walking the faces
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::new();
        self.faces
            .iter()
            .flat_map(|f| f.edges())
            .filter(|e| seen.insert(*e))
            .collect()
    }

    /// Fan-triangulates every face into a flat-shaded mesh
    pub fn to_mesh(&self) -> Mesh {
        let count = self.faces.iter().map(|f| f.len() - 2).sum();
        let mut mesh = Mesh::with_capacity(count);
        for (fi, face) in self.faces.iter().enumerate() {
            let normal = self.face_normal(fi);
            let vertex = |vi: usize| Vertex::new(self.vertices[vi], normal);
            let idx = face.indices();
            for j in 1..idx.len() - 1 {
                mesh.add_triangle(Triangle::new(
                    fi,
                    vertex(idx[0]),
                    vertex(idx[j]),
                    vertex(idx[j + 1]),
                ));
            }
        }
        mesh
    }

    /// Axis-aligned bounding box as `(min, max)`
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let first = self.vertices.first().copied().unwrap_or_else(Point3::origin);
        self.vertices.iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        })
    }

    /// Centres the model on its bounding box and scales its largest
    /// extent to 2.
    pub fn fit_to_view(&self) -> Self {
        let (lo, hi) = self.bounds();
        let center = nalgebra::center(&lo, &hi);
        let extent = (hi - lo).max();
        let scale = if extent > 1e-8 { 2.0 / extent } else { 1.0 };
        self.map_vertices(|p| Point3::from((p.coords - center.coords) * scale))
    }

    /// Scales the model so its farthest vertex lies on the unit sphere
    pub fn normalized(&self) -> Self {
        let radius = self
            .vertices
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0_f32, f32::max);
        let scale = if radius > 0.0 { 1.0 / radius } else { 1.0 };
        self.map_vertices(|p| Point3::from(p.coords * scale))
    }

    /// Applies an affine transform to every vertex. Mirroring transforms
    /// turn the winding inside out.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        self.map_vertices(|p| matrix.transform_point(p))
    }

    /// Reverses every face whose winding points towards the origin.
    /// Only meaningful for convex solids centred on the origin.
    pub(crate) fn oriented_outward(mut self) -> Self {
        for i in 0..self.faces.len() {
            if self.face_normal(i).dot(&self.face_centroid(i).coords) < 0.0 {
                self.faces[i].reverse();
            }
        }
        self
    }

    fn map_vertices(&self, f: impl Fn(&Point3<f32>) -> Point3<f32>) -> Self {
        Self {
            vertices: self.vertices.iter().map(f).collect(),
            faces: self.faces.clone(),
        }
    }
}

/// Unit normal of the plane through `a`, `b`, `c`, +Y if degenerate
pub(crate) fn plane_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    (b - a).cross(&(c - a)).try_normalize(1e-12).unwrap_or_else(Vector3::y)
}

/// Orthonormal `(u, v)` spanning the plane perpendicular to `n`
pub(crate) fn tangent_frame(n: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let n = n.normalize();
    let up = if n.y.abs() < 0.9 {
        Vector3::y()
    } else {
        Vector3::x()
    };
    let u = up.cross(&n).normalize();
    let v = n.cross(&u).normalize();
    (u, v)
}
