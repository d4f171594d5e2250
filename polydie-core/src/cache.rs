/// Caller-owned cache of face labelings, keyed by geometry identity
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, trace};

use crate::error::Result;
use crate::geometry::{Face, Polyhedron};
use crate::labeling::{label_polyhedron, LabelPolicy, Labeling};

/// Identity of a polyhedron's geometry for caching purposes.
///
/// Two polyhedra share a key exactly when they have the same vertex
/// coordinates bit for bit, the same face index lists, and are labeled under
/// the same policy. The key owns a copy of the geometry, so distinct solids
/// never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    vertex_bits: Vec<[u32; 3]>,
    faces: Vec<Face>,
    policy: LabelPolicy,
}

impl GeometryKey {
    pub fn of(poly: &Polyhedron, policy: LabelPolicy) -> Self {
        let vertex_bits = poly
            .vertices()
            .iter()
            .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
            .collect();
        Self {
            vertex_bits,
            faces: poly.faces().to_vec(),
            policy,
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Labelings computed so far, reused while the geometry is unchanged
#[derive(Debug, Default)]
pub struct LabelCache {
    entries: HashMap<GeometryKey, Labeling>,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached labeling for `poly`, computing it on a miss
    pub fn get_or_compute(&mut self, poly: &Polyhedron, policy: LabelPolicy) -> Result<&Labeling> {
        let key = GeometryKey::of(poly, policy);
        let face_count = key.face_count();
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                trace!("label cache hit for {face_count} faces");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!("label cache miss for {face_count} faces, computing");
                let labeling = label_polyhedron(poly, policy)?;
                Ok(entry.insert(labeling))
            }
        }
    }

    pub fn get(&self, key: &GeometryKey) -> Option<&Labeling> {
        self.entries.get(key)
    }

    /// Drops the entry for `key`, returning whether one was present
    pub fn invalidate(&mut self, key: &GeometryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solids::{self, Solid};
    use crate::transform::Transform;

    #[test]
    fn test_hit_on_identical_geometry() {
        let mut cache = LabelCache::new();
        let first = cache
            .get_or_compute(&solids::cube(), LabelPolicy::OppositeSum)
            .unwrap()
            .clone();
        let second = cache
            .get_or_compute(&solids::cube(), LabelPolicy::OppositeSum)
            .unwrap();
        assert_eq!(&first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_policy_is_part_of_the_key() {
        let cube = solids::cube();
        let mut cache = LabelCache::new();
        cache.get_or_compute(&cube, LabelPolicy::OppositeSum).unwrap();
        cache.get_or_compute(&cube, LabelPolicy::SequentialSmall).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_moved_geometry_gets_its_own_entry() {
        let cube = solids::cube();
        let shifted = cube.transformed(&Transform::translation_matrix(1.0, 0.0, 0.0));
        let a = GeometryKey::of(&cube, LabelPolicy::OppositeSum);
        let b = GeometryKey::of(&shifted, LabelPolicy::OppositeSum);
        assert_ne!(a, b);
        assert_eq!(a.face_count(), b.face_count());
    }

    #[test]
    fn test_same_face_count_different_shape_never_shares() {
        // Same faces, one vertex nudged by a single ulp
        let cube = solids::cube();
        let mut vertices = cube.vertices().to_vec();
        vertices[0].x = f32::from_bits(vertices[0].x.to_bits() + 1);
        let nudged = Polyhedron::new(vertices, cube.faces().to_vec()).unwrap();

        let mut cache = LabelCache::new();
        cache.get_or_compute(&cube, LabelPolicy::OppositeSum).unwrap();
        cache.get_or_compute(&nudged, LabelPolicy::OppositeSum).unwrap();
        assert_eq!(cache.len(), 2);
        assert_ne!(
            GeometryKey::of(&cube, LabelPolicy::OppositeSum),
            GeometryKey::of(&nudged, LabelPolicy::OppositeSum)
        );
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = LabelCache::new();
        for solid in Solid::ALL {
            cache.get_or_compute(&solid.build(), LabelPolicy::OppositeSum).unwrap();
        }
        assert_eq!(cache.len(), 5);

        let key = GeometryKey::of(&solids::octahedron(), LabelPolicy::OppositeSum);
        assert!(cache.get(&key).is_some());
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.len(), 4);

        cache.clear();
        assert!(cache.is_empty());
    }
}
