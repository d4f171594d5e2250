/// Die-style face numbering.
///
/// Labels run from 1 to F and opposite faces add up to F + 1, the way the
/// pips on a six-sided die add up to seven.
use log::debug;

use crate::error::{Error, Result};
use crate::geometry::Polyhedron;
use crate::pairing::{pair_faces, Pairing};

/// How labels are chosen for a polyhedron
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelPolicy {
    /// Pair opposite faces and give each pair labels summing to F + 1
    #[default]
    OppositeSum,
    /// Number faces 1..F in face order when F <= 6, otherwise fall back to
    /// `OppositeSum`. Only yields die sums when the face order already
    /// lists opposite faces symmetrically.
    SequentialSmall,
}

/// A label in `1..=F` for every face, aligned with the face list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeling {
    labels: Vec<u32>,
}

impl Labeling {
    pub fn label(&self, face: usize) -> u32 {
        self.labels[face]
    }

    /// The face carrying `label`, if any
    pub fn face_with_label(&self, label: u32) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The largest label, which is also the face count
    pub fn max_label(&self) -> u32 {
        self.labels.len() as u32
    }
}

/// Assigns labels so that every two-face pair sums to F + 1.
///
/// Walking faces in index order, the first face of each pair takes the
/// lowest unused label and its partner the highest. Self-paired faces take
/// the labels left in the middle once every pair is numbered.
pub fn label_opposite_sum(pairing: &Pairing) -> Result<Labeling> {
    let n = pairing.len();
    if n == 0 {
        return Err(Error::InvalidPairing("cannot label zero faces".into()));
    }
    let count = u32::try_from(n)
        .map_err(|_| Error::InvalidPairing(format!("{n} faces is too many to label")))?;

    let mut labels = vec![0u32; n];
    let (mut low, mut high) = (1, count);
    for (i, j) in pairing.pairs() {
        labels[i] = low;
        labels[j] = high;
        low += 1;
        high -= 1;
    }
    for i in pairing.fixed_points() {
        labels[i] = low;
        low += 1;
    }

    debug!("labeled {n} faces: {labels:?}");
    Ok(Labeling { labels })
}

/// Numbers faces 1..F in face order
pub fn label_sequential(face_count: usize) -> Result<Labeling> {
    if face_count == 0 {
        return Err(Error::InvalidGeometry("cannot label zero faces".into()));
    }
    let count = u32::try_from(face_count).map_err(|_| {
        Error::InvalidGeometry(format!("{face_count} faces is too many to label"))
    })?;
    Ok(Labeling {
        labels: (1..=count).collect(),
    })
}

/// Labels the faces of `poly` according to `policy`
pub fn label_polyhedron(poly: &Polyhedron, policy: LabelPolicy) -> Result<Labeling> {
    match policy {
        LabelPolicy::SequentialSmall if poly.face_count() <= 6 => {
            label_sequential(poly.face_count())
        }
        _ => label_opposite_sum(&pair_faces(poly)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solids::{self, Solid};

    fn assert_bijection(labeling: &Labeling) {
        let mut sorted = labeling.as_slice().to_vec();
        sorted.sort_unstable();
        let expected: Vec<u32> = (1..=labeling.len() as u32).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_cube_is_a_die() {
        let labeling = label_polyhedron(&solids::cube(), LabelPolicy::OppositeSum).unwrap();
        assert_eq!(labeling.as_slice(), &[1, 6, 2, 5, 3, 4]);
    }

    #[test]
    fn test_octahedron_sums_to_nine() {
        let octa = solids::octahedron();
        let pairing = pair_faces(&octa);
        let labeling = label_opposite_sum(&pairing).unwrap();
        assert_bijection(&labeling);
        for (i, j) in pairing.pairs() {
            assert_eq!(labeling.label(i) + labeling.label(j), 9);
        }
    }

    #[test]
    fn test_single_face() {
        let pairing = Pairing::from_partners(vec![0]).unwrap();
        let labeling = label_opposite_sum(&pairing).unwrap();
        assert_eq!(labeling.as_slice(), &[1]);
    }

    #[test]
    fn test_fixed_point_takes_middle_label() {
        let pairing = Pairing::from_partners(vec![4, 2, 1, 3, 0]).unwrap();
        let labeling = label_opposite_sum(&pairing).unwrap();
        assert_eq!(labeling.as_slice(), &[1, 2, 4, 3, 5]);
    }

    #[test]
    fn test_interleaved_fixed_points_keep_pair_sums() {
        // Fixed point ahead of a pair in index order
        let pairing = Pairing::from_partners(vec![0, 2, 1, 3]).unwrap();
        let labeling = label_opposite_sum(&pairing).unwrap();
        assert_bijection(&labeling);
        assert_eq!(labeling.label(1) + labeling.label(2), 5);
    }

    #[test]
    fn test_empty_pairing_is_rejected() {
        let pairing = Pairing::from_partners(vec![]).unwrap();
        assert!(matches!(
            label_opposite_sum(&pairing),
            Err(Error::InvalidPairing(_))
        ));
    }

    #[test]
    fn test_sequential_small_policy() {
        let cube = solids::cube();
        let labeling = label_polyhedron(&cube, LabelPolicy::SequentialSmall).unwrap();
        assert_eq!(labeling.as_slice(), &[1, 2, 3, 4, 5, 6]);

        // Larger solids still get the opposite-sum numbering
        let ico = Solid::Icosahedron.build();
        let sequential = label_polyhedron(&ico, LabelPolicy::SequentialSmall).unwrap();
        let opposite = label_polyhedron(&ico, LabelPolicy::OppositeSum).unwrap();
        assert_eq!(sequential, opposite);
    }

    #[test]
    fn test_face_with_label() {
        let labeling = label_polyhedron(&solids::cube(), LabelPolicy::OppositeSum).unwrap();
        assert_eq!(labeling.face_with_label(6), Some(1));
        assert_eq!(labeling.face_with_label(7), None);
        assert_eq!(labeling.max_label(), 6);
    }
}
