/// Opposite-face pairing.
///
/// Faces are paired greedily with the remaining face whose outward normal
/// is most nearly antiparallel. On antipodally symmetric solids (cube,
/// octahedron, dodecahedron, icosahedron) this recovers the geometric
/// opposite faces exactly. Elsewhere it is an approximation: on a
/// tetrahedron every pair of faces scores the same and the first candidate
/// in index order wins.
use log::debug;
use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::geometry::Polyhedron;

/// An involution over face indices: `partner(partner(i)) == i`.
///
/// A face without a partner (the leftover of an odd face count) is paired
/// with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    partners: Vec<usize>,
}

impl Pairing {
    /// Validates a partner table, rejecting out-of-range entries and tables
    /// that are not their own inverse.
    pub fn from_partners(partners: Vec<usize>) -> Result<Self> {
        let n = partners.len();
        if let Some((i, &j)) = partners.iter().enumerate().find(|&(_, &j)| j >= n) {
            return Err(Error::InvalidPairing(format!(
                "face {i} is paired with {j}, but there are only {n} faces"
            )));
        }
        for (i, &j) in partners.iter().enumerate() {
            if partners[j] != i {
                return Err(Error::InvalidPairing(format!(
                    "face {i} is paired with {j}, but face {j} is paired with {}",
                    partners[j]
                )));
            }
        }
        Ok(Self { partners })
    }

    pub fn partner(&self, face: usize) -> usize {
        self.partners[face]
    }

    pub fn is_self_paired(&self, face: usize) -> bool {
        self.partners[face] == face
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.partners
    }

    /// Each two-face pair once, as `(i, j)` with `i < j`
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partners
            .iter()
            .enumerate()
            .filter(|&(i, &j)| i < j)
            .map(|(i, &j)| (i, j))
    }

    /// Faces paired with themselves
    pub fn fixed_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.partners
            .iter()
            .enumerate()
            .filter(|&(i, &j)| i == j)
            .map(|(i, _)| i)
    }
}

/// Pairs the faces of `poly` by their outward normals
pub fn pair_faces(poly: &Polyhedron) -> Pairing {
    pair_normals(&poly.face_normals())
}

/// Greedy nearest-antiparallel pairing of unit normals.
///
/// Faces are visited in index order; each unpaired face takes the unpaired
/// candidate minimizing `|n_i · n_j + 1|`, the first one on ties. A face
/// with no candidate left pairs with itself.
pub fn pair_normals(normals: &[Vector3<f32>]) -> Pairing {
    let n = normals.len();
    let mut partners: Vec<Option<usize>> = vec![None; n];

    for i in 0..n {
        if partners[i].is_some() {
            continue;
        }
        let mut best: Option<(usize, f32)> = None;
        for j in (i + 1)..n {
            if partners[j].is_some() {
                continue;
            }
            let score = (normals[i].dot(&normals[j]) + 1.0).abs();
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((j, score));
            }
        }
        match best {
            Some((j, score)) => {
                partners[i] = Some(j);
                partners[j] = Some(i);
                debug!("paired face {i} with face {j} (score {score:.3e})");
            }
            None => {
                partners[i] = Some(i);
                debug!("face {i} has no partner left, pairing with itself");
            }
        }
    }

    Pairing {
        partners: partners.into_iter().zip(0..).map(|(p, i)| p.unwrap_or(i)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solids;

    #[test]
    fn test_from_partners_accepts_involution() {
        let pairing = Pairing::from_partners(vec![1, 0, 2]).unwrap();
        assert_eq!(pairing.partner(0), 1);
        assert!(pairing.is_self_paired(2));
        assert_eq!(pairing.pairs().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(pairing.fixed_points().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_from_partners_rejects_non_involution() {
        let err = Pairing::from_partners(vec![1, 2, 0]).unwrap_err();
        assert!(matches!(err, Error::InvalidPairing(_)));
    }

    #[test]
    fn test_from_partners_rejects_out_of_range() {
        let err = Pairing::from_partners(vec![1, 5]).unwrap_err();
        match err {
            Error::InvalidPairing(msg) => assert!(msg.contains("only 2 faces")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_reported_before_one_sided_pair() {
        // Face 0 points at face 2, whose own entry is out of range
        let err = Pairing::from_partners(vec![2, 1, 7]).unwrap_err();
        match err {
            Error::InvalidPairing(msg) => {
                assert!(msg.contains("face 2 is paired with 7"), "{msg}");
                assert!(msg.contains("only 3 faces"), "{msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cube_pairs_axis_opposites() {
        let pairing = pair_faces(&solids::cube());
        assert_eq!(pairing.pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 3), (4, 5)]);
    }

    #[test]
    fn test_octahedron_pairs_antipodes() {
        let octa = solids::octahedron();
        let pairing = pair_faces(&octa);
        assert_eq!(
            pairing.pairs().collect::<Vec<_>>(),
            vec![(0, 6), (1, 5), (2, 4), (3, 7)]
        );
        for (i, j) in pairing.pairs() {
            let dot = octa.face_normal(i).dot(&octa.face_normal(j));
            assert!((dot + 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tetrahedron_has_no_fixed_points() {
        let pairing = pair_faces(&solids::tetrahedron());
        assert_eq!(pairing.pairs().count(), 2);
        assert_eq!(pairing.fixed_points().count(), 0);
    }

    #[test]
    fn test_single_face_pairs_with_itself() {
        let pairing = pair_normals(&[Vector3::z()]);
        assert_eq!(pairing.as_slice(), &[0]);
    }

    #[test]
    fn test_odd_count_leaves_one_fixed_point() {
        let normals = [Vector3::x(), Vector3::y(), -Vector3::x()];
        let pairing = pair_normals(&normals);
        assert_eq!(pairing.as_slice(), &[2, 1, 0]);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        // Faces 1 and 2 are equally (not) opposite to face 0
        let normals = [Vector3::z(), Vector3::x(), Vector3::y(), -Vector3::y()];
        let pairing = pair_normals(&normals);
        assert_eq!(pairing.partner(0), 1);
        assert_eq!(pairing.partner(2), 3);
    }
}
