//! Bounding box R-tree used for candidate pruning.

use rstar::{RTree, RTreeObject, AABB};
use topocheck_types::BoundingBox;

use crate::feature::Feature;

#[derive(Debug, Clone)]
pub(crate) struct IndexedBox {
    pub(crate) idx: usize,
    min: [f64; 2],
    max: [f64; 2],
}

impl IndexedBox {
    pub(crate) fn new(idx: usize, bbox: &BoundingBox) -> Self {
        Self {
            idx,
            min: bbox.min().coords(),
            max: bbox.max().coords(),
        }
    }
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

pub(crate) fn envelope(bbox: &BoundingBox, margin: f64) -> AABB<[f64; 2]> {
    let bbox = bbox.expand(margin);
    AABB::from_corners(bbox.min().coords(), bbox.max().coords())
}

/// Spatial index over the bounding boxes of a layer's features.
///
/// Provides the bounding-box-overlap candidate sets the overlap and containment checks expect. Boxes are grown by
/// the tolerance so that features touching within the tolerance are candidates of each other.
#[derive(Debug)]
pub struct CandidateIndex {
    tree: RTree<IndexedBox>,
    tolerance: f64,
}

impl CandidateIndex {
    /// Indexes features by position in the slice. Features without vertices are not indexed.
    pub fn new(features: &[Feature], tolerance: f64) -> Self {
        let boxes = features
            .iter()
            .enumerate()
            .filter_map(|(i, f)| Some(IndexedBox::new(i, &f.geometry.bounding_box()?)))
            .collect();

        Self {
            tree: RTree::bulk_load(boxes),
            tolerance,
        }
    }

    /// Number of indexed features.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// The index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indices of the features whose boxes intersect `bbox`, in ascending order.
    pub fn query(&self, bbox: &BoundingBox) -> Vec<usize> {
        let search = envelope(bbox, self.tolerance);
        let mut found: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&search)
            .map(|b| b.idx)
            .collect();
        found.sort_unstable();
        found
    }

    /// Candidates of the feature at `index`, excluding the feature itself.
    pub fn candidates_of(&self, features: &[Feature], index: usize) -> Vec<usize> {
        let Some(bbox) = features.get(index).and_then(|f| f.geometry.bounding_box()) else {
            return vec![];
        };

        self.query(&bbox)
            .into_iter()
            .filter(|&i| i != index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topocheck_types::{Geom, Polygon, Ring, Vector2d};

    fn square(id: &str, x: f64, y: f64, size: f64) -> Feature {
        let points = [(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
            .into_iter()
            .map(|p| Vector2d::try_from(p).expect("finite"))
            .collect();
        Feature::new(id, Polygon::from(Ring::new(points)))
    }

    #[test]
    fn candidates() {
        let features = vec![
            square("a", 0.0, 0.0, 1.0),
            square("b", 1.0, 0.0, 1.0),
            square("c", 5.0, 5.0, 1.0),
            square("d", 1.00005, 1.00005, 1.0),
            Feature::new("e", Geom::MultiPoint(vec![])),
        ];

        let index = CandidateIndex::new(&features, 1e-4);
        assert_eq!(index.len(), 4);
        assert_eq!(index.candidates_of(&features, 0), vec![1, 3]);
        assert_eq!(index.candidates_of(&features, 2), Vec::<usize>::new());
        assert_eq!(index.candidates_of(&features, 4), Vec::<usize>::new());
    }
}
