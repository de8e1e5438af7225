use serde::{Deserialize, Serialize};
use topocheck_types::{BoundingBox, Vector2d};

/// Topology defect of a structurally valid geometry.
///
/// Every variant carries a location that lies within the bounding box of the feature(s) that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckError {
    /// Two non-adjacent edges of the same ring or line cross.
    SelfIntersection {
        /// Crossing point.
        location: Vector2d,
        /// Index of the ring (exterior first, then holes, polygon by polygon) or `0` for a line.
        ring_index: u32,
        /// Index of the first crossing edge.
        segment_a: u32,
        /// Index of the second crossing edge.
        segment_b: u32,
    },
    /// Feature shares more area with another feature than allowed.
    Overlap {
        /// Id of the other feature.
        other_feature_id: String,
        /// Area of the shared region.
        overlap_area: f64,
        /// A point inside the shared region.
        overlap_location: Vector2d,
    },
    /// Uncovered region enclosed by the polygons of a layer.
    Gap {
        /// A point inside the gap.
        error_location: Vector2d,
        /// Area of the gap.
        gap_area: f64,
        /// Bounding box of the gap.
        gap_bbox: BoundingBox,
        /// Bounding box of the region searched to find the gap. Always contains `gap_bbox`.
        gap_area_bbox: BoundingBox,
    },
    /// Feature lies inside another feature.
    Containment {
        /// Id of the containing feature.
        other_feature_id: String,
        /// How much of the feature is contained.
        containment_kind: ContainmentKind,
    },
}

/// How much of a feature lies inside another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentKind {
    /// The whole feature is inside.
    FullyContains,
    /// Some parts of the feature are inside.
    PartiallyContains,
}

impl CheckError {
    /// Representative location of the defect.
    ///
    /// `None` for containment, which describes a relation rather than a place.
    pub fn location(&self) -> Option<Vector2d> {
        match self {
            CheckError::SelfIntersection { location, .. } => Some(*location),
            CheckError::Overlap {
                overlap_location, ..
            } => Some(*overlap_location),
            CheckError::Gap { error_location, .. } => Some(*error_location),
            CheckError::Containment { .. } => None,
        }
    }
}
