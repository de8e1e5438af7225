use serde::{Deserialize, Serialize};
use topocheck_types::Geom;

/// Decoded geometry of one feature of a layer, with the id it is reported under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Caller-assigned feature id.
    pub id: String,
    /// Geometry of the feature.
    pub geometry: Geom,
}

impl Feature {
    /// Creates a new feature.
    pub fn new(id: impl Into<String>, geometry: impl Into<Geom>) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
        }
    }
}
