use serde::{Deserialize, Serialize};

use crate::vec::Vector2d;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of the turn `p -> q -> r`.
    pub fn triplet(p: &Vector2d, q: &Vector2d, r: &Vector2d) -> Self {
        let turn = (*q - *p).cross(&(*r - *q));
        if turn > 0.0 {
            Self::Counterclockwise
        } else if turn < 0.0 {
            Self::Clockwise
        } else {
            Self::Collinear
        }
    }
}
