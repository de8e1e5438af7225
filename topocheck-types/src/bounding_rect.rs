use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::vec::Vector2d;

/// Axis-aligned rectangle. Bounds are always normalized so that `x_min <= x_max` and `y_min <= y_max`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

#[derive(Deserialize)]
struct RawBoundingBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = GeometryError;

    fn try_from(value: RawBoundingBox) -> Result<Self, Self::Error> {
        Self::new(value.x_min, value.y_min, value.x_max, value.y_max)
    }
}

impl BoundingBox {
    /// Creates a rectangle from two opposite corners given in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, GeometryError> {
        let p1 = Vector2d::new(x1, y1)?;
        let p2 = Vector2d::new(x2, y2)?;
        Ok(Self::from_corners(p1, p2))
    }

    /// Creates a rectangle from two opposite corners given in any order.
    pub fn from_corners(p1: Vector2d, p2: Vector2d) -> Self {
        Self {
            x_min: p1.x().min(p2.x()),
            y_min: p1.y().min(p2.y()),
            x_max: p1.x().max(p2.x()),
            y_max: p1.y().max(p2.y()),
        }
    }

    /// Zero-size rectangle at the point.
    pub fn from_point(p: &Vector2d) -> Self {
        Self {
            x_min: p.x(),
            x_max: p.x(),
            y_min: p.y(),
            y_max: p.y(),
        }
    }

    /// Smallest rectangle containing all the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Vector2d>) -> Option<Self> {
        let first = points.next()?;
        let mut rect = Self::from_point(first);

        for p in points {
            rect.x_min = rect.x_min.min(p.x());
            rect.y_min = rect.y_min.min(p.y());
            rect.x_max = rect.x_max.max(p.x());
            rect.y_max = rect.y_max.max(p.y());
        }

        Some(rect)
    }

    /// Union of all rectangles of the iterator, `None` if it is empty.
    pub fn union_all(rects: impl IntoIterator<Item = BoundingBox>) -> Option<Self> {
        rects.into_iter().reduce(|acc, r| acc.union(&r))
    }

    /// Left bound.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right bound.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom bound.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top bound.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Lower-left corner.
    pub fn min(&self) -> Vector2d {
        Vector2d::from_finite(self.x_min, self.y_min)
    }

    /// Upper-right corner.
    pub fn max(&self) -> Vector2d {
        Vector2d::from_finite(self.x_max, self.y_max)
    }

    /// Center point.
    pub fn center(&self) -> Vector2d {
        Vector2d::from_finite(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Returns true if the rectangles share at least one point. Touching edges count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    /// Returns true if the point is inside the rectangle or on its boundary.
    pub fn contains(&self, point: &Vector2d) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Returns true if `other` lies completely inside `self` (shared boundaries allowed).
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.x_min <= other.x_min
            && self.x_max >= other.x_max
            && self.y_min <= other.y_min
            && self.y_max >= other.y_max
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Grows the rectangle by `amount` in every direction. Negative amounts shrink it, but never past its center.
    pub fn expand(&self, amount: f64) -> Self {
        if !amount.is_finite() {
            return *self;
        }

        let center = self.center();
        Self {
            x_min: (self.x_min - amount).min(center.x()),
            y_min: (self.y_min - amount).min(center.y()),
            x_max: (self.x_max + amount).max(center.x()),
            y_max: (self.y_max + amount).max(center.y()),
        }
    }

    /// Rounds every bound to the nearest multiple of `resolution`.
    ///
    /// Meant for deterministic comparison of computed boxes. A non-positive or non-finite resolution leaves the box
    /// as is.
    pub fn snapped_to_grid(&self, resolution: f64) -> Self {
        if !(resolution.is_finite() && resolution > 0.0) {
            return *self;
        }

        let snap = |v: f64| (v / resolution).round() * resolution;
        let x1 = snap(self.x_min);
        let y1 = snap(self.y_min);
        let x2 = snap(self.x_max);
        let y2 = snap(self.y_max);

        if [x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            Self::from_corners(Vector2d::from_finite(x1, y1), Vector2d::from_finite(x2, y2))
        } else {
            *self
        }
    }

    /// Compares two rectangles by value after snapping both to the grid.
    pub fn eq_on_grid(&self, other: &BoundingBox, resolution: f64) -> bool {
        self.snapped_to_grid(resolution) == other.snapped_to_grid(resolution)
    }

    /// Corners of the rectangle, counterclockwise starting from the lower-left one.
    pub fn into_quadrangle(self) -> [Vector2d; 4] {
        [
            Vector2d::from_finite(self.x_min, self.y_min),
            Vector2d::from_finite(self.x_max, self.y_min),
            Vector2d::from_finite(self.x_max, self.y_max),
            Vector2d::from_finite(self.x_min, self.y_max),
        ]
    }
}
