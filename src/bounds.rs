//! Bounding box of a rotated rectangle, and the canvas placement derived from it.
//!
//! Rotation is about the origin, not the rectangle's center. The resulting box
//! therefore also carries the translation that brings the rotated content back
//! into a non-negative frame: callers apply [`Placement::offset_x`] and
//! [`Placement::offset_y`] before resampling.

use itertools::Itertools;
use log::debug;
use num_traits::ToPrimitive;

use crate::{RotateError, RotateResult};

/// Overshoot of a real extent above an integer that still rounds down to it.
///
/// `cos(90°)` is not exactly zero, so a 4x2 rectangle rotated by 90° spans
/// `2 + 2.4e-16` columns; without snapping the canvas would gain an empty column.
const EXTENT_TOLERANCE: f64 = 1e-6;

/// A point in the real plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2 {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rotation about the origin, stored as the cosine and sine of its angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    cos: f64,
    sin: f64,
}

impl Rotation {
    /// Create a rotation by `angle_degrees`. Any real angle is accepted; values
    /// outside `[0, 360)` wrap through the periodicity of `sin` and `cos`.
    pub fn from_degrees(angle_degrees: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self { cos, sin }
    }

    /// The rotation by the negated angle.
    pub fn inverse(self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }

    /// Rotate `(x, y)`: `(x·cos − y·sin, x·sin + y·cos)`.
    #[inline(always)]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.cos - y * self.sin, x * self.sin + y * self.cos)
    }
}

/// Axis-aligned box enclosing a rotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Componentwise minimum of the rotated corners.
    pub min: Point2,
    /// Componentwise maximum of the rotated corners.
    pub max: Point2,
}

/// Destination canvas size and the translation that places rotated content on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Horizontal translation applied after rotation (`-min.x`).
    pub offset_x: f64,
    /// Vertical translation applied after rotation (`-min.y`).
    pub offset_y: f64,
}

impl BoundingBox {
    /// Real-valued horizontal extent.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Real-valued vertical extent.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Derive the canvas that holds this box without clipping.
    ///
    /// The canvas size is the ceiling of each extent; overshoot below
    /// `1e-6` is treated as rounding noise. The offset is the negated minimum
    /// corner.
    ///
    /// # Errors
    /// - [`RotateError::InvalidSize`] if an extent is not finite or rounds to zero.
    pub fn placement(&self) -> RotateResult<Placement> {
        let width = snap_ceil(self.width());
        let height = snap_ceil(self.height());
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            (w, h) => {
                return Err(RotateError::InvalidSize {
                    width: w.unwrap_or(0),
                    height: h.unwrap_or(0),
                })
            }
        };
        let placement = Placement {
            width,
            height,
            offset_x: -self.min.x,
            offset_y: -self.min.y,
        };
        debug!("Placement {:?} for {:?}", placement, self);
        Ok(placement)
    }
}

fn snap_ceil(extent: f64) -> Option<usize> {
    (extent - EXTENT_TOLERANCE).ceil().max(0.0).to_usize()
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.minmax().into_option().unwrap_or_default()
}

/// Compute the bounding box of a `width x height` rectangle rotated by
/// `angle_degrees` about the origin.
///
/// The rectangle's corners are `(0, 0)`, `(width, 0)`, `(0, height)` and
/// `(width, height)`.
///
/// # Errors
/// - [`RotateError::InvalidSize`] if the width or height is zero.
/// - [`RotateError::InvalidAngle`] if the angle is not finite.
///
/// # Usage
/// ```
/// use rotimage::compute_rotated_bounds;
///
/// let bounds = compute_rotated_bounds(4, 2, 90.0).unwrap();
/// let placement = bounds.placement().unwrap();
/// assert_eq!((placement.width, placement.height), (2, 4));
/// ```
pub fn compute_rotated_bounds(
    width: usize,
    height: usize,
    angle_degrees: f64,
) -> RotateResult<BoundingBox> {
    if width == 0 || height == 0 {
        return Err(RotateError::InvalidSize { width, height });
    }
    if !angle_degrees.is_finite() {
        return Err(RotateError::InvalidAngle(angle_degrees));
    }
    let rotation = Rotation::from_degrees(angle_degrees);
    let (w, h) = (width as f64, height as f64);
    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)].map(|(x, y)| rotation.apply(x, y));
    let (min_x, max_x) = extent(corners.iter().map(|c| c.0));
    let (min_y, max_y) = extent(corners.iter().map(|c| c.1));
    let bounds = BoundingBox {
        min: Point2::new(min_x, min_y),
        max: Point2::new(max_x, max_y),
    };
    debug!(
        "Bounds of {}x{} rotated by {}°: {:?}",
        width, height, angle_degrees, bounds
    );
    Ok(bounds)
}
