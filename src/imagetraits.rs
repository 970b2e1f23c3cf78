use crate::{Placement, RotateResult};

/// A trait for rotating an image onto a canvas that holds all of it.
///
/// This trait is implemented for [`Raster`](crate::Raster).
pub trait Rotate {
    /// The output type of [`Rotate::rotate`].
    type Output;

    /// Rotate the image by `angle_degrees` about its origin, then translate the
    /// result onto a canvas sized from the rotated bounding box.
    ///
    /// Returns the rotated image and the [`Placement`] that was used.
    ///
    /// # Errors
    /// - If the angle is not finite.
    fn rotate(&self, angle_degrees: f64) -> RotateResult<(Self::Output, Placement)>;
}
