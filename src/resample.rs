//! Nearest-neighbour resampling under an inverse rotation.
//!
//! Every destination pixel is mapped independently: translate by the placement
//! offset, rotate by the negated angle into source space, round to the nearest
//! source pixel and copy it, or write [`BACKGROUND`] if it falls outside the
//! source. Destination rows are disjoint, so with the `rayon` feature they are
//! filled in parallel from a shared, read-only source.

use log::trace;
#[cfg(feature = "rayon")]
use rayon::{iter::IndexedParallelIterator, iter::ParallelIterator, slice::ParallelSliceMut};

use crate::{
    compute_rotated_bounds, Placement, Raster, Rotate, RotateError, RotateResult, Rotation,
};

/// Sample written where no source pixel maps.
pub const BACKGROUND: u8 = 0;

/// Rotate `src` by `angle_degrees` onto a new `dest_width x dest_height` raster.
///
/// Destination pixel `(dx, dy)` takes the source sample nearest to
/// `R(-angle) · (dx - origin_offset_x, dy - origin_offset_y)`, or [`BACKGROUND`]
/// when that falls outside `src`.
///
/// # Errors
/// - [`RotateError::InvalidSize`] if either destination dimension is zero. No
///   destination is allocated in that case.
/// - [`RotateError::InvalidAngle`] if the angle is not finite.
pub fn rotate(
    src: &Raster,
    angle_degrees: f64,
    dest_width: usize,
    dest_height: usize,
    origin_offset_x: f64,
    origin_offset_y: f64,
) -> RotateResult<Raster> {
    if !angle_degrees.is_finite() {
        return Err(RotateError::InvalidAngle(angle_degrees));
    }
    let mut dst = Raster::new(dest_width, dest_height)?;
    rotate_into(src, &mut dst, angle_degrees, origin_offset_x, origin_offset_y)?;
    Ok(dst)
}

/// Rotate `src` onto the canvas described by `placement`.
///
/// # Errors
/// - See [`rotate`].
pub fn rotate_with_placement(
    src: &Raster,
    angle_degrees: f64,
    placement: &Placement,
) -> RotateResult<Raster> {
    rotate(
        src,
        angle_degrees,
        placement.width,
        placement.height,
        placement.offset_x,
        placement.offset_y,
    )
}

/// Rotate `src` into an existing destination raster.
///
/// Every pixel of `dst` is overwritten; its padding columns are left alone.
///
/// # Errors
/// - [`RotateError::InvalidAngle`] if the angle is not finite. `dst` is left
///   untouched in that case.
pub fn rotate_into(
    src: &Raster,
    dst: &mut Raster,
    angle_degrees: f64,
    origin_offset_x: f64,
    origin_offset_y: f64,
) -> RotateResult<()> {
    if !angle_degrees.is_finite() {
        return Err(RotateError::InvalidAngle(angle_degrees));
    }
    trace!(
        "Resampling {}x{} -> {}x{} at {}°, offset ({}, {})",
        src.width(),
        src.height(),
        dst.width(),
        dst.height(),
        angle_degrees,
        origin_offset_x,
        origin_offset_y
    );
    let inverse = Rotation::from_degrees(angle_degrees).inverse();
    let width = dst.width;
    let stride = dst.stride;

    let fill_row = |(dy, row): (usize, &mut [u8])| {
        let uy = dy as f64 - origin_offset_y;
        for (dx, px) in row[..width].iter_mut().enumerate() {
            let ux = dx as f64 - origin_offset_x;
            let (sx, sy) = inverse.apply(ux, uy);
            *px = src.sample_nearest(sx, sy).unwrap_or(BACKGROUND);
        }
    };

    #[cfg(feature = "rayon")]
    {
        dst.data.par_chunks_mut(stride).enumerate().for_each(fill_row);
    }
    #[cfg(not(feature = "rayon"))]
    {
        dst.data.chunks_mut(stride).enumerate().for_each(fill_row);
    }
    Ok(())
}

impl Rotate for Raster {
    type Output = Raster;

    fn rotate(&self, angle_degrees: f64) -> RotateResult<(Self::Output, Placement)> {
        let bounds = compute_rotated_bounds(self.width(), self.height(), angle_degrees)?;
        let placement = bounds.placement()?;
        let out = rotate_with_placement(self, angle_degrees, &placement)?;
        Ok((out, placement))
    }
}

#[cfg(test)]
mod tests {
    use super::{rotate, rotate_into, BACKGROUND};
    use crate::{Raster, Rotate, RotateError};

    fn fixture_4x2() -> Raster {
        Raster::from_owned(vec![10, 20, 30, 40, 50, 60, 70, 80], 4, 2).unwrap()
    }

    #[test]
    fn test_quarter_turn_golden() {
        let src = fixture_4x2();
        let (out, placement) = src.rotate(90.0).unwrap();
        assert_eq!((placement.width, placement.height), (2, 4));
        assert_eq!((out.width(), out.height()), (2, 4));
        // Column 0 maps back to source row 2, one past the bottom edge.
        let expected = [0, 50, 0, 60, 0, 70, 0, 80];
        assert_eq!(out.as_slice(), &expected[..]);
    }

    #[test]
    fn test_half_turn_golden() {
        let src = fixture_4x2();
        let (out, placement) = src.rotate(180.0).unwrap();
        assert_eq!((placement.width, placement.height), (4, 2));
        // Offset (4, 2): row 0 reads source row 2, column 0 reads source column 4.
        let expected = [0, 0, 0, 0, 0, 80, 70, 60];
        assert_eq!(out.as_slice(), &expected[..]);
    }

    #[test]
    fn test_zero_angle_is_copy() {
        let src = fixture_4x2();
        let (out, _) = src.rotate(0.0).unwrap();
        assert_eq!(out, src);
        let out = rotate(&src, 0.0, 4, 2, 0.0, 0.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_offset_translates_content() {
        let src = fixture_4x2();
        let out = rotate(&src, 0.0, 6, 4, 1.0, 2.0).unwrap();
        assert_eq!(out.row(0), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(out.row(1), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(out.row(2), &[0, 10, 20, 30, 40, 0]);
        assert_eq!(out.row(3), &[0, 50, 60, 70, 80, 0]);
    }

    #[test]
    fn test_zero_destination_is_rejected() {
        let src = fixture_4x2();
        assert!(matches!(
            rotate(&src, 30.0, 0, 4, 0.0, 0.0),
            Err(RotateError::InvalidSize {
                width: 0,
                height: 4
            })
        ));
        assert!(matches!(
            rotate(&src, 30.0, 4, 0, 0.0, 0.0),
            Err(RotateError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_non_finite_angle() {
        let src = fixture_4x2();
        assert!(matches!(
            rotate(&src, f64::NAN, 4, 2, 0.0, 0.0),
            Err(RotateError::InvalidAngle(_))
        ));
        let mut dst = Raster::from_owned(vec![7; 8], 4, 2).unwrap();
        assert!(rotate_into(&src, &mut dst, f64::NEG_INFINITY, 0.0, 0.0).is_err());
        assert!(dst.as_slice().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_rotate_into_keeps_padding() {
        let src = fixture_4x2();
        let mut dst = Raster::with_stride(4, 2, 6).unwrap();
        rotate_into(&src, &mut dst, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(
            dst.as_slice(),
            &[10, 20, 30, 40, 0, 0, 50, 60, 70, 80, 0, 0]
        );
        assert_eq!(dst.to_packed_vec(), src.to_packed_vec());
    }

    #[test]
    fn test_far_offset_is_background() {
        let src = fixture_4x2();
        let out = rotate(&src, 33.0, 5, 5, -100.0, -100.0).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == BACKGROUND));
    }
}
