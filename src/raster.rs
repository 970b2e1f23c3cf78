//! Raster implementation.
use num_traits::ToPrimitive;

use crate::{RotateError, RotateResult};

/// A single-channel, 8-bit raster backed by a vector.
///
/// Samples are stored in _row-major_ order. Each row occupies `stride` samples,
/// of which the first `width` are image content; any padding after them is kept
/// zeroed and never read as a pixel.
///
/// A [`Raster`] has exactly one owner. Moving data between rasters, for example
/// from a decode buffer into a working buffer, is an explicit copy
/// ([`Raster::copy_to`] or [`Clone`]), so source and destination stay
/// independently mutable.
///
/// # Usage
/// ```
/// use rotimage::Raster;
///
/// let mut img = Raster::new(3, 2).unwrap();
/// img.set(2, 1, 200).unwrap();
/// assert_eq!(img.get(2, 1).unwrap(), 200);
/// assert!(img.get(3, 0).is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Raster {
    pub(crate) data: Vec<u8>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) stride: usize,
}

impl Raster {
    /// Allocate a zeroed raster with `stride == width`.
    ///
    /// # Errors
    /// - [`RotateError::InvalidSize`] if the width or height is zero.
    pub fn new(width: usize, height: usize) -> RotateResult<Self> {
        Self::with_stride(width, height, width)
    }

    /// Allocate a zeroed raster whose rows are `stride` samples apart.
    ///
    /// # Errors
    /// - [`RotateError::InvalidSize`] if the width or height is zero, or the
    ///   buffer size overflows.
    /// - [`RotateError::InvalidStride`] if `stride < width`.
    pub fn with_stride(width: usize, height: usize, stride: usize) -> RotateResult<Self> {
        if width == 0 || height == 0 {
            return Err(RotateError::InvalidSize { width, height });
        }
        if stride < width {
            return Err(RotateError::InvalidStride { stride, width });
        }
        let len = stride
            .checked_mul(height)
            .ok_or(RotateError::InvalidSize { width, height })?;
        Ok(Raster {
            data: vec![0; len],
            width,
            height,
            stride,
        })
    }

    /// Create a raster from packed, row-major samples.
    ///
    /// # Errors
    /// - [`RotateError::InvalidSize`] if the width or height is zero.
    /// - [`RotateError::BufferLength`] if `data.len() != width * height`.
    pub fn from_owned(data: Vec<u8>, width: usize, height: usize) -> RotateResult<Self> {
        if width == 0 || height == 0 {
            return Err(RotateError::InvalidSize { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(RotateError::InvalidSize { width, height })?;
        if data.len() != expected {
            return Err(RotateError::BufferLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Raster {
            data,
            width,
            height,
            stride: width,
        })
    }

    /// Get the width of the raster.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the raster.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the distance between two rows, in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the underlying data, padding included, as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Copy the image content into a packed vector, dropping row padding.
    pub fn to_packed_vec(&self) -> Vec<u8> {
        if self.stride == self.width {
            return self.data.clone();
        }
        self.data
            .chunks_exact(self.stride)
            .flat_map(|row| &row[..self.width])
            .copied()
            .collect()
    }

    /// Borrow the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height);
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// Borrow a mutable row slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height);
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Read the sample at `(x, y)`.
    ///
    /// # Errors
    /// - [`RotateError::OutOfBounds`] if the pixel is outside the raster.
    pub fn get(&self, x: usize, y: usize) -> RotateResult<u8> {
        self.check_bounds(x, y)?;
        Ok(self.data[y * self.stride + x])
    }

    /// Write the sample at `(x, y)`.
    ///
    /// # Errors
    /// - [`RotateError::OutOfBounds`] if the pixel is outside the raster.
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> RotateResult<()> {
        self.check_bounds(x, y)?;
        self.data[y * self.stride + x] = value;
        Ok(())
    }

    /// Copy the image content into `dst`.
    ///
    /// The two rasters may have different strides, but must have the same width
    /// and height. On error `dst` is left untouched.
    ///
    /// # Errors
    /// - [`RotateError::ShapeMismatch`] if the dimensions differ.
    pub fn copy_to(&self, dst: &mut Raster) -> RotateResult<()> {
        if dst.width != self.width || dst.height != self.height {
            return Err(RotateError::ShapeMismatch {
                expected: (self.width, self.height),
                found: (dst.width, dst.height),
            });
        }
        if dst.stride == self.stride {
            dst.data.copy_from_slice(&self.data);
            return Ok(());
        }
        for y in 0..self.height {
            dst.row_mut(y).copy_from_slice(self.row(y));
        }
        Ok(())
    }

    /// Sample the raster at a real-valued coordinate with nearest-neighbour rounding.
    ///
    /// Coordinates are rounded half away from zero. Returns `None` when the
    /// rounded pixel lies outside the raster, or the coordinate is not finite.
    #[inline(always)]
    pub fn sample_nearest(&self, x: f64, y: f64) -> Option<u8> {
        let x = x.round().to_i64()?;
        let y = y.round().to_i64()?;
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.stride + x])
    }

    fn check_bounds(&self, x: usize, y: usize) -> RotateResult<()> {
        if x >= self.width || y >= self.height {
            return Err(RotateError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
