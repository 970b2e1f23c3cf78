#![deny(missing_docs)]
//! Crate to rotate 8-bit grayscale rasters by arbitrary angles.
//!
//! Rotation happens in three steps:
//!
//! 1. [`compute_rotated_bounds`] rotates the source rectangle's corners about the
//!    origin and returns their axis-aligned [`BoundingBox`].
//! 2. [`BoundingBox::placement`] turns the box into a canvas size and the
//!    translation that moves the rotated content fully onto the canvas.
//! 3. [`rotate`] maps every canvas pixel back through the inverse rotation and
//!    copies the nearest source sample, or [`BACKGROUND`] where there is none.
//!
//! The [`Rotate`] trait runs all three for a [`Raster`].
//!
//! # Example
//!
//! ```
//! use rotimage::{Raster, Rotate};
//!
//! let src = Raster::from_owned(vec![10, 20, 30, 40, 50, 60, 70, 80], 4, 2).unwrap();
//! let (rotated, placement) = src.rotate(90.0).unwrap();
//! assert_eq!((rotated.width(), rotated.height()), (2, 4));
//! assert_eq!(rotated.row(0), &[0, 50]);
//! assert_eq!(placement.offset_x, 2.0);
//! ```
//!
//! # Features
//! - `rayon` (default): resample destination rows in parallel.
//! - `image` (default): PGM and PNG decoding/encoding in [`codec`], and the
//!   `rotate_image` binary.

mod bounds;
mod errcode;
mod imagetraits;
mod raster;
mod resample;

#[cfg(feature = "image")]
pub mod codec;

pub use bounds::{compute_rotated_bounds, BoundingBox, Placement, Point2, Rotation};
pub use errcode::{RotateError, RotateResult};
pub use imagetraits::Rotate;
pub use raster::Raster;
pub use resample::{rotate, rotate_into, rotate_with_placement, BACKGROUND};
