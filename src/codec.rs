//! Grayscale image I/O through the `image` crate.
//!
//! Only single-channel, 8-bit images are accepted. Anything else, including
//! 16-bit graymaps and color pixmaps, is a [`RotateError::Format`].
use std::fs::File;
use std::io::{BufRead, BufWriter, Seek, Write};
use std::path::Path;

pub use image::{DynamicImage, GrayImage};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};

use crate::{Raster, RotateError, RotateResult};

impl TryFrom<DynamicImage> for Raster {
    type Error = RotateError;

    fn try_from(data: DynamicImage) -> Result<Self, Self::Error> {
        let width = data.width() as usize;
        let height = data.height() as usize;
        match data {
            DynamicImage::ImageLuma8(data) => Raster::from_owned(data.into_raw(), width, height),
            other => Err(RotateError::Format(format!(
                "Expected a single-channel 8-bit image, found {:?}",
                other.color()
            ))),
        }
    }
}

impl TryFrom<&Raster> for GrayImage {
    type Error = RotateError;

    fn try_from(value: &Raster) -> Result<Self, Self::Error> {
        let (width, height) = dimensions_u32(value)?;
        GrayImage::from_raw(width, height, value.to_packed_vec())
            .ok_or_else(|| RotateError::Format("Could not create Gray8 image".into()))
    }
}

fn dimensions_u32(raster: &Raster) -> RotateResult<(u32, u32)> {
    match (
        u32::try_from(raster.width()),
        u32::try_from(raster.height()),
    ) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(RotateError::InvalidSize {
            width: raster.width(),
            height: raster.height(),
        }),
    }
}

/// Decode a PGM (`P2` or `P5`) graymap from `reader`.
///
/// # Errors
/// - [`RotateError::Format`] if the header is malformed, the data ends early,
///   or the image is not single-channel 8-bit.
/// - [`RotateError::Io`] if reading fails.
pub fn read_pgm<R: BufRead + Seek>(reader: R) -> RotateResult<Raster> {
    let img = image::load(reader, ImageFormat::Pnm)?;
    Raster::try_from(img)
}

/// Open an image file. The format is guessed from the file contents.
///
/// # Errors
/// - [`RotateError::Io`] if the file can not be opened or read.
/// - [`RotateError::Format`] if the file can not be decoded, or is not
///   single-channel 8-bit.
pub fn open<P: AsRef<Path>>(path: P) -> RotateResult<Raster> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Raster::try_from(img)
}

/// Encode `raster` as a binary (`P5`) PGM with a maximum value of 255.
///
/// # Errors
/// - [`RotateError::Io`] if writing fails.
pub fn write_pgm<W: Write>(raster: &Raster, writer: W) -> RotateResult<()> {
    let (width, height) = dimensions_u32(raster)?;
    let encoder =
        PnmEncoder::new(writer).with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
    encoder.write_image(
        &raster.to_packed_vec(),
        width,
        height,
        ExtendedColorType::L8,
    )?;
    Ok(())
}

/// Save `raster` to `path` as a binary PGM.
///
/// # Errors
/// - [`RotateError::Io`] if the file can not be created or written.
pub fn save<P: AsRef<Path>>(raster: &Raster, path: P) -> RotateResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_pgm(raster, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{read_pgm, write_pgm, DynamicImage, GrayImage};
    use crate::{Raster, RotateError};

    #[test]
    fn test_write_binary_pgm() {
        let img = Raster::from_owned(vec![0, 128, 255, 7, 8, 9], 3, 2).unwrap();
        let mut buf = Vec::new();
        write_pgm(&img, &mut buf).unwrap();
        assert!(buf.starts_with(b"P5"));
        assert!(buf.ends_with(&[0, 128, 255, 7, 8, 9]));
        let back = read_pgm(Cursor::new(buf)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_write_drops_padding() {
        let src = Raster::from_owned(vec![1, 2, 3, 4], 2, 2).unwrap();
        let mut padded = Raster::with_stride(2, 2, 4).unwrap();
        src.copy_to(&mut padded).unwrap();
        let mut buf = Vec::new();
        write_pgm(&padded, &mut buf).unwrap();
        assert!(buf.ends_with(&[1, 2, 3, 4]));
        assert_eq!(read_pgm(Cursor::new(buf)).unwrap(), src);
    }

    #[test]
    fn test_read_ascii_pgm() {
        let data = b"P2\n# comment\n3 2\n255\n1 2 3\n4 5 6\n".to_vec();
        let img = read_pgm(Cursor::new(data)).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_reject_color_pixmap() {
        let data = b"P6\n1 1\n255\n\x01\x02\x03".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(data)),
            Err(RotateError::Format(_))
        ));
    }

    #[test]
    fn test_reject_malformed_header() {
        let data = b"P5\nthree two\n255\n".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(data)),
            Err(RotateError::Format(_))
        ));
    }

    #[test]
    fn test_reject_truncated_header() {
        let data = b"P5\n3".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(data)),
            Err(RotateError::Format(_))
        ));
    }

    #[test]
    fn test_reject_truncated_samples() {
        let data = b"P5\n3 2\n255\n\x01\x02".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(data)),
            Err(RotateError::Format(_))
        ));
    }

    #[test]
    fn test_dynamicimage_interop() {
        let img = Raster::from_owned(vec![1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        let gray = GrayImage::try_from(&img).unwrap();
        assert_eq!(gray.dimensions(), (3, 2));
        let back = Raster::try_from(DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(back, img);

        let rgb = DynamicImage::new_rgb8(2, 2);
        assert!(matches!(
            Raster::try_from(rgb),
            Err(RotateError::Format(_))
        ));
    }
}
