use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};

use rotimage::{codec, compute_rotated_bounds, rotate_with_placement, Raster, RotateResult};

const SAMPLE_IMAGE: &str = "data/sample.pgm";

/// Output stem used when the input path has no file name.
const FALLBACK_STEM: &str = "image";

/// Angle of the diagnostic bounding box reported at debug level.
const DIAGNOSTIC_ANGLE: f64 = 45.0;

/// Rotate an 8-bit grayscale image onto a canvas that holds all of it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the image file to rotate. Defaults to the bundled sample.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the rotated PGM. Defaults to `<input>_rotate.pgm`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rotation angle, degrees.
    #[arg(short, long, default_value_t = 30.0, allow_negative_numbers = true)]
    angle: f64,
}

fn default_input() -> PathBuf {
    let local = PathBuf::from(SAMPLE_IMAGE);
    if local.exists() {
        local
    } else {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(SAMPLE_IMAGE)
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_STEM.to_owned());
    input.with_file_name(format!("{stem}_rotate.pgm"))
}

fn log_diagnostic_offsets(src: &Raster) -> RotateResult<()> {
    let placement = compute_rotated_bounds(src.width(), src.height(), DIAGNOSTIC_ANGLE)?
        .placement()?;
    debug!(
        "At {}° the canvas would be {}x{} with offset ({:.2}, {:.2})",
        DIAGNOSTIC_ANGLE, placement.width, placement.height, placement.offset_x, placement.offset_y
    );
    Ok(())
}

fn run(args: Args) -> RotateResult<()> {
    let input = args.input.unwrap_or_else(default_input);
    let output = args.output.unwrap_or_else(|| default_output(&input));

    let src = codec::open(&input)?;
    info!(
        "Opened {:?} ({}x{})",
        input,
        src.width(),
        src.height()
    );
    log_diagnostic_offsets(&src)?;

    let bounds = compute_rotated_bounds(src.width(), src.height(), args.angle)?;
    let placement = bounds.placement()?;
    info!(
        "Rotating by {}° onto a {}x{} canvas, offset ({:.2}, {:.2})",
        args.angle, placement.width, placement.height, placement.offset_x, placement.offset_y
    );

    let rotate_start = Instant::now();
    let dst = rotate_with_placement(&src, args.angle, &placement)?;
    info!("Rotated in {:?}", rotate_start.elapsed());

    codec::save(&dst, &output)?;
    info!("Saved image: {:?}", output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{default_output, Args};

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/Lena.pgm")),
            Path::new("data/Lena_rotate.pgm")
        );
        assert_eq!(
            default_output(Path::new("photo")),
            Path::new("photo_rotate.pgm")
        );
        assert_eq!(
            default_output(Path::new("..")),
            Path::new("../image_rotate.pgm")
        );
        assert_eq!(
            default_output(Path::new("/")),
            Path::new("/image_rotate.pgm")
        );
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["rotate_image"]);
        assert_eq!(args.angle, 30.0);
        assert!(args.input.is_none());

        let args = Args::parse_from(["rotate_image", "-i", "a.pgm", "--angle", "-12.5"]);
        assert_eq!(args.angle, -12.5);
        assert_eq!(args.input.as_deref(), Some(Path::new("a.pgm")));
        assert!(args.output.is_none());
    }
}
