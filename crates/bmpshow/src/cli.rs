use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "bmpshow",
    author,
    version,
    about = "Composite bitmap images in a window for a fixed number of frames",
    arg_required_else_help = false
)]
pub struct Args {
    /// Image to show: stretched across the window on its own, or
    /// centered when a backdrop is tiled behind it.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Backdrop image tiled behind the main image.
    #[arg(long, value_name = "PATH")]
    pub backdrop: Option<PathBuf>,

    /// Window size (e.g. `640x480`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Number of frames to present before closing.
    #[arg(long, value_name = "COUNT")]
    pub frames: Option<u32>,

    /// Pause between frames in milliseconds.
    #[arg(long, value_name = "MILLISECONDS")]
    pub interval_ms: Option<u64>,

    /// Window title.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// TOML settings file supplying defaults for any flag not given.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 640x480"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("window dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_surface_size("640x480").unwrap(), (640, 480));
        assert_eq!(parse_surface_size(" 1280 X 720 ").unwrap(), (1280, 720));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_surface_size("640").is_err());
        assert!(parse_surface_size("640xabc").is_err());
        assert!(parse_surface_size("0x480").is_err());
        assert!(parse_surface_size("640x0").is_err());
    }

    #[test]
    fn cli_accepts_image_and_backdrop() {
        let args = Args::parse_from([
            "bmpshow",
            "overlay.bmp",
            "--backdrop",
            "backdrop.bmp",
            "--frames",
            "5",
        ]);
        assert_eq!(args.image, Some(PathBuf::from("overlay.bmp")));
        assert_eq!(args.backdrop, Some(PathBuf::from("backdrop.bmp")));
        assert_eq!(args.frames, Some(5));
        assert_eq!(args.interval_ms, None);
    }
}
