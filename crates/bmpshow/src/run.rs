use std::time::Duration;

use anyhow::{bail, Result};
use renderer::{Scene, Viewer, ViewerConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_surface_size, Args};
use crate::settings::Settings;

const DEFAULT_SIZE: (u32, u32) = (640, 480);
const DEFAULT_FRAMES: u32 = 3;
const DEFAULT_INTERVAL_MS: u64 = 1_000;
const DEFAULT_TITLE: &str = "bmpshow";

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(args: Args) -> Result<()> {
    let settings = match args.config.as_ref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let config = resolve_config(&args, &settings)?;
    tracing::info!(
        title = %config.title,
        width = config.surface_size.0,
        height = config.surface_size.1,
        frames = config.frame_count,
        interval_ms = config.frame_interval.as_millis() as u64,
        "starting bmpshow"
    );

    Viewer::new(config).run()?;
    Ok(())
}

/// Folds CLI flags over file settings over built-in defaults into one
/// viewer configuration.
fn resolve_config(args: &Args, settings: &Settings) -> Result<ViewerConfig> {
    let image = args.image.clone().or_else(|| settings.image.clone());
    let backdrop = args.backdrop.clone().or_else(|| settings.backdrop.clone());

    let Some(image) = image else {
        bail!("no image provided; pass IMAGE or set `image` in the settings file");
    };
    let scene = match backdrop {
        Some(backdrop) => Scene::Layered {
            backdrop,
            overlay: image,
        },
        None => Scene::Single { image },
    };

    let surface_size = args
        .size
        .as_deref()
        .or(settings.size.as_deref())
        .map(parse_surface_size)
        .transpose()?
        .unwrap_or(DEFAULT_SIZE);
    let frame_count = args.frames.or(settings.frames).unwrap_or(DEFAULT_FRAMES);
    let interval_ms = args
        .interval_ms
        .or(settings.interval_ms)
        .unwrap_or(DEFAULT_INTERVAL_MS);
    let title = args
        .title
        .clone()
        .or_else(|| settings.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(ViewerConfig {
        surface_size,
        title,
        scene,
        frame_count,
        frame_interval: Duration::from_millis(interval_ms),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_apply_when_only_an_image_is_given() {
        let args = Args {
            image: Some(PathBuf::from("a.bmp")),
            ..Args::default()
        };
        let config = resolve_config(&args, &Settings::default()).unwrap();
        assert_eq!(config.surface_size, (640, 480));
        assert_eq!(config.frame_count, 3);
        assert_eq!(config.frame_interval, Duration::from_secs(1));
        assert_eq!(config.title, "bmpshow");
        assert_eq!(
            config.scene,
            Scene::Single {
                image: PathBuf::from("a.bmp")
            }
        );
    }

    #[test]
    fn a_backdrop_selects_the_layered_scene() {
        let args = Args {
            image: Some(PathBuf::from("overlay.bmp")),
            backdrop: Some(PathBuf::from("backdrop.bmp")),
            ..Args::default()
        };
        let config = resolve_config(&args, &Settings::default()).unwrap();
        assert_eq!(
            config.scene,
            Scene::Layered {
                backdrop: PathBuf::from("backdrop.bmp"),
                overlay: PathBuf::from("overlay.bmp"),
            }
        );
    }

    #[test]
    fn cli_values_override_file_settings() {
        let args = Args {
            image: Some(PathBuf::from("cli.bmp")),
            frames: Some(9),
            ..Args::default()
        };
        let settings = Settings {
            image: Some(PathBuf::from("file.bmp")),
            frames: Some(2),
            interval_ms: Some(250),
            size: Some("800x600".to_string()),
            ..Settings::default()
        };
        let config = resolve_config(&args, &settings).unwrap();
        assert_eq!(
            config.scene,
            Scene::Single {
                image: PathBuf::from("cli.bmp")
            }
        );
        assert_eq!(config.frame_count, 9);
        // Unset CLI flags fall back to the file.
        assert_eq!(config.frame_interval, Duration::from_millis(250));
        assert_eq!(config.surface_size, (800, 600));
    }

    #[test]
    fn a_missing_image_is_a_usage_error() {
        let err = resolve_config(&Args::default(), &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("no image provided"));
    }

    #[test]
    fn a_bad_size_spec_is_rejected() {
        let args = Args {
            image: Some(PathBuf::from("a.bmp")),
            size: Some("640".to_string()),
            ..Args::default()
        };
        assert!(resolve_config(&args, &Settings::default()).is_err());
    }
}
