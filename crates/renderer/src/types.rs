use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ViewerError;

/// Which images the viewer composites each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    /// One image stretched across the whole surface.
    Single { image: PathBuf },
    /// A backdrop tiled at the quadrant origins with an overlay
    /// centered on top of it.
    Layered {
        backdrop: PathBuf,
        overlay: PathBuf,
    },
}

impl Scene {
    /// Image paths in decode order; the backdrop loads before the overlay.
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            Scene::Single { image } => vec![image.as_path()],
            Scene::Layered { backdrop, overlay } => {
                vec![backdrop.as_path(), overlay.as_path()]
            }
        }
    }
}

/// Immutable configuration passed to the viewer at start-up.
///
/// `ViewerConfig` mirrors CLI flags and replaces what used to be
/// hardcoded constants: window geometry, image paths, and the frame
/// loop shape.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Window title.
    pub title: String,
    /// Images to composite.
    pub scene: Scene,
    /// How many frames to present before closing the window.
    pub frame_count: u32,
    /// Pause between presented frames.
    pub frame_interval: Duration,
}

impl ViewerConfig {
    /// Rejects configurations the viewer cannot run with.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let (width, height) = self.surface_size;
        if width == 0 || height == 0 {
            return Err(ViewerError::Config(format!(
                "surface dimensions must be non-zero, got {width}x{height}"
            )));
        }
        for path in self.scene.paths() {
            if path.as_os_str().is_empty() {
                return Err(ViewerError::Config(
                    "scene contains an empty image path".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    /// Provides the stock 640x480, three-frame, one-second run with no
    /// image selected.
    fn default() -> Self {
        Self {
            surface_size: (640, 480),
            title: "bmpshow".to_string(),
            scene: Scene::Single {
                image: PathBuf::new(),
            },
            frame_count: 3,
            frame_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_stock_run() {
        let config = ViewerConfig::default();
        assert_eq!(config.surface_size, (640, 480));
        assert_eq!(config.frame_count, 3);
        assert_eq!(config.frame_interval, Duration::from_secs(1));
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let config = ViewerConfig {
            surface_size: (640, 0),
            scene: Scene::Single {
                image: PathBuf::from("a.bmp"),
            },
            ..ViewerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ViewerError::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_paths() {
        let config = ViewerConfig::default();
        assert!(matches!(config.validate(), Err(ViewerError::Config(_))));

        let config = ViewerConfig {
            scene: Scene::Layered {
                backdrop: PathBuf::from("backdrop.bmp"),
                overlay: PathBuf::new(),
            },
            ..ViewerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ViewerError::Config(_))));
    }

    #[test]
    fn layered_scenes_decode_the_backdrop_first() {
        let scene = Scene::Layered {
            backdrop: PathBuf::from("backdrop.bmp"),
            overlay: PathBuf::from("overlay.bmp"),
        };
        let paths = scene.paths();
        assert_eq!(paths[0], Path::new("backdrop.bmp"));
        assert_eq!(paths[1], Path::new("overlay.bmp"));
    }
}
