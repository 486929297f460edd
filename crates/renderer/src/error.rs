use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a viewer run, one variant per stage.
///
/// Each variant renders as `<operation> error: <underlying error>` so a
/// stderr line identifies the failing stage without a backtrace. All of
/// them are fatal: the caller propagates, already-acquired handles drop
/// in reverse order, and the process exits with a failure status.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The windowing subsystem could not be initialised.
    #[error("event loop init error: {0}")]
    Init(String),

    /// The OS refused to create the window.
    #[error("window creation error: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    /// The rendering surface could not be bound to the window.
    #[error("surface creation error: {0}")]
    CreateSurface(String),

    /// No usable GPU adapter was found for the surface.
    #[error("adapter selection error: {0}")]
    RequestAdapter(String),

    /// The adapter refused to hand out a logical device.
    #[error("device creation error: {0}")]
    RequestDevice(String),

    /// An image file could not be decoded.
    #[error("image decode error: {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A decoded image could not be turned into a texture.
    #[error("texture upload error: {0}")]
    Upload(String),

    /// The supplied configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The event loop failed while the viewer was running.
    #[error("event loop error: {0}")]
    EventLoop(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings_name_the_failing_operation() {
        let err = ViewerError::Init("no display".into());
        assert_eq!(err.to_string(), "event loop init error: no display");

        let err = ViewerError::Upload("image 'overlay' has zero extent (0x4)".into());
        assert!(err.to_string().starts_with("texture upload error: "));

        let err = ViewerError::Config("surface dimensions must be non-zero".into());
        assert!(err.to_string().starts_with("configuration error: "));
    }

    #[test]
    fn decode_errors_carry_the_offending_path() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = ViewerError::Decode {
            path: PathBuf::from("/tmp/swirl_effect.bmp"),
            source,
        };
        let text = err.to_string();
        assert!(text.starts_with("image decode error: "));
        assert!(text.contains("/tmp/swirl_effect.bmp"));
    }
}
