use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional TOML settings file backing the CLI.
///
/// Every field mirrors a flag; command-line values win over file
/// values, and file values win over the built-in defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub image: Option<PathBuf>,
    pub backdrop: Option<PathBuf>,
    pub size: Option<String>,
    pub frames: Option<u32>,
    pub interval_ms: Option<u64>,
    pub title: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file at {}", path.display()))
    }
}
