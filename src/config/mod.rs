//! Application locations and client configuration.

use std::path::{Path, PathBuf};

use crate::utils::tts::TtsConfig;

pub mod settings;

pub use settings::{Settings, SettingsStore};

pub const APP_DIR_NAME: &str = "vietvoice";

/// Where the application keeps its settings and generated audio.
#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Per-user data directory, or the system temp directory when the
    /// platform does not report one.
    pub fn from_system() -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(APP_DIR_NAME))
    }

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join("output")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Client configuration writing into this application's output directory.
    pub fn tts_config(&self) -> TtsConfig {
        TtsConfig {
            output_dir: self.output_dir(),
            ..Default::default()
        }
    }
}
