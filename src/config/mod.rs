//! Load and validate the optional launcher configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod sections;
pub mod telemetry;

pub use sections::{
    parse_helpers_section, parse_python_section, HelpersSection, PythonSection,
    RawHelpersSection, RawPythonSection,
};

/// Top-level configuration container.
#[derive(Debug, Clone, Default)]
pub struct LauncherConfig {
    pub python: PythonSection,
    pub helpers: HelpersSection,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    python: Option<RawPythonSection>,
    helpers: Option<RawHelpersSection>,
}

impl LauncherConfig {
    /// Load `path` when given; otherwise fall back to built-in defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                telemetry::log_no_config();
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "debug_launcher::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "debug_launcher::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "debug_launcher::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, &path).map_err(|err| {
            error!(
                target: "debug_launcher::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherConfig, path: &Path) -> Result<Self, ConfigError> {
        let python = parse_python_section(raw.python, path)?;
        let helpers = parse_helpers_section(raw.helpers, path)?;

        Ok(Self {
            python,
            helpers,
            source_path: Some(path.to_path_buf()),
        })
    }
}
