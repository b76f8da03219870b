use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths::is_nonempty_absolute};

/// `[python]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PythonSection {
    pub interpreter: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawPythonSection {
    pub interpreter: Option<PathBuf>,
}

/// `[helpers]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpersSection {
    pub root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawHelpersSection {
    pub root: Option<PathBuf>,
}

pub fn parse_python_section(
    raw: Option<RawPythonSection>,
    path: &Path,
) -> Result<PythonSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    if let Some(interpreter) = &raw.interpreter {
        if interpreter.as_os_str().is_empty() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "python.interpreter",
                message: "Interpreter must not be empty".into(),
            });
        }
    }
    Ok(PythonSection {
        interpreter: raw.interpreter,
    })
}

pub fn parse_helpers_section(
    raw: Option<RawHelpersSection>,
    path: &Path,
) -> Result<HelpersSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    if let Some(root) = &raw.root {
        if !is_nonempty_absolute(root) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "helpers.root",
                message: format!("Use an absolute path (got {})", root.display()),
            });
        }
    }
    Ok(HelpersSection { root: raw.root })
}
