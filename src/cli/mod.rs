//! CLI entrypoint module structure.
pub mod args;
pub mod profile;

pub use args::{LaunchArgs, ParsedCommand};
pub use profile::{
    resolve_config_path, resolve_python, DebugMode, LaunchOptions, LaunchProfile,
    DEFAULT_HELPERS_ROOT, DEFAULT_PORT, DEFAULT_PYTHON,
};
