use tracing::{debug, info};

use super::LauncherConfig;

pub fn log_no_config() {
    debug!(
        target: "debug_launcher::config",
        "No launcher config given; using built-in defaults"
    );
}

pub fn log_loaded(config: &LauncherConfig) {
    info!(
        target: "debug_launcher::config",
        path = %config
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        interpreter = ?config.python.interpreter,
        helpers_root = ?config.helpers.root,
        "Launcher configuration loaded"
    );
}
