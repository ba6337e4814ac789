use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const APP_NAME: &str = "sumsprint";
pub const LOG_FILE_NAME: &str = "sumsprint.log";

/// Default location of the session log.
///
/// `$XDG_STATE_HOME/sumsprint` wins, then `~/.local/state/sumsprint`, then
/// the platform's local data directory.
pub fn default_log_path() -> Option<PathBuf> {
    let fallback = || ProjectDirs::from("", "", APP_NAME).map(|dirs| platform_state_dir(&dirs));
    resolve_log_path(env_path("XDG_STATE_HOME"), env_path("HOME"), fallback)
}

fn resolve_log_path(
    xdg_state: Option<PathBuf>,
    home: Option<PathBuf>,
    fallback: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    let state_dir = xdg_state
        .or_else(|| home.map(|home| home.join(".local").join("state")))
        .map(|dir| dir.join(APP_NAME))
        .or_else(fallback)?;
    Some(state_dir.join(LOG_FILE_NAME))
}

fn platform_state_dir(dirs: &ProjectDirs) -> PathBuf {
    dirs.state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf()
}

/// Unset, empty and relative values are all ignored
fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .map(PathBuf::from)
        .filter(|path| is_usable(path))
}

fn is_usable(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}
