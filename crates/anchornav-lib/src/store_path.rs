use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the waypoint store.
const STORE_FILENAME: &str = "waypoints.db";

/// Environment variable overriding the store location.
pub const STORE_ENV_VAR: &str = "ANCHORNAV_STORE";

/// Resolve the default store location using platform-specific project directories.
pub fn default_store_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "anchornav", "anchornav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(STORE_FILENAME))
}

/// Resolve where the waypoint store lives.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `ANCHORNAV_STORE` environment variable.
/// 3. Platform-specific project data directory.
///
/// A target without a file extension is treated as a directory and gets the
/// default filename appended.
pub fn resolve_store_path(target: Option<&Path>) -> Result<PathBuf> {
    let resolved = if let Some(explicit) = target {
        canonical_store_path(explicit)
    } else if let Some(env_path) = env::var_os(STORE_ENV_VAR) {
        canonical_store_path(Path::new(&env_path))
    } else {
        default_store_path()?
    };
    debug!(path = %resolved.display(), "resolved waypoint store path");
    Ok(resolved)
}

fn canonical_store_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }
    path.join(STORE_FILENAME)
}
