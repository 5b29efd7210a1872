use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;

pub const APP_NAME: &str = "Quests";

const DATA_FILE: &str = "quests.json";
const LOCK_FILE: &str = "app.lock";
const LOG_FILE: &str = "app.log";

/// Name of the data file older versions wrote to the working directory.
const LEGACY_FILE: &str = "quests.json";

/// Every on-disk location the app touches, resolved once at startup and
/// passed explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub data_file: PathBuf,
    pub lock_file: PathBuf,
    pub log_file: PathBuf,
    pub legacy_file: PathBuf,
}

impl AppPaths {
    /// Resolve under the platform's per-user data directory.
    pub fn resolve() -> Result<Self> {
        let data_dir = match ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            // Fall back to the working directory if no home is available
            None => PathBuf::from(".").join(APP_NAME.to_lowercase()),
        };
        Self::in_dir(&data_dir)
    }

    /// Anchor everything in the given directory, creating it if needed.
    /// The legacy file stays in the process working directory regardless.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            data_file: data_dir.join(DATA_FILE),
            lock_file: data_dir.join(LOCK_FILE),
            log_file: data_dir.join(LOG_FILE),
            legacy_file: PathBuf::from(LEGACY_FILE),
        })
    }
}
