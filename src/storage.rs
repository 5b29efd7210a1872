use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::quest::Quest;

/// The whole persisted document: player totals, settings and the quest list
/// in one JSON object. Every key defaults so a partial document still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

/// Reads and writes the canonical data file, migrating the legacy
/// working-directory file on first run.
#[derive(Debug, Clone)]
pub struct Storage {
    data_file: PathBuf,
    legacy_file: PathBuf,
}

impl Storage {
    pub fn new(data_file: PathBuf, legacy_file: PathBuf) -> Self {
        Self {
            data_file,
            legacy_file,
        }
    }

    /// Load the persisted state. A missing file yields defaults; a file that
    /// exists but cannot be read or parsed is a fatal error for the caller.
    pub fn load(&self) -> Result<SaveData> {
        if !self.data_file.exists() && self.legacy_file.exists() {
            match fs::copy(&self.legacy_file, &self.data_file) {
                Ok(_) => info!(
                    "Dados antigos migrados de {}",
                    self.legacy_file.display()
                ),
                Err(e) => warn!("Falha ao migrar dados antigos: {e}"),
            }
        }

        if !self.data_file.exists() {
            return Ok(SaveData::default());
        }

        let raw = fs::read_to_string(&self.data_file)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the document pretty-printed. The file is overwritten in place,
    /// not renamed into position; a crash mid-write can lose it.
    pub fn save(&self, data: &SaveData) -> Result<()> {
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(&self.data_file, raw)?;
        Ok(())
    }
}
