//! Reading and writing the [`LookupTable`] as a JSON file.
use super::LookupTable;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LookupFileError {
    #[error("Lookup file '{0}' does not exist")]
    NotFound(PathBuf),
    #[error("Failed to read lookup file '{path}': '{source}'")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Lookup file '{path}' is not a valid lookup table: '{source}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize the lookup table: '{0}'")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to write lookup file '{path}': '{source}'")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The on-disk location of a lookup table.
#[derive(Debug, Clone)]
pub struct LookupFile {
    path: PathBuf,
}

impl LookupFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LookupTable, LookupFileError> {
        let content = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LookupFileError::NotFound(self.path.clone())
            } else {
                LookupFileError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|source| LookupFileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Loads the table, falling back to an empty one when the file is missing or malformed.
    pub fn load_or_default(&self) -> LookupTable {
        match self.load() {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(error = %err, "starting from an empty lookup table");
                LookupTable::default()
            }
        }
    }

    /// Overwrites the file with the whole table.
    pub fn save(&self, table: &LookupTable) -> Result<(), LookupFileError> {
        let content = serde_json::to_string_pretty(table).map_err(LookupFileError::Serialize)?;

        let write = |source| LookupFileError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write)?;
        }

        fs::write(&self.path, content).map_err(write)?;

        tracing::info!(path = %self.path.display(), locations = table.len(), "lookup table written");
        Ok(())
    }
}
