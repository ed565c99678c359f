//! Highscore persistence.
//!
//! The store only moves whole lists: `load` returns every record, `save`
//! overwrites the previous contents wholesale.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::record::HighscoreRecord;

/// File name used inside the data directory
const HIGHSCORE_FILE_NAME: &str = "highscores.json";

/// On-disk format version
const FORMAT_VERSION: u32 = 1;

/// Persistence collaborator for the ranked highscore list.
pub trait HighscoreStore {
    fn load(&self) -> Result<Vec<HighscoreRecord>>;
    fn save(&self, records: &[HighscoreRecord]) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct HighscoreFile {
    version: u32,
    records: Vec<HighscoreRecord>,
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the user's data directory, or the working directory when
    /// the platform has none.
    pub fn default_location() -> Self {
        let path = match dirs::data_dir() {
            Some(dir) => dir.join("stackfall").join(HIGHSCORE_FILE_NAME),
            None => PathBuf::from(HIGHSCORE_FILE_NAME),
        };
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreStore for JsonFileStore {
    /// A missing file is an empty list, not an error.
    fn load(&self) -> Result<Vec<HighscoreRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading highscores from {}", self.path.display()))?;
        let file: HighscoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing highscores in {}", self.path.display()))?;
        if file.version != FORMAT_VERSION {
            bail!(
                "unsupported highscore format version {} in {}",
                file.version,
                self.path.display()
            );
        }
        Ok(file.records)
    }

    fn save(&self, records: &[HighscoreRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let file = HighscoreFile {
            version: FORMAT_VERSION,
            records: records.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing highscores to {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store; clones share the same backing list.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<Vec<HighscoreRecord>>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HighscoreRecord>) -> Self {
        Self {
            records: Rc::new(RefCell::new(records)),
            failing: false,
        }
    }

    /// A store whose every load and save fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<HighscoreRecord> {
        self.records.borrow().clone()
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<HighscoreRecord>> {
        if self.failing {
            bail!("memory store is unavailable");
        }
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[HighscoreRecord]) -> Result<()> {
        if self.failing {
            bail!("memory store is unavailable");
        }
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}
