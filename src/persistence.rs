use std::cell::Cell;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::StoreError;
use crate::services::HiScoreStore;

/// Hi-score kept as a single integer in a text file
#[derive(Debug, Clone)]
pub struct FileHiScoreStore {
    path: PathBuf,
}

impl FileHiScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no hi-score file at {}", self.path.display());
                return Ok(0);
            }
            Err(err) => return Err(err.into()),
        };
        let trimmed = text.trim();
        trimmed
            .parse()
            .map_err(|_| StoreError::Parse(trimmed.to_string()))
    }

    fn write(&self, hi_score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, format!("{}\n", hi_score))?;
        Ok(())
    }
}

impl HiScoreStore for FileHiScoreStore {
    fn load_hi_score(&mut self) -> u32 {
        self.read().unwrap_or_else(|err| {
            warn!("hi-score reset to 0: {}", err);
            0
        })
    }

    fn save_hi_score(&mut self, hi_score: u32) {
        if let Err(err) = self.write(hi_score) {
            warn!("hi-score {} not saved: {}", hi_score, err);
        }
    }
}

/// In-memory store; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryHiScoreStore {
    value: Rc<Cell<u32>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryHiScoreStore {
    pub fn with_value(hi_score: u32) -> Self {
        let store = Self::default();
        store.value.set(hi_score);
        store
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Number of `save_hi_score` calls so far
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl HiScoreStore for MemoryHiScoreStore {
    fn load_hi_score(&mut self) -> u32 {
        self.value.get()
    }

    fn save_hi_score(&mut self, hi_score: u32) {
        self.value.set(hi_score);
        self.saves.set(self.saves.get() + 1);
    }
}
