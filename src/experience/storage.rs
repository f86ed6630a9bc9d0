//! Where experience tables live between runs.
//!
//! `ExperienceStorage` is the port; `FileStorage` and `InMemoryStorage` are
//! the adapters. Strategies only see the trait, so tests can swap the file
//! system out.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use parking_lot::Mutex;

use super::store::{ExperienceStore, LoadReport};
use crate::error::{Error, Result};

/// Persistence for one experience table.
pub trait ExperienceStorage: Send {
    /// Merge the persisted table into `store`.
    fn load_into(&self, store: &mut ExperienceStore) -> Result<LoadReport>;

    /// Replace the persisted table with `store`.
    fn save(&self, store: &ExperienceStore) -> Result<()>;

    /// Where the table lives, for logs.
    fn describe(&self) -> String;
}

/// Plain-text file, one record per line.
///
/// A missing file loads as an empty table. Saving truncates.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExperienceStorage for FileStorage {
    fn load_into(&self, store: &mut ExperienceStore) -> Result<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no experience file at {}, starting empty", self.path.display());
                return Ok(LoadReport::default());
            }
            Err(e) => {
                return Err(Error::io(
                    format!("open experience file {}", self.path.display()),
                    e,
                ))
            }
        };
        store.load_from_text(BufReader::new(file))
    }

    fn save(&self, store: &ExperienceStore) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|e| Error::io(format!("create experience file {}", self.path.display()), e))?;
        store.save_to_text(BufWriter::new(file))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Shared in-memory text buffer.
///
/// Clones share the same buffer, so a test can keep one handle and inspect
/// what a strategy saved through another.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    buffer: Arc<Mutex<String>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(contents.into())),
        }
    }

    /// Current text of the buffer.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }
}

impl ExperienceStorage for InMemoryStorage {
    fn load_into(&self, store: &mut ExperienceStore) -> Result<LoadReport> {
        let buffer = self.buffer.lock();
        store.load_from_text(buffer.as_bytes())
    }

    fn save(&self, store: &ExperienceStore) -> Result<()> {
        let mut bytes = Vec::new();
        store.save_to_text(&mut bytes)?;
        *self.buffer.lock() = String::from_utf8_lossy(&bytes).into_owned();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
