//! Zone file storage primitives: read, write, modification time.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("write to {0} refused")]
    WriteRefused(String),
}

/// Where the zone file lives
pub trait ConfigStore {
    fn exists(&self) -> bool;
    fn read_text(&self) -> Result<String, StoreError>;
    /// Write the whole file, creating parent directories as needed
    fn write_text(&mut self, text: &str) -> Result<(), StoreError>;
    fn modified(&self) -> Result<SystemTime, StoreError>;
    /// Human-readable location for logs
    fn location(&self) -> String;
}

/// Zone file on disk
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    path: PathBuf,
}

impl FsConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.location(),
            source,
        }
    }
}

impl ConfigStore for FsConfigStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read_text(&self) -> Result<String, StoreError> {
        std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))
    }

    fn write_text(&mut self, text: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }

    fn modified(&self) -> Result<SystemTime, StoreError> {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| self.io_error(e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory zone file with a controllable modification stamp
#[derive(Debug, Clone)]
pub struct MemoryConfigStore {
    text: Option<String>,
    modified: SystemTime,
    writes: usize,
    read_only: bool,
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        Self {
            text: None,
            modified: SystemTime::UNIX_EPOCH,
            writes: 0,
            read_only: false,
        }
    }
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.set_text(text);
        store
    }

    /// Replace the content as an external editor would
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.touch();
    }

    /// Advance the modification stamp without changing content
    pub fn touch(&mut self) {
        self.modified += Duration::from_secs(1);
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Make every write fail
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl ConfigStore for MemoryConfigStore {
    fn exists(&self) -> bool {
        self.text.is_some()
    }

    fn read_text(&self) -> Result<String, StoreError> {
        self.text
            .clone()
            .ok_or_else(|| StoreError::NotFound(self.location()))
    }

    fn write_text(&mut self, text: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::WriteRefused(self.location()));
        }
        self.set_text(text);
        self.writes += 1;
        Ok(())
    }

    fn modified(&self) -> Result<SystemTime, StoreError> {
        if self.text.is_none() {
            return Err(StoreError::NotFound(self.location()));
        }
        Ok(self.modified)
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
