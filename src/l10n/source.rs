// src/l10n/source.rs  —  Resource loaders (filesystem + in-memory)
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use super::error::{L10nError, Result};

/// Supplies raw table text for a resource identifier
pub trait ResourceLoader {
    fn load(&self, id: &str) -> Result<String>;
}

/// Reads `root/id`, falling back to `root/id.csv` so ids may omit the extension.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    fn candidates(&self, id: &str) -> [PathBuf; 2] {
        let exact = self.root.join(id);
        let with_ext = self.root.join(format!("{id}.csv"));
        [exact, with_ext]
    }
}

impl ResourceLoader for FileLoader {
    fn load(&self, id: &str) -> Result<String> {
        let mut last_err = String::from("not found");
        for path in self.candidates(id) {
            if !path.is_file() { continue; }
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!("[source] read {} bytes from {}", text.len(), path.display());
                    return Ok(text);
                }
                Err(e) => last_err = format!("{}: {e}", path.display()),
            }
        }
        Err(L10nError::ResourceUnavailable { id: id.to_string(), reason: last_err })
    }
}

/// Fixed id → text map; useful for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader(HashMap<String, String>);

impl MemoryLoader {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.0.insert(id.into(), text.into());
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, id: &str) -> Result<String> {
        self.0.get(id).cloned().ok_or_else(|| L10nError::ResourceUnavailable {
            id:     id.to_string(),
            reason: "not found".into(),
        })
    }
}
