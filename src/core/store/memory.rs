//! In-memory output store for testing.

use super::OutputStore;
use crate::core::raster::Raster;
use crate::error::WriteError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// A stored output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Image(Raster),
    Text(String),
}

/// In-memory output store
///
/// Useful for testing and for callers that only want the rendered data.
pub struct InMemoryStore {
    artifacts: RwLock<BTreeMap<String, Artifact>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            artifacts: RwLock::new(BTreeMap::new()),
        }
    }

    /// Look up a stored image by name
    pub fn image(&self, name: &str) -> Option<Raster> {
        match self.artifacts.read().ok()?.get(name)? {
            Artifact::Image(raster) => Some(raster.clone()),
            Artifact::Text(_) => None,
        }
    }

    /// Look up a stored text document by name
    pub fn text(&self, name: &str) -> Option<String> {
        match self.artifacts.read().ok()?.get(name)? {
            Artifact::Text(text) => Some(text.clone()),
            Artifact::Image(_) => None,
        }
    }

    /// Names of everything stored, sorted
    pub fn names(&self) -> Vec<String> {
        self.artifacts
            .read()
            .map(|artifacts| artifacts.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    fn insert(&self, name: &str, artifact: Artifact) -> Result<PathBuf, WriteError> {
        let mut artifacts = self.artifacts.write().map_err(|_| WriteError::Encode {
            path: PathBuf::from("memory"),
            reason: "in-memory store lock poisoned".to_string(),
        })?;

        artifacts.insert(name.to_string(), artifact);
        Ok(PathBuf::from(name))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStore for InMemoryStore {
    fn write_image(&self, name: &str, image: &Raster) -> Result<PathBuf, WriteError> {
        self.insert(name, Artifact::Image(image.clone()))
    }

    fn write_text(&self, name: &str, contents: &str) -> Result<PathBuf, WriteError> {
        self.insert(name, Artifact::Text(contents.to_string()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
