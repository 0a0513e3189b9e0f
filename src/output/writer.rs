//! Collision-avoiding JSON artifact writer

use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShopError};

/// Writes extraction artifacts as JSON files under a fixed directory
///
/// With `overwrite` off, an existing target is left alone and the new file
/// gets an increasing numeric suffix instead (`name_1.json`, `name_2.json`,
/// and so on until a free path is found).
pub struct ArtifactWriter {
    dir: PathBuf,
    overwrite: bool,
}

impl ArtifactWriter {
    /// Create a writer rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    /// The artifact directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize a value as JSON text and write it under the logical name
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T, name: &str) -> Result<PathBuf> {
        let text = serde_json::to_string(value)
            .map_err(|e| ShopError::Write(format!("could not serialize '{}': {}", name, e)))?;
        self.write_raw(&text, name)
    }

    /// Write a string as-is under the logical name (assumed ready to write)
    pub fn write_raw(&self, contents: &str, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.resolve_target(name);
        fs::write(&target, contents)?;
        debug!("Wrote artifact {}", target.display());
        Ok(target)
    }

    /// Resolve the target path for a logical name, avoiding collisions
    fn resolve_target(&self, name: &str) -> PathBuf {
        let target = self.dir.join(format!("{}.json", name));
        if self.overwrite || !target.exists() {
            return target;
        }
        let mut suffix = 1u32;
        loop {
            let candidate = self.dir.join(format!("{}_{}.json", name, suffix));
            if !candidate.exists() {
                return candidate;
            }
            suffix += 1;
        }
    }
}
