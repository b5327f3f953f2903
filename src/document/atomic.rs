use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{KnowledgeError, Result};

/// Hex SHA-256 of a byte string
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Hex SHA-256 of a file content
pub fn hash_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| KnowledgeError::io(path, e))?;
    Ok(hash_bytes(&bytes))
}

/// Replace a file through a temporary sibling.
///
/// The new content is written next to the target and renamed over it on
/// [`commit`](AtomicUpdate::commit), provided the target still has the
/// hash it had when its content was read. Otherwise the temporary file is
/// kept and the update fails.
pub struct AtomicUpdate {
    target: PathBuf,
    expected_hash: String,
    temp: NamedTempFile,
}

impl AtomicUpdate {
    /// Prepare an update of `target`, whose content was read with hash `expected_hash`
    pub fn new(target: impl Into<PathBuf>, expected_hash: impl Into<String>) -> Result<Self> {
        let target = target.into();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = NamedTempFile::new_in(&dir).map_err(|e| KnowledgeError::io(&dir, e))?;
        Ok(Self {
            target,
            expected_hash: expected_hash.into(),
            temp,
        })
    }

    /// Prepare an update of `target` against its current content
    pub fn open(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let hash = hash_file(&target)?;
        Self::new(target, hash)
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.temp
            .write_all(bytes)
            .map_err(|e| KnowledgeError::io(self.temp.path(), e))
    }

    /// Move the new content over the target
    pub fn commit(mut self) -> Result<()> {
        self.temp
            .flush()
            .map_err(|e| KnowledgeError::io(self.temp.path(), e))?;

        let current = hash_file(&self.target)?;
        if current != self.expected_hash {
            tracing::warn!(
                "⚠️ {} changed on disk ({} ≠ {})",
                self.target.display(),
                current,
                self.expected_hash
            );
            let (_, temp_path) = self
                .temp
                .keep()
                .map_err(|e| KnowledgeError::io(&self.target, e.error))?;
            return Err(KnowledgeError::ConcurrentModification {
                path: self.target,
                temp_path,
            });
        }

        self.temp
            .persist(&self.target)
            .map_err(|e| KnowledgeError::io(&self.target, e.error))?;
        tracing::debug!("💾 Updated {}", self.target.display());
        Ok(())
    }
}
