use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::ContentStore;
use crate::error::{FaqdeskError, Result};

/// Documents stored as plain files under a root directory. Keys are
/// relative paths, e.g. `faq/what-is-smsf.md`.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(FaqdeskError::Config(format!(
                "store root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }
}

#[async_trait]
impl ContentStore for FsStore {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        let relative = Path::new(key);
        // Keys must stay inside the root.
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        if escapes {
            return Err(FaqdeskError::StoreRead {
                key: key.to_string(),
                reason: "key escapes the store root".to_string(),
            });
        }

        match tokio::fs::read(self.root.join(relative)).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FaqdeskError::DocumentNotFound(key.to_string()))
            }
            Err(err) => Err(FaqdeskError::StoreRead {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
