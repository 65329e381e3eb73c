mod fs;
mod http;

pub use fs::FsStore;
pub use http::HttpStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{FaqdeskError, Result};

/// Read-only document access by storage key.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetches the raw bytes of the document at `key`.
    ///
    /// Fails with [`FaqdeskError::DocumentNotFound`] when nothing exists at
    /// `key`, or [`FaqdeskError::StoreRead`] for any other access failure.
    async fn fetch(&self, key: &str) -> Result<Vec<u8>>;
}

/// Builds a store from a configured address.
///
/// `http://` and `https://` addresses select [`HttpStore`]; anything else
/// is treated as a filesystem root for [`FsStore`]. An unset address is a
/// configuration error, fatal at startup.
pub fn from_address(address: &str) -> Result<Arc<dyn ContentStore>> {
    let address = address.trim();
    if address.is_empty() {
        return Err(FaqdeskError::Config("store address is empty".to_string()));
    }
    if address.starts_with("http://") || address.starts_with("https://") {
        Ok(Arc::new(HttpStore::new(address)?))
    } else {
        Ok(Arc::new(FsStore::open(address)?))
    }
}

#[cfg(test)]
mod tests;
