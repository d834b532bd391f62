use std::path::{Path, PathBuf};

use axum::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// `NotFound` is recoverable: the index and the store can drift, and the
/// caller decides whether a missing file matters.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no stored object for key {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write `body` durably under a freshly generated key and return it.
    async fn put(&self, original_name: &str, body: Bytes) -> Result<String, StorageError>;
    /// Delete the object behind `key`.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Flat-directory store for uploaded files, served back verbatim under
/// `/uploads/{key}`.
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }
}

/// Millisecond timestamp plus a random component, with a sanitized copy of
/// the original name kept as a human-traceable suffix.
fn generate_key(original_name: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!(
        "{}-{:08x}-{}",
        millis,
        rand::random::<u32>(),
        sanitize_name(original_name)
    )
}

/// Strip the name down to a single safe path component. The original name
/// is display data; it must never steer where bytes land.
fn sanitize_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(120)
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl AssetStore for DiskStorage {
    async fn put(&self, original_name: &str, body: Bytes) -> Result<String, StorageError> {
        // create_new closes the residual collision window left after the
        // timestamp + random prefix.
        for _ in 0..3 {
            let key = generate_key(original_name);
            let path = self.root.join(&key);
            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(&body).await?;
            file.sync_all().await?;
            debug!(key = %key, bytes = body.len(), "stored object");
            return Ok(key);
        }
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "could not generate a free storage key",
        )))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.root.join(key)).await {
            Ok(()) => {
                debug!(key = %key, "removed object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
