//! File persistence
//!
//! Streams decoded upload content into the target directory:
//! - Bounded-size chunked writes, byte counts returned to the caller
//! - Collision handling per the configured policy
//! - Per-file failures stay per-file; they never abort the batch
//!
//! The backend is a trait so the write path stays swappable; the local
//! filesystem implementation is the only one the gateway deployment needs.

pub mod sanitize;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{CollisionPolicy, UploadConfig};

/// Attempts at finding a free disambiguated name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 16;

// ============================================================================
// Store Trait
// ============================================================================

/// Persistence failure for a single file. Recorded against that file in the
/// batch; never fatal on its own.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No free name for {name} after {attempts} attempts")]
    Exhausted { name: String, attempts: u32 },
}

/// A successfully persisted file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Name the file was stored under (token-prefixed when disambiguating)
    pub stored_name: String,

    /// Final on-disk path
    pub path: PathBuf,

    /// Total bytes written
    pub bytes_written: u64,
}

/// Storage backend for decoded upload content.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Write `content` under the sanitized `name`, applying the collision
    /// policy, and return the final path and byte count.
    async fn save(&self, name: &str, content: &[u8]) -> Result<StoredFile, StoreError>;
}

// ============================================================================
// Local Filesystem Store
// ============================================================================

/// Local filesystem store writing into one target directory.
pub struct LocalFileStore {
    root: PathBuf,
    chunk_size: usize,
    on_collision: CollisionPolicy,
}

impl LocalFileStore {
    /// Open the store, creating the target directory if missing. Failure here
    /// is a configuration problem and fatal to the whole batch.
    pub async fn open(config: &UploadConfig) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: config.upload_dir.clone(),
                source,
            })?;

        Ok(Self {
            root: config.upload_dir.clone(),
            chunk_size: config.write_chunk_size.max(1),
            on_collision: config.on_collision,
        })
    }

    async fn write_chunked(
        &self,
        path: &Path,
        content: &[u8],
        create_new: bool,
    ) -> std::io::Result<u64> {
        use tokio::io::AsyncWriteExt;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true);
        if create_new {
            options.create_new(true);
        } else {
            options.create(true).truncate(true);
        }
        let mut file = options.open(path).await?;

        let mut written = 0u64;
        for chunk in content.chunks(self.chunk_size) {
            file.write_all(chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

#[async_trait::async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, name: &str, content: &[u8]) -> Result<StoredFile, StoreError> {
        match self.on_collision {
            CollisionPolicy::Overwrite => {
                let path = self.root.join(name);
                match self.write_chunked(&path, content, false).await {
                    Ok(bytes_written) => Ok(StoredFile {
                        stored_name: name.to_string(),
                        path,
                        bytes_written,
                    }),
                    Err(source) => {
                        // Don't leave a half-written file behind.
                        let _ = tokio::fs::remove_file(&path).await;
                        Err(StoreError::Write { path, source })
                    }
                }
            }
            CollisionPolicy::Disambiguate => {
                // create_new keeps concurrent writers off the same path; a
                // taken name just means another token gets drawn.
                for _ in 0..MAX_NAME_ATTEMPTS {
                    let stored_name = sanitize::disambiguated(name);
                    let path = self.root.join(&stored_name);
                    match self.write_chunked(&path, content, true).await {
                        Ok(bytes_written) => {
                            return Ok(StoredFile {
                                stored_name,
                                path,
                                bytes_written,
                            })
                        }
                        Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                        Err(source) => {
                            let _ = tokio::fs::remove_file(&path).await;
                            return Err(StoreError::Write { path, source });
                        }
                    }
                }
                Err(StoreError::Exhausted {
                    name: name.to_string(),
                    attempts: MAX_NAME_ATTEMPTS,
                })
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, on_collision: CollisionPolicy) -> UploadConfig {
        UploadConfig {
            upload_dir: dir.path().join("incoming"),
            write_chunk_size: 8,
            on_collision,
            ..UploadConfig::default()
        }
    }

    #[tokio::test]
    async fn test_open_creates_target_directory() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, CollisionPolicy::Disambiguate);

        assert!(!config.upload_dir.exists());
        LocalFileStore::open(&config).await.unwrap();
        assert!(config.upload_dir.is_dir());
    }

    #[tokio::test]
    async fn test_open_fails_when_directory_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        // A file where the directory should go.
        let blocker = dir.path().join("incoming");
        std::fs::write(&blocker, b"in the way").unwrap();

        let config = UploadConfig {
            upload_dir: blocker,
            ..UploadConfig::default()
        };
        let result = LocalFileStore::open(&config).await;
        assert!(matches!(result, Err(StoreError::CreateDir { .. })));
    }

    #[tokio::test]
    async fn test_save_counts_bytes_across_chunks() {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::open(&config_for(&dir, CollisionPolicy::Overwrite))
            .await
            .unwrap();

        // 21 bytes through 8-byte chunks: three writes.
        let content = b"three chunks of bytes";
        let stored = store.save("data.bin", content).await.unwrap();

        assert_eq!(stored.bytes_written, content.len() as u64);
        assert_eq!(std::fs::read(&stored.path).unwrap(), content);
    }

    #[tokio::test]
    async fn test_save_empty_content() {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::open(&config_for(&dir, CollisionPolicy::Overwrite))
            .await
            .unwrap();

        let stored = store.save("empty.txt", b"").await.unwrap();
        assert_eq!(stored.bytes_written, 0);
        assert_eq!(std::fs::metadata(&stored.path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_disambiguate_gives_repeated_uploads_distinct_paths() {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::open(&config_for(&dir, CollisionPolicy::Disambiguate))
            .await
            .unwrap();

        let first = store.save("a.txt", b"one").await.unwrap();
        let second = store.save("a.txt", b"two").await.unwrap();

        assert_ne!(first.path, second.path);
        assert!(first.stored_name.ends_with("_a.txt"));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"one");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_overwrite_reuses_the_same_path() {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::open(&config_for(&dir, CollisionPolicy::Overwrite))
            .await
            .unwrap();

        let first = store.save("a.txt", b"first contents").await.unwrap();
        let second = store.save("a.txt", b"second").await.unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(std::fs::read(&second.path).unwrap(), b"second");
    }
}
