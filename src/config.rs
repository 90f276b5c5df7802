//! Configuration management

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default target directory when `UPLOAD_DIR` is not set
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default request body cap: 50MB
pub const DEFAULT_MAX_BODY_SIZE: u64 = 50 * 1024 * 1024;

/// Default persister write chunk: 64KB
pub const DEFAULT_WRITE_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are written into, created if missing
    pub upload_dir: PathBuf,

    /// Hard cap on the request body, declared or streamed
    pub max_body_size: u64,

    /// Size of each write when streaming content to disk
    pub write_chunk_size: usize,

    /// What to do when a stored name already exists
    pub on_collision: CollisionPolicy,
}

/// Collision policy for stored filenames. Applied uniformly to the whole
/// batch; concurrent requests writing into the same directory rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Prefix stored names with a random token and create-new the file,
    /// so no two upload attempts ever share a path
    Disambiguate,

    /// Persist under the sanitized name verbatim; last writer wins
    Overwrite,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            write_chunk_size: DEFAULT_WRITE_CHUNK_SIZE,
            on_collision: CollisionPolicy::Disambiguate,
        }
    }
}

impl UploadConfig {
    pub fn from_env() -> Self {
        UploadConfig {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),
            write_chunk_size: env::var("WRITE_CHUNK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_WRITE_CHUNK_SIZE),
            on_collision: match env::var("ON_COLLISION").unwrap_or_default().as_str() {
                "overwrite" => CollisionPolicy::Overwrite,
                _ => CollisionPolicy::Disambiguate,
            },
        }
    }
}
