//! Batch result types for one decode-and-persist pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Field and File Types
// ============================================================================

/// A plain text form field decoded from one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Field name from the part's disposition
    pub name: String,

    /// Content decoded as UTF-8 text
    pub value: String,
}

/// Persistence outcome for one file field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileStatus {
    /// A file exists at `storage_path` with exactly `byte_size` bytes
    Saved,

    /// The claimed filename failed the sanitizer policy; nothing was written
    RejectedName,

    /// The write failed; the underlying condition is recorded
    IoError { message: String },
}

/// One file field from the request, with its persistence outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Field name from the part's disposition
    pub field_name: String,

    /// Filename exactly as claimed by the client
    pub original_filename: String,

    /// Filename after sanitation, if it passed
    pub sanitized_filename: Option<String>,

    /// Bytes written for `Saved`, decoded content length otherwise
    pub byte_size: u64,

    /// Final on-disk path for `Saved`
    pub storage_path: Option<PathBuf>,

    /// Persistence outcome
    pub status: FileStatus,

    /// When the file hit the disk
    pub stored_at: Option<DateTime<Utc>>,
}

impl UploadedFile {
    /// True when this file reached the disk intact
    pub fn is_saved(&self) -> bool {
        matches!(self.status, FileStatus::Saved)
    }
}

// ============================================================================
// Batch Types
// ============================================================================

/// Aggregate outcome of the whole pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    /// At least one file was saved
    AnySaved,

    /// Parts were found but no file reached `Saved`
    NoneSaved,

    /// No boundary, no usable parts, or a non-multipart content type
    NoMultipartData,
}

/// Everything one request produced: ordered fields, ordered files, outcome.
///
/// Constructed once per request and immutable afterwards; the gateway-facing
/// layer is the sole consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadBatch {
    pub fields: Vec<FormField>,
    pub files: Vec<UploadedFile>,
    pub outcome: BatchOutcome,
}

impl UploadBatch {
    /// The empty batch for requests carrying no multipart data
    pub fn no_multipart_data() -> Self {
        Self {
            fields: Vec::new(),
            files: Vec::new(),
            outcome: BatchOutcome::NoMultipartData,
        }
    }

    /// Number of files that reached the disk
    pub fn saved_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_saved()).count()
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Fatal decode errors. Anything here aborts the batch with nothing persisted;
/// all other failure modes are recorded per item inside [`UploadBatch`].
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Upload directory unavailable: {path}: {message}")]
    Configuration { path: PathBuf, message: String },

    #[error("Request body truncated: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: u64, received: u64 },

    #[error("Request body too large (limit: {limit} bytes)")]
    BodyTooLarge { limit: u64 },

    #[error("Failed to read request body: {0}")]
    BodyRead(String),
}
