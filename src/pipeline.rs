//! The per-request decode-and-persist pass
//!
//! One pass per request: resolve the boundary, read the body, split and
//! decode parts, classify them, sanitize and persist file fields, aggregate
//! everything into an [`UploadBatch`]. Only a missing upload directory or an
//! unreadable body aborts the pass; every other failure is recorded against
//! the item it belongs to and decoding continues.

use chrono::Utc;
use tokio::io::AsyncRead;

use crate::body;
use crate::config::UploadConfig;
use crate::multipart::boundary::{self, Boundary};
use crate::multipart::disposition::{self, PartKind};
use crate::multipart::{part, splitter};
use crate::store::{sanitize, FileStore, LocalFileStore};
use crate::types::{BatchOutcome, FileStatus, FormField, IntakeError, UploadBatch, UploadedFile};

/// Request metadata handed over by the gateway.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    /// Content-Type header value, if the request carried one
    pub content_type: Option<String>,

    /// Declared content length, if the request carried one
    pub content_length: Option<u64>,
}

impl RequestMeta {
    /// Read the gateway contract from CGI environment variables.
    pub fn from_env() -> Self {
        Self {
            content_type: std::env::var("CONTENT_TYPE").ok(),
            content_length: std::env::var("CONTENT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

/// Run one decode-and-persist pass over a request body.
///
/// Returns `Err` only for the fatal conditions (unusable upload directory,
/// truncated or oversized body); a request without multipart data comes back
/// as an empty batch with [`BatchOutcome::NoMultipartData`].
pub async fn run<R>(
    config: &UploadConfig,
    meta: &RequestMeta,
    body_reader: R,
) -> Result<UploadBatch, IntakeError>
where
    R: AsyncRead + Unpin,
{
    let Some(boundary) = meta
        .content_type
        .as_deref()
        .and_then(boundary::resolve_boundary)
    else {
        tracing::debug!(
            content_type = meta.content_type.as_deref().unwrap_or("<none>"),
            "No multipart boundary in content type"
        );
        return Ok(UploadBatch::no_multipart_data());
    };

    let body = body::read_body(body_reader, meta.content_length, config.max_body_size).await?;

    let store = LocalFileStore::open(config)
        .await
        .map_err(|err| IntakeError::Configuration {
            path: config.upload_dir.clone(),
            message: err.to_string(),
        })?;

    decode_and_store(&boundary, &body, &store).await
}

/// Decode a fully-read body and persist its file fields through `store`.
pub async fn decode_and_store(
    boundary: &Boundary,
    body: &[u8],
    store: &dyn FileStore,
) -> Result<UploadBatch, IntakeError> {
    let mut fields = Vec::new();
    let mut files = Vec::new();
    let mut usable_parts = 0usize;

    for raw in splitter::split_parts(body, boundary) {
        let Some(decoded) = part::decode_part(raw) else {
            tracing::debug!(len = raw.len(), "Dropping part without header separator");
            continue;
        };

        match disposition::classify(&decoded.headers) {
            PartKind::Malformed => {
                tracing::debug!("Dropping part without a disposition name");
            }
            PartKind::Field { name } => {
                usable_parts += 1;
                fields.push(FormField {
                    name,
                    value: String::from_utf8_lossy(decoded.content).into_owned(),
                });
            }
            PartKind::File {
                field_name,
                filename,
            } => {
                usable_parts += 1;
                if filename.is_empty() {
                    // Submitted with no file selected.
                    tracing::debug!(field = %field_name, "Skipping file field with empty filename");
                    continue;
                }
                files.push(persist_file(store, field_name, filename, decoded.content).await);
            }
        }
    }

    if usable_parts == 0 {
        tracing::debug!("Body yielded no usable multipart parts");
        return Ok(UploadBatch::no_multipart_data());
    }

    let outcome = if files.iter().any(UploadedFile::is_saved) {
        BatchOutcome::AnySaved
    } else {
        BatchOutcome::NoneSaved
    };

    let batch = UploadBatch {
        fields,
        files,
        outcome,
    };
    tracing::info!(
        fields = batch.fields.len(),
        files = batch.files.len(),
        saved = batch.saved_count(),
        "Decode pass complete"
    );

    Ok(batch)
}

async fn persist_file(
    store: &dyn FileStore,
    field_name: String,
    filename: String,
    content: &[u8],
) -> UploadedFile {
    let Some(sanitized) = sanitize::sanitize_filename(&filename) else {
        tracing::warn!(field = %field_name, filename = %filename, "Rejected filename");
        return UploadedFile {
            field_name,
            original_filename: filename,
            sanitized_filename: None,
            byte_size: content.len() as u64,
            storage_path: None,
            status: FileStatus::RejectedName,
            stored_at: None,
        };
    };

    match store.save(&sanitized, content).await {
        Ok(stored) => {
            tracing::info!(
                field = %field_name,
                path = %stored.path.display(),
                bytes = stored.bytes_written,
                "Saved upload"
            );
            UploadedFile {
                field_name,
                original_filename: filename,
                sanitized_filename: Some(sanitized),
                byte_size: stored.bytes_written,
                storage_path: Some(stored.path),
                status: FileStatus::Saved,
                stored_at: Some(Utc::now()),
            }
        }
        Err(err) => {
            tracing::warn!(field = %field_name, error = %err, "Failed to persist upload");
            UploadedFile {
                field_name,
                original_filename: filename,
                sanitized_filename: Some(sanitized),
                byte_size: content.len() as u64,
                storage_path: None,
                status: FileStatus::IoError {
                    message: err.to_string(),
                },
                stored_at: None,
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
