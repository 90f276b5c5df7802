//! Request body acquisition
//!
//! Pulls the exact request body off the gateway's stream before any decoding
//! starts. A declared content length is binding: delivering fewer bytes is a
//! fatal truncation, and the decode must not proceed on a partial body.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::types::IntakeError;

/// Read a request body of declared length, or to end-of-stream when no length
/// is declared. Either way the configured cap bounds how much memory one
/// request can claim.
pub async fn read_body<R>(
    mut reader: R,
    declared_len: Option<u64>,
    max_len: u64,
) -> Result<Vec<u8>, IntakeError>
where
    R: AsyncRead + Unpin,
{
    match declared_len {
        Some(expected) => {
            if expected > max_len {
                return Err(IntakeError::BodyTooLarge { limit: max_len });
            }
            let capacity = usize::try_from(expected)
                .map_err(|_| IntakeError::BodyTooLarge { limit: max_len })?;

            let mut body = vec![0u8; capacity];
            let mut received = 0usize;
            while received < body.len() {
                let n = reader
                    .read(&mut body[received..])
                    .await
                    .map_err(|e| IntakeError::BodyRead(e.to_string()))?;
                if n == 0 {
                    return Err(IntakeError::TruncatedBody {
                        expected,
                        received: received as u64,
                    });
                }
                received += n;
            }
            Ok(body)
        }
        None => {
            // One extra byte so exceeding the cap is observable.
            let mut body = Vec::new();
            let mut bounded = reader.take(max_len.saturating_add(1));
            bounded
                .read_to_end(&mut body)
                .await
                .map_err(|e| IntakeError::BodyRead(e.to_string()))?;
            if body.len() as u64 > max_len {
                return Err(IntakeError::BodyTooLarge { limit: max_len });
            }
            Ok(body)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
