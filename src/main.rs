//! formdrop CGI entry point
//!
//! Reads the gateway contract the way the upload scripts it replaces did:
//! `CONTENT_TYPE` and `CONTENT_LENGTH` from the environment, the request body
//! from stdin, the target directory from `UPLOAD_DIR`. Prints the decoded
//! batch as JSON on stdout; logs go to stderr so stdout stays machine-readable.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formdrop::{pipeline, RequestMeta, UploadConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formdrop=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = UploadConfig::from_env();

    tracing::info!("Starting formdrop v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        max_body_size = config.max_body_size,
        on_collision = ?config.on_collision,
        "Configuration loaded"
    );

    let meta = RequestMeta::from_env();
    let batch = pipeline::run(&config, &meta, tokio::io::stdin())
        .await
        .context("decode pass failed")?;

    let report = serde_json::to_string_pretty(&batch).context("failed to serialize batch")?;
    println!("{report}");

    Ok(())
}
