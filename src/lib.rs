//! formdrop
//!
//! Decode-and-persist core for `multipart/form-data` uploads handed over by a
//! CGI-style gateway. The gateway supplies the content-type header, the
//! declared content length, and the raw body stream; this crate turns that
//! into parsed form fields plus files on disk, with per-item status for
//! everything that went wrong along the way.
//!
//! # Modules
//!
//! - `multipart`: boundary resolution, part splitting, decoding, classification
//! - `store`: filename sanitation and chunked file persistence
//! - `pipeline`: the per-request decode-and-persist pass
//! - `body`: bounded request body acquisition
//!
//! The main binary in main.rs reads the CGI environment contract and prints
//! the resulting batch as JSON.

pub mod body;
pub mod config;
pub mod multipart;
pub mod pipeline;
pub mod store;
pub mod types;

pub use config::{CollisionPolicy, UploadConfig};
pub use pipeline::{run, RequestMeta};
pub use types::{BatchOutcome, FileStatus, FormField, IntakeError, UploadBatch, UploadedFile};
