//! multipart/form-data decoding
//!
//! Turns a raw request body into classified parts:
//! 1. Resolve the boundary token from the content-type header
//! 2. Split the body on boundary occurrences into raw parts
//! 3. Separate each part's header block from its content
//! 4. Classify parts as file fields or plain text fields
//!
//! Everything here is per-request and stateless; malformed parts are dropped
//! individually instead of failing the whole decode.

pub mod boundary;
pub mod disposition;
pub mod part;
pub mod splitter;

pub use boundary::{resolve_boundary, Boundary};
pub use disposition::{classify, Disposition, PartKind};
pub use part::{decode_part, DecodedPart, HeaderMap};
pub use splitter::split_parts;
