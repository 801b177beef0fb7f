//! Discovery layer: directory traversal and text detection.
//!
//! - Deterministic, filtered directory traversal
//! - Content-based text/binary detection

pub mod text_detection;
pub mod walker;

pub use text_detection::{decode_text, looks_binary};
pub use walker::{DirectoryWalker, EntryKind, ProjectEntry, WalkConfig};
