//! Output document format.
//!
//! The document is Markdown: a short preamble, an optional directory tree,
//! then one section per file. Each section is a `===== <path> =====` header
//! line followed by the file content in its own code fence.
//!
//! [`split_sections`] reads a document back into (path, content) pairs.

pub mod document;
pub mod sections;
pub mod tree;

pub use document::{DocumentWriter, fence_for, file_header};
pub use sections::{Section, split_sections};
pub use tree::render_tree;
