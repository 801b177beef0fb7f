//! Streaming writer for the output document.

use super::tree::render_tree;
use crate::discovery::ProjectEntry;
use std::io::{self, Write};

/// Marker surrounding the path in a file header line.
pub const HEADER_MARK: &str = "=====";

const MIN_FENCE: usize = 3;

/// Header line (without newline) introducing a file section.
pub fn file_header(relative: &str) -> String {
    format!("{HEADER_MARK} {relative} {HEADER_MARK}")
}

/// Code fence for `content`: at least three backticks, and longer than any
/// backtick run inside the content so the block cannot close early.
pub fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(MIN_FENCE.max(longest + 1))
}

/// Append-only writer for the Markdown document.
pub struct DocumentWriter<W: Write> {
    out: W,
    bytes_written: u64,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bytes_written: 0,
        }
    }

    fn put(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }

    /// Describe the document and the project it was built from.
    pub fn write_preamble(&mut self, project_name: &str) -> io::Result<()> {
        self.put(
            "This markdown file consolidates the project directory structure and source code \
             contents for analysis by a large language model.\n",
        )?;
        self.put(&format!("Target project directory: '{project_name}'.\n"))?;
        self.put(
            "Each file's content is enclosed in its own markdown code block for better clarity.\n",
        )?;
        self.put("\n\n")
    }

    pub fn write_tree(&mut self, entries: &[ProjectEntry]) -> io::Result<()> {
        self.put("#### Project Directory Tree\n\n")?;
        self.put("```\n")?;
        for line in render_tree(entries) {
            self.put(&line)?;
            self.put("\n")?;
        }
        self.put("```\n\n")
    }

    /// Write one file section.
    pub fn write_file(&mut self, relative: &str, content: &str) -> io::Result<()> {
        let fence = fence_for(content);
        self.put(&file_header(relative))?;
        self.put("\n")?;
        self.put(&fence)?;
        self.put("\n")?;
        self.put(content)?;
        self.put("\n")?;
        self.put(&fence)?;
        self.put("\n\n")
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
