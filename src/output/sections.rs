//! Reading a collected document back into file sections.

use super::document::HEADER_MARK;

/// One file recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub path: String,
    pub content: String,
}

/// Split a document into its file sections, in document order.
///
/// Text outside sections (preamble, directory tree) is skipped. A header
/// without a well-formed code block after it is ignored.
pub fn split_sections(document: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut rest = document;

    while let Some((path, after_header)) = next_header(rest) {
        match read_block(after_header) {
            Some((content, remaining)) => {
                sections.push(Section {
                    path: path.to_string(),
                    content: content.to_string(),
                });
                rest = remaining;
            }
            None => rest = after_header,
        }
    }

    sections
}

/// Find the next header line; return its path and the text after it.
fn next_header(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        let path = trimmed
            .strip_prefix(HEADER_MARK)
            .and_then(|s| s.strip_prefix(' '))
            .and_then(|s| s.strip_suffix(HEADER_MARK))
            .and_then(|s| s.strip_suffix(' '));
        if let Some(path) = path
            && !path.is_empty()
        {
            return Some((path, &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Read a fenced block at the start of `text`; return its content and the
/// text after the closing fence line.
fn read_block(text: &str) -> Option<(&str, &str)> {
    let (fence, body) = text.split_once('\n')?;
    if fence.len() < 3 || !fence.chars().all(|c| c == '`') {
        return None;
    }
    let closing = format!("\n{fence}");
    let end = body.find(&closing)?;
    let after = &body[end + closing.len()..];
    let after = after.strip_prefix('\n').unwrap_or(after);
    Some((&body[..end], after))
}
