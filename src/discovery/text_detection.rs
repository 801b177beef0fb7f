//! Text file detection utilities.
//!
//! Detection is content based: a file is text when it is valid UTF-8 and
//! contains no NUL byte. File names and extensions are not consulted.

/// Check whether raw content looks binary.
pub fn looks_binary(bytes: &[u8]) -> bool {
    bytes.contains(&0)
}

/// Decode file content as text, or `None` if it is not text.
pub fn decode_text(bytes: Vec<u8>) -> Option<String> {
    if looks_binary(&bytes) {
        return None;
    }
    String::from_utf8(bytes).ok()
}
