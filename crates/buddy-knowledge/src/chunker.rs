//! Character-based text chunking with overlap.

use buddy_core::error::{BuddyError, Result};

/// Split text into overlapping chunks of at most `chunk_size` characters.
///
/// Starting at offset 0, each chunk takes `min(chunk_size, remaining)`
/// characters and is trimmed of surrounding whitespace; the start offset
/// then advances by `chunk_size - overlap`. Chunking stops once a chunk
/// reaches the end of the text. Boundaries are character counts, not token
/// or sentence boundaries, so words may be split — an accepted
/// approximation at this scale.
///
/// `overlap` must be strictly less than `chunk_size`; otherwise the offset
/// would never advance.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(BuddyError::Config("chunk_size must be non-zero".into()));
    }
    if overlap >= chunk_size {
        return Err(BuddyError::Config(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        chunks.push(chunk.trim().to_string());

        if end == chars.len() {
            break;
        }
        start += chunk_size - overlap;
    }

    Ok(chunks)
}
