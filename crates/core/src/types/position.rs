use serde::{Deserialize, Serialize};

/// Represents a position in a text document using 0-based line and character indices
///
/// `character` counts Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Convert to a byte offset into `source`.
    ///
    /// Lines past the end clamp to the end of the text, characters past the end
    /// of a line clamp to the end of that line.
    pub fn to_offset(&self, source: &str) -> usize {
        let mut line_start = 0;
        for _ in 0..self.line {
            match source[line_start..].find('\n') {
                Some(newline) => line_start += newline + 1,
                None => return source.len(),
            }
        }

        let line_text = &source[line_start..];
        let line_len = line_text.find('\n').unwrap_or(line_text.len());
        let line_text = &line_text[..line_len];

        let column = line_text
            .char_indices()
            .nth(self.character as usize)
            .map(|(idx, _)| idx)
            .unwrap_or(line_len);
        line_start + column
    }

    /// Position of a byte offset in `source`; offsets past the end map to the last position.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = clamp_offset(source, offset);
        let before = &source[..offset];
        let line = before.matches('\n').count() as u32;
        let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let character = before[line_start..].chars().count() as u32;
        Self { line, character }
    }
}

/// Clamp a byte offset into `[0, source.len()]` and down to the nearest char boundary.
pub fn clamp_offset(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
