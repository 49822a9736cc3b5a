//! Offset/line mapping helpers shared by the CLI reporting layer.

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Map a byte offset to a 1-based (line, column) pair.
///
/// The column counts characters, not bytes, so caret positioning in the
/// report lines up with what editors display.
pub fn offset_to_position(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    };
    let line_start = line_index[line - 1];
    let col = content[line_start..offset].chars().count() + 1;
    (line, col)
}

/// The text of a 1-based line, without its trailing newline.
pub fn line_text<'t>(content: &'t str, line_index: &[usize], line: usize) -> Option<&'t str> {
    let start = *line_index.get(line - 1)?;
    let end = line_index
        .get(line)
        .map(|next| next - 1)
        .unwrap_or(content.len());
    content.get(start..end)
}
