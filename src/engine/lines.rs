/// One line of a document, located by byte offsets into the full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub index: usize,
    pub start: usize,
    pub content: &'a str,
}

impl SourceLine<'_> {
    /// Byte offset just past the line content, before its terminator.
    pub fn content_end(&self) -> usize {
        self.start + self.content.len()
    }
}

/// Splits like `str::lines` (`\n` or `\r\n` terminators, no trailing empty
/// line) while keeping every line's byte offset.
pub fn split_lines(text: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for (index, piece) in text.split_inclusive('\n').enumerate() {
        let content = match piece.strip_suffix('\n') {
            Some(without_newline) => without_newline
                .strip_suffix('\r')
                .unwrap_or(without_newline),
            None => piece,
        };
        lines.push(SourceLine {
            index,
            start,
            content,
        });
        start += piece.len();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_agrees_with_std_lines() {
        for text in ["", "a", "a\n", "a\r\nb", "a\n\nb\n", "\n"] {
            let ours: Vec<&str> = split_lines(text).iter().map(|line| line.content).collect();
            let std: Vec<&str> = text.lines().collect();
            assert_eq!(ours, std, "input {text:?}");
        }
    }

    #[test]
    fn split_lines_tracks_offsets() {
        let lines = split_lines("ab\r\ncd\nef");
        assert_eq!(lines[1].start, 4);
        assert_eq!(lines[1].content_end(), 6);
        assert_eq!(lines[2].start, 7);
    }
}
