/// Characters treated as inline emphasis and removed before matching.
pub const EMPHASIS_CHARS: [char; 4] = ['*', '_', '~', '`'];

/// Opening quotation marks that may precede a header-shaped line.
pub const OPENING_QUOTES: [char; 5] = ['«', '"', '“', '‘', '„'];

/// A line with emphasis markup removed, keeping the byte offset of every
/// surviving character in the original line.
#[derive(Debug, Clone)]
pub struct MarkedLine<'a> {
    source: &'a str,
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl<'a> MarkedLine<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut chars = Vec::with_capacity(source.len());
        let mut offsets = Vec::with_capacity(source.len());

        for (offset, ch) in source.char_indices() {
            if EMPHASIS_CHARS.contains(&ch) {
                continue;
            }
            chars.push(ch);
            offsets.push(offset);
        }

        Self {
            source,
            chars,
            offsets,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Byte offset in the original line where stripped char `index` starts.
    pub fn byte_start(&self, index: usize) -> usize {
        self.offsets
            .get(index)
            .copied()
            .unwrap_or(self.source.len())
    }

    /// Byte offset in the original line just past stripped char `index`.
    pub fn byte_end(&self, index: usize) -> usize {
        match (self.offsets.get(index), self.chars.get(index)) {
            (Some(offset), Some(ch)) => offset + ch.len_utf8(),
            _ => self.source.len(),
        }
    }

    /// Original text covering stripped chars `from..to`, markup included.
    pub fn original_slice(&self, from: usize, to: usize) -> &'a str {
        if from >= to || from >= self.chars.len() {
            return "";
        }
        &self.source[self.byte_start(from)..self.byte_end(to - 1)]
    }

    /// Whether stripped chars `index` and `index + 1` were adjacent in the
    /// original, with no markup between them.
    pub fn adjacent_in_source(&self, index: usize) -> bool {
        index + 1 < self.chars.len() && self.byte_end(index) == self.byte_start(index + 1)
    }

    /// Returns the index just past `literal` if it occurs at `index`.
    pub fn literal_at(&self, index: usize, literal: &str) -> Option<usize> {
        let mut cursor = index;
        for expected in literal.chars() {
            if self.char_at(cursor)? != expected {
                return None;
            }
            cursor += 1;
        }
        Some(cursor)
    }

    pub fn skip_whitespace(&self, mut index: usize) -> usize {
        while self.char_at(index).is_some_and(char::is_whitespace) {
            index += 1;
        }
        index
    }

    pub fn digit_run_end(&self, mut index: usize) -> usize {
        while self.char_at(index).is_some_and(|ch| ch.is_ascii_digit()) {
            index += 1;
        }
        index
    }

    pub fn text(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }

    /// True when everything before `index` is whitespace, list markers or
    /// opening quotation marks.
    pub fn only_line_prefix_before(&self, index: usize) -> bool {
        self.chars[..index.min(self.chars.len())]
            .iter()
            .all(|ch| is_line_prefix_char(*ch))
    }

    pub fn first_non_prefix(&self) -> usize {
        self.chars
            .iter()
            .position(|ch| !is_line_prefix_char(*ch))
            .unwrap_or(self.chars.len())
    }

    /// True when `index` is not glued to a preceding letter or digit.
    pub fn word_boundary_before(&self, index: usize) -> bool {
        index == 0
            || self
                .char_at(index - 1)
                .is_none_or(|ch| !ch.is_alphanumeric())
    }

    pub fn word_boundary_at(&self, index: usize) -> bool {
        self.char_at(index).is_none_or(|ch| !ch.is_alphanumeric())
    }
}

fn is_line_prefix_char(ch: char) -> bool {
    ch.is_whitespace() || ch == '#' || ch == '-' || OPENING_QUOTES.contains(&ch)
}

/// Whether the byte offset `at` in `line` sits inside a quotation opened
/// earlier on the same line.
pub fn is_enclosed_in_quotes(line: &str, at: usize) -> bool {
    let before = &line[..at.min(line.len())];
    let mut guillemets = 0_i32;
    let mut curly_double = 0_i32;
    let mut curly_single = 0_i32;
    let mut straight_double = 0_usize;

    for ch in before.chars() {
        match ch {
            '«' => guillemets += 1,
            '»' => guillemets -= 1,
            '“' | '„' => curly_double += 1,
            '”' => curly_double -= 1,
            '‘' => curly_single += 1,
            '’' => curly_single -= 1,
            '"' => straight_double += 1,
            _ => {}
        }
    }

    guillemets > 0 || curly_double > 0 || curly_single > 0 || straight_double % 2 == 1
}

/// Net guillemet balance of a line: opened minus closed.
pub fn guillemet_balance(line: &str) -> i64 {
    line.chars().fold(0, |balance, ch| match ch {
        '«' => balance + 1,
        '»' => balance - 1,
        _ => balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marked_line_maps_stripped_chars_back_to_source() {
        let line = MarkedLine::new("**Άρθρο** 1****18");
        let stripped: String = (0..line.len()).filter_map(|i| line.char_at(i)).collect();
        assert_eq!(stripped, "Άρθρο 118");

        let digits_start = 6;
        assert_eq!(line.original_slice(digits_start, digits_start + 3), "1****18");
        assert!(!line.adjacent_in_source(digits_start));
        assert!(line.adjacent_in_source(digits_start + 1));
    }

    #[test]
    fn quote_enclosure_is_judged_per_line() {
        let line = "Κείμενο «Άρθρο 2» και Άρθρο 3";
        let quoted_at = line.find("Άρθρο 2").expect("first mention present");
        let free_at = line.find("Άρθρο 3").expect("second mention present");
        assert!(is_enclosed_in_quotes(line, quoted_at));
        assert!(!is_enclosed_in_quotes(line, free_at));

        assert!(is_enclosed_in_quotes("\"Άρθρο 4\"", 1));
        assert_eq!(guillemet_balance("«αρχή «μέση» "), 1);
    }
}
