use std::ops::RangeInclusive;

use serde::Serialize;

use super::markup::MarkedLine;

const SINGULAR_KEYWORDS: [&str; 2] = ["Άρθρο", "Ά ρθρο"];
const PLURAL_KEYWORDS: [&str; 1] = ["Άρθρα"];
const PARAGRAPH_MARKERS: [&str; 2] = ["παράγραφος", "παρ."];
const RANGE_DASHES: [char; 2] = ['-', '–'];
const MAX_ALPHA_SUFFIX_LEN: usize = 2;

/// One syntactically valid "Άρθρο …" occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMatch {
    pub main_number: u32,
    pub alpha_suffix: Option<String>,
    pub paragraph_id: Option<String>,
    pub raw_number_text: String,
    pub is_range: bool,
    pub range_end: Option<u32>,
}

impl HeaderMatch {
    fn new(main_number: u32, raw_number_text: String) -> Self {
        Self {
            main_number,
            alpha_suffix: None,
            paragraph_id: None,
            raw_number_text,
            is_range: false,
            range_end: None,
        }
    }

    pub fn is_paragraph_reference(&self) -> bool {
        self.paragraph_id.is_some()
    }

    /// Every article number this match speaks for; a range covers its span.
    pub fn covered_numbers(&self) -> RangeInclusive<u32> {
        match self.range_end {
            Some(end) if self.is_range => self.main_number..=end,
            _ => self.main_number..=self.main_number,
        }
    }
}

/// A grammar hit inside one line, with byte offsets into that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub start: usize,
    pub end: usize,
    pub header: HeaderMatch,
    pub starts_line: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeywordForm {
    Singular,
    Plural,
}

/// Decides whether an article reference starts at a given position of a
/// markup-stripped line. Implementations differ in how they read the number.
pub trait HeaderGrammar: Sync {
    fn name(&self) -> &'static str;

    /// Reads a complete reference whose keyword starts at stripped index
    /// `at`, returning the match and the stripped index just past it.
    fn match_at(&self, line: &MarkedLine<'_>, at: usize) -> Option<(HeaderMatch, usize)>;
}

/// Article numbers written with digits, possibly split by emphasis markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitHeaderGrammar;

impl HeaderGrammar for DigitHeaderGrammar {
    fn name(&self) -> &'static str {
        "digits"
    }

    fn match_at(&self, line: &MarkedLine<'_>, at: usize) -> Option<(HeaderMatch, usize)> {
        let (form, after_keyword) = keyword_at(line, at, true)?;

        let number_start = line.skip_whitespace(after_keyword);
        let number_end = line.digit_run_end(number_start);
        if number_end == number_start {
            return None;
        }

        let main_number = line.text(number_start, number_end).parse::<u32>().ok()?;
        if main_number == 0 {
            return None;
        }

        let raw_number_text = line.original_slice(number_start, number_end).to_string();
        let mut header = HeaderMatch::new(main_number, raw_number_text);
        let mut cursor = number_end;

        match form {
            KeywordForm::Plural => {
                if let Some((range_end, next)) = read_range_end(line, cursor) {
                    if range_end >= main_number {
                        header.is_range = true;
                        header.range_end = Some(range_end);
                        cursor = next;
                    }
                }
            }
            KeywordForm::Singular => {
                if let Some((suffix, next)) = read_alpha_suffix(line, cursor) {
                    header.alpha_suffix = Some(suffix);
                    cursor = next;
                }
            }
        }

        if let Some((paragraph_id, next)) = read_paragraph(line, cursor) {
            header.paragraph_id = Some(paragraph_id);
            cursor = next;
        }

        Some((header, skip_trailing_punctuation(line, cursor)))
    }
}

/// Parses a single trimmed line as an article header with the digit grammar.
pub fn parse_article_header(line: &str) -> Option<HeaderMatch> {
    parse_header_with(&DigitHeaderGrammar, line)
}

/// The keyword must be the first semantic token of the line: only list
/// markers, emphasis, whitespace or an opening quote may precede it.
pub fn parse_header_with<G: HeaderGrammar + ?Sized>(
    grammar: &G,
    line: &str,
) -> Option<HeaderMatch> {
    let marked = MarkedLine::new(line.trim());
    let at = marked.first_non_prefix();
    grammar.match_at(&marked, at).map(|(header, _)| header)
}

/// Every non-overlapping grammar hit in `line`, left to right.
pub fn scan_line_with<G: HeaderGrammar + ?Sized>(grammar: &G, line: &str) -> Vec<LineMatch> {
    let marked = MarkedLine::new(line);
    let mut matches = Vec::new();
    let mut index = 0;

    while index < marked.len() {
        match grammar.match_at(&marked, index) {
            Some((header, end)) => {
                matches.push(LineMatch {
                    start: marked.byte_start(index),
                    end: marked.byte_end(end.saturating_sub(1)),
                    header,
                    starts_line: marked.only_line_prefix_before(index),
                });
                index = end.max(index + 1);
            }
            None => index += 1,
        }
    }

    matches
}

/// Matches a keyword at `at`. Markup may sit only before the keyword's final
/// letter ("Άρθρ**ο**"); anything scrambled further inside is rejected.
pub(crate) fn keyword_at(
    line: &MarkedLine<'_>,
    at: usize,
    allow_plural: bool,
) -> Option<(KeywordForm, usize)> {
    if !line.word_boundary_before(at) {
        return None;
    }

    let singular = SINGULAR_KEYWORDS
        .iter()
        .map(|keyword| (KeywordForm::Singular, *keyword));
    let plural = PLURAL_KEYWORDS
        .iter()
        .filter(|_| allow_plural)
        .map(|keyword| (KeywordForm::Plural, *keyword));

    for (form, keyword) in singular.chain(plural) {
        let Some(end) = line.literal_at(at, keyword) else {
            continue;
        };
        let contiguous = (at..end.saturating_sub(2)).all(|index| line.adjacent_in_source(index));
        let glued_to_word = line.char_at(end).is_some_and(char::is_alphabetic);
        if contiguous && !glued_to_word {
            return Some((form, end));
        }
    }

    None
}

fn read_range_end(line: &MarkedLine<'_>, cursor: usize) -> Option<(u32, usize)> {
    let dash = line.skip_whitespace(cursor);
    if !line.char_at(dash).is_some_and(|ch| RANGE_DASHES.contains(&ch)) {
        return None;
    }

    let start = line.skip_whitespace(dash + 1);
    let end = line.digit_run_end(start);
    if end == start {
        return None;
    }

    let value = line.text(start, end).parse::<u32>().ok()?;
    Some((value, end))
}

fn read_alpha_suffix(line: &MarkedLine<'_>, cursor: usize) -> Option<(String, usize)> {
    let start = line.skip_whitespace(cursor);
    let mut end = start;
    while line.char_at(end).is_some_and(is_greek_capital) {
        end += 1;
    }

    let length = end - start;
    if length == 0 || length > MAX_ALPHA_SUFFIX_LEN || !line.word_boundary_at(end) {
        return None;
    }

    Some((line.text(start, end), end))
}

pub(crate) fn read_paragraph(line: &MarkedLine<'_>, cursor: usize) -> Option<(String, usize)> {
    let mut index = line.skip_whitespace(cursor);
    if line
        .char_at(index)
        .is_some_and(|ch| matches!(ch, '.' | ':' | ','))
    {
        index = line.skip_whitespace(index + 1);
    }

    let after_marker = PARAGRAPH_MARKERS
        .iter()
        .find_map(|marker| line.literal_at(index, marker))?;

    let start = line.skip_whitespace(after_marker);
    let end = line.digit_run_end(start);
    if end == start {
        return None;
    }

    Some((line.text(start, end), end))
}

pub(crate) fn skip_trailing_punctuation(line: &MarkedLine<'_>, cursor: usize) -> usize {
    let next = line.skip_whitespace(cursor);
    if line.char_at(next).is_some_and(|ch| ch == '.' || ch == ':') {
        next + 1
    } else {
        cursor
    }
}

fn is_greek_capital(ch: char) -> bool {
    ('Α'..='Ω').contains(&ch)
}
