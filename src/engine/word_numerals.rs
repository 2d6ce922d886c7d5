//! Greek ordinal word numerals ("Άρθρο πρώτο", "Άρθρο δέκατο τρίτο"), used
//! by gazette-style law texts instead of digits.

use std::sync::LazyLock;

use super::grammar::{
    HeaderGrammar, HeaderMatch, keyword_at, read_paragraph, skip_trailing_punctuation,
};
use super::markup::MarkedLine;

const UNITS: [(&str, u32); 9] = [
    ("πρώτο", 1),
    ("δεύτερο", 2),
    ("τρίτο", 3),
    ("τέταρτο", 4),
    ("πέμπτο", 5),
    ("έκτο", 6),
    ("έβδομο", 7),
    ("όγδοο", 8),
    ("ένατο", 9),
];

const TENS: [(&str, u32); 8] = [
    ("εικοστό", 20),
    ("τριακοστό", 30),
    ("τεσσαρακοστό", 40),
    ("πεντηκοστό", 50),
    ("εξηκοστό", 60),
    ("εβδομηκοστό", 70),
    ("ογδοηκοστό", 80),
    ("ενενηκοστό", 90),
];

const HUNDREDS: [(&str, u32); 9] = [
    ("εκατοστό", 100),
    ("διακοσιοστό", 200),
    ("τριακοσιοστό", 300),
    ("τετρακοσιοστό", 400),
    ("πεντακοσιοστό", 500),
    ("εξακοσιοστό", 600),
    ("επτακοσιοστό", 700),
    ("οκτακοσιοστό", 800),
    ("εννιακοσιοστό", 900),
];

/// Phrase table sorted longest first, so "δέκατο τρίτο" wins over "δέκατο".
static ORDINALS: LazyLock<Vec<(String, u32)>> = LazyLock::new(build_ordinal_table);

fn build_ordinal_table() -> Vec<(String, u32)> {
    let mut below_hundred = Vec::<(String, u32)>::new();

    for (word, value) in UNITS {
        below_hundred.push((word.to_string(), value));
    }
    below_hundred.push(("δέκατο".to_string(), 10));
    below_hundred.push(("ενδέκατο".to_string(), 11));
    below_hundred.push(("δωδέκατο".to_string(), 12));
    for (word, value) in UNITS.iter().skip(2) {
        below_hundred.push((format!("δέκατο {word}"), 10 + value));
    }
    for (tens_word, tens_value) in TENS {
        below_hundred.push((tens_word.to_string(), tens_value));
        for (unit_word, unit_value) in UNITS {
            below_hundred.push((format!("{tens_word} {unit_word}"), tens_value + unit_value));
        }
    }

    let mut table = below_hundred.clone();
    for (hundreds_word, hundreds_value) in HUNDREDS {
        table.push((hundreds_word.to_string(), hundreds_value));
        for (rest_word, rest_value) in &below_hundred {
            table.push((format!("{hundreds_word} {rest_word}"), hundreds_value + rest_value));
        }
    }
    table.push(("χιλιοστό".to_string(), 1000));

    table.sort_by(|a, b| {
        b.0.chars()
            .count()
            .cmp(&a.0.chars().count())
            .then_with(|| a.0.cmp(&b.0))
    });
    table
}

/// Looks up a whole ordinal phrase, e.g. `"εικοστό πρώτο"` → 21.
pub fn ordinal_value(phrase: &str) -> Option<u32> {
    ORDINALS
        .iter()
        .find(|(word, _)| word == phrase)
        .map(|(_, value)| *value)
}

/// Header grammar for ordinal word numerals. Matching is case-sensitive on
/// the lowercase forms, longest phrase first, whole words only. Plural range
/// declarations and alpha suffixes do not occur in this document class.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordNumeralHeaderGrammar;

impl HeaderGrammar for WordNumeralHeaderGrammar {
    fn name(&self) -> &'static str {
        "words"
    }

    fn match_at(&self, line: &MarkedLine<'_>, at: usize) -> Option<(HeaderMatch, usize)> {
        let (_, after_keyword) = keyword_at(line, at, false)?;
        let number_start = line.skip_whitespace(after_keyword);

        let (value, number_end) = ORDINALS.iter().find_map(|(word, value)| {
            let end = line.literal_at(number_start, word)?;
            line.word_boundary_at(end).then_some((*value, end))
        })?;

        let mut header = HeaderMatch {
            main_number: value,
            alpha_suffix: None,
            paragraph_id: None,
            raw_number_text: line.original_slice(number_start, number_end).to_string(),
            is_range: false,
            range_end: None,
        };
        let mut cursor = number_end;

        if let Some((paragraph_id, next)) = read_paragraph(line, cursor) {
            header.paragraph_id = Some(paragraph_id);
            cursor = next;
        }

        Some((header, skip_trailing_punctuation(line, cursor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grammar::parse_header_with;

    #[test]
    fn ordinal_table_covers_compounds() {
        assert_eq!(ordinal_value("πρώτο"), Some(1));
        assert_eq!(ordinal_value("δέκατο τρίτο"), Some(13));
        assert_eq!(ordinal_value("εικοστό πρώτο"), Some(21));
        assert_eq!(ordinal_value("εκατοστό δέκατο"), Some(110));
        assert_eq!(ordinal_value("διακοσιοστό πρώτο"), Some(201));
        assert_eq!(ordinal_value("χιλιοστό"), Some(1000));
        assert_eq!(ordinal_value("ένα"), None);
    }

    #[test]
    fn word_grammar_prefers_longest_phrase() {
        let grammar = WordNumeralHeaderGrammar;

        let header = parse_header_with(&grammar, "Άρθρο δέκατο τρίτο").expect("compound ordinal");
        assert_eq!(header.main_number, 13);
        assert_eq!(header.raw_number_text, "δέκατο τρίτο");

        let header = parse_header_with(&grammar, "## Άρθρο πρώτο.").expect("simple ordinal");
        assert_eq!(header.main_number, 1);

        let header =
            parse_header_with(&grammar, "Άρθρο εκατοστό εικοστό πρώτο").expect("hundreds ordinal");
        assert_eq!(header.main_number, 121);
    }

    #[test]
    fn word_grammar_rejects_digits_and_uppercase_words() {
        let grammar = WordNumeralHeaderGrammar;
        assert!(parse_header_with(&grammar, "Άρθρο 1").is_none());
        assert!(parse_header_with(&grammar, "Άρθρο ΠΡΩΤΟ").is_none());
        assert!(parse_header_with(&grammar, "Άρθρο ένα").is_none());
        assert!(parse_header_with(&grammar, "Άρθρο πρώτος").is_none());
    }
}
