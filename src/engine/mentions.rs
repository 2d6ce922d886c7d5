use serde::Serialize;
use tracing::trace;

use super::grammar::{DigitHeaderGrammar, HeaderGrammar, HeaderMatch, scan_line_with};
use super::lines::split_lines;
use super::markup::{guillemet_balance, is_enclosed_in_quotes};

/// One occurrence of an article reference anywhere in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub line_index: usize,
    pub char_offset_in_line: usize,
    pub match_text: String,
    pub parsed_details: HeaderMatch,
    pub is_start_of_line: bool,
    pub is_quoted: bool,
    /// A « opened on an earlier line is still open where this match starts.
    pub in_quote_block: bool,
}

impl Mention {
    pub fn article_number(&self) -> u32 {
        self.parsed_details.main_number
    }

    pub fn position(&self) -> (usize, usize) {
        (self.line_index, self.char_offset_in_line)
    }
}

/// Every article reference in `text`, header-shaped or not, in document order.
pub fn find_all_article_mentions(text: &str) -> Vec<Mention> {
    find_mentions_with(&DigitHeaderGrammar, text)
}

pub fn find_mentions_with<G: HeaderGrammar + ?Sized>(grammar: &G, text: &str) -> Vec<Mention> {
    let mut mentions = Vec::new();
    let mut open_guillemets = 0_i64;

    for line in split_lines(text) {
        for hit in scan_line_with(grammar, line.content) {
            let mention = Mention {
                line_index: line.index,
                char_offset_in_line: line.content[..hit.start].chars().count(),
                match_text: line.content[hit.start..hit.end].to_string(),
                parsed_details: hit.header,
                is_start_of_line: hit.starts_line,
                is_quoted: is_enclosed_in_quotes(line.content, hit.start),
                in_quote_block: open_guillemets > 0,
            };
            trace!(
                line = mention.line_index,
                number = mention.article_number(),
                start_of_line = mention.is_start_of_line,
                quoted = mention.is_quoted,
                "article mention"
            );
            mentions.push(mention);
        }

        open_guillemets = (open_guillemets + guillemet_balance(line.content)).max(0);
    }

    mentions
}
