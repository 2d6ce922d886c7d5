use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::lines::split_lines;
use super::mentions::{Mention, find_all_article_mentions};

#[derive(Debug, Clone, Default)]
pub struct LocatorOptions {
    /// Promote "Άρθρα a – b" declarations instead of only recording them.
    pub include_range_headers: bool,
    /// Also reject mentions inside a «…» block opened on an earlier line.
    pub track_quote_blocks: bool,
    /// Lines an external detector judged to be an index or table of contents.
    pub index_lines: BTreeSet<usize>,
}

/// A mention promoted to "this begins an article".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrueHeaderLocation {
    #[serde(flatten)]
    pub mention: Mention,
    pub article_number: u32,
    pub original_line_text: String,
}

impl TrueHeaderLocation {
    pub fn line_index(&self) -> usize {
        self.mention.line_index
    }
}

/// Genuine article headers of `text` under the default options.
pub fn get_true_main_article_header_locations(text: &str) -> Vec<TrueHeaderLocation> {
    let mentions = find_all_article_mentions(text);
    locate_true_headers(text, &mentions, &LocatorOptions::default())
}

/// Filters scanner output down to headers: start of line, unquoted, not a
/// paragraph reference, not a range declaration unless opted in, not on an
/// index line. At most one header per line.
pub fn locate_true_headers(
    text: &str,
    mentions: &[Mention],
    options: &LocatorOptions,
) -> Vec<TrueHeaderLocation> {
    let lines = split_lines(text);
    let mut headers = Vec::<TrueHeaderLocation>::new();

    for mention in mentions {
        if !is_promotable(mention, options) {
            continue;
        }

        if headers
            .last()
            .is_some_and(|previous| previous.line_index() >= mention.line_index)
        {
            continue;
        }

        let original_line_text = lines
            .get(mention.line_index)
            .map(|line| line.content.to_string())
            .unwrap_or_default();

        headers.push(TrueHeaderLocation {
            mention: mention.clone(),
            article_number: mention.article_number(),
            original_line_text,
        });
    }

    headers
}

fn is_promotable(mention: &Mention, options: &LocatorOptions) -> bool {
    let details = &mention.parsed_details;

    if !mention.is_start_of_line || details.is_paragraph_reference() {
        return false;
    }
    if mention.is_quoted {
        debug!(line = mention.line_index, text = %mention.match_text, "quoted header skipped");
        return false;
    }
    if options.track_quote_blocks && mention.in_quote_block {
        debug!(
            line = mention.line_index,
            text = %mention.match_text,
            "header inside quote block skipped"
        );
        return false;
    }
    if details.is_range && !options.include_range_headers {
        return false;
    }
    if options.index_lines.contains(&mention.line_index) {
        debug!(line = mention.line_index, text = %mention.match_text, "index line skipped");
        return false;
    }

    true
}

/// Range declarations that stand where a header would: start of line,
/// unquoted, outside any index. Their spans count as declared numbers.
pub fn range_declarations<'m>(
    mentions: &'m [Mention],
    options: &LocatorOptions,
) -> Vec<&'m Mention> {
    mentions
        .iter()
        .filter(|mention| {
            mention.parsed_details.is_range
                && mention.is_start_of_line
                && !mention.is_quoted
                && !options.index_lines.contains(&mention.line_index)
        })
        .collect()
}
