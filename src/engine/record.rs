use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::chunks::{ArticleChunk, reconstruct_chunks};
use super::gap_filler::{
    RankedMention, fill_missing_from_mentions, fill_missing_in_spans, internal_gaps, is_listable,
    sorted_unique, title_range,
};
use super::grammar::{DigitHeaderGrammar, HeaderGrammar};
use super::integrity::{SequenceReport, check_sequence_integrity};
use super::locator::{LocatorOptions, TrueHeaderLocation, locate_true_headers, range_declarations};
use super::mentions::{Mention, find_mentions_with};
use super::word_numerals::WordNumeralHeaderGrammar;

/// One row of the article store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: i64,
    pub consultation_id: i64,
    pub title: String,
    pub content: String,
}

/// Document class, which decides how article numbers are written.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarKind {
    #[default]
    Digits,
    Words,
}

impl GrammarKind {
    pub fn as_str(self) -> &'static str {
        self.grammar().name()
    }

    pub fn grammar(self) -> &'static dyn HeaderGrammar {
        match self {
            Self::Digits => &DigitHeaderGrammar,
            Self::Words => &WordNumeralHeaderGrammar,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub grammar: GrammarKind,
    pub locator: LocatorOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    Internal,
    Bridge,
    None,
}

impl CompletionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Bridge => "bridge",
            Self::None => "none",
        }
    }
}

/// Everything derived from one record's text, before and after completion.
#[derive(Debug, Clone, Serialize)]
pub struct RecordAnalysis {
    pub record_id: i64,
    #[serde(skip)]
    pub mentions: Vec<Mention>,
    pub headers: Vec<TrueHeaderLocation>,
    pub initial_numbers: Vec<u32>,
    pub range_declared: Vec<u32>,
    pub title_expected: Vec<u32>,
    pub title_completions: Vec<RankedMention>,
    pub gap_completions: Vec<RankedMention>,
    /// Numbers attributed by bridging; never used as chunk boundaries.
    pub bridged: Vec<RankedMention>,
}

impl RecordAnalysis {
    /// Final sorted number set from every completion channel.
    pub fn confirmed_numbers(&self) -> Vec<u32> {
        self.initial_numbers
            .iter()
            .chain(&self.range_declared)
            .copied()
            .chain(self.title_completions.iter().map(|found| found.article_number))
            .chain(self.gap_completions.iter().map(|found| found.article_number))
            .chain(self.bridged.iter().map(|found| found.article_number))
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }

    pub fn source_of_completion(&self) -> CompletionSource {
        if !self.title_completions.is_empty() || !self.gap_completions.is_empty() {
            CompletionSource::Internal
        } else if !self.bridged.is_empty() {
            CompletionSource::Bridge
        } else {
            CompletionSource::None
        }
    }

    /// Title range numbers that no channel could confirm.
    pub fn missing_vs_title(&self) -> Vec<u32> {
        let confirmed = self.confirmed_numbers();
        self.title_expected
            .iter()
            .copied()
            .filter(|number| confirmed.binary_search(number).is_err())
            .collect()
    }

    /// Internal completions that sit where their number belongs: below every
    /// boundary with a smaller number and above every boundary with a larger
    /// one. The rest stay confirmed numbers but never split the text.
    pub fn positional_promotions(&self) -> Vec<RankedMention> {
        let mut boundaries = self
            .headers
            .iter()
            .map(|header| (header.article_number, header.line_index()))
            .collect::<Vec<(u32, usize)>>();
        let mut candidates = self
            .title_completions
            .iter()
            .chain(&self.gap_completions)
            .collect::<Vec<&RankedMention>>();
        candidates.sort_by_key(|ranked| ranked.article_number);

        let mut admitted = Vec::with_capacity(candidates.len());
        for ranked in candidates {
            let number = ranked.article_number;
            let line = ranked.mention.line_index;
            let in_place = boundaries
                .iter()
                .all(|&(other, other_line)| match other.cmp(&number) {
                    Ordering::Less => other_line < line,
                    Ordering::Greater => other_line > line,
                    Ordering::Equal => true,
                });
            if !in_place {
                debug!(
                    record_id = self.record_id,
                    number,
                    line,
                    "completion out of place, not a chunk boundary"
                );
                continue;
            }
            boundaries.push((number, line));
            admitted.push(ranked.clone());
        }
        admitted
    }

    pub fn chunks(&self, text: &str) -> Vec<ArticleChunk> {
        reconstruct_chunks(text, &self.headers, &self.positional_promotions())
    }

    pub fn report_before(&self) -> SequenceReport {
        check_sequence_integrity(&self.initial_numbers)
    }

    pub fn report_after(&self) -> SequenceReport {
        check_sequence_integrity(&self.confirmed_numbers())
    }
}

pub fn analyse_record(record: &ArticleRecord, options: &AnalysisOptions) -> RecordAnalysis {
    analyse_document(record.id, &record.title, &record.content, options)
}

/// Header detection followed by title-range and internal-gap completion.
pub fn analyse_document(
    record_id: i64,
    title: &str,
    text: &str,
    options: &AnalysisOptions,
) -> RecordAnalysis {
    let mentions = find_mentions_with(options.grammar.grammar(), text);
    let headers = locate_true_headers(text, &mentions, &options.locator);

    let initial_numbers = sorted_unique(
        &headers
            .iter()
            .map(|header| header.article_number)
            .collect::<Vec<u32>>(),
    );

    let range_declared = sorted_unique(
        &range_declarations(&mentions, &options.locator)
            .into_iter()
            .map(|mention| mention.parsed_details.covered_numbers())
            .filter(|span| {
                let listable = is_listable(span);
                if !listable {
                    debug!(
                        record_id,
                        start = *span.start(),
                        end = *span.end(),
                        "implausible range declaration ignored"
                    );
                }
                listable
            })
            .flatten()
            .collect::<Vec<u32>>(),
    );

    let mut confirmed = initial_numbers
        .iter()
        .chain(&range_declared)
        .copied()
        .collect::<BTreeSet<u32>>();

    let title_expected = title_range(title);
    let needed_vs_title = title_expected
        .iter()
        .copied()
        .filter(|number| !confirmed.contains(number))
        .collect::<Vec<u32>>();
    let title_fill = fill_missing_from_mentions(&mentions, &needed_vs_title);
    confirmed.extend(title_fill.found_numbers());

    let gaps = internal_gaps(&confirmed.iter().copied().collect::<Vec<u32>>());
    let gap_fill = fill_missing_in_spans(&mentions, &gaps);

    debug!(
        record_id,
        headers = headers.len(),
        title_found = title_fill.found.len(),
        gaps = gaps.len(),
        gaps_found = gap_fill.found.len(),
        "record analysed"
    );

    RecordAnalysis {
        record_id,
        mentions,
        headers,
        initial_numbers,
        range_declared,
        title_expected,
        title_completions: title_fill.found,
        gap_completions: gap_fill.found,
        bridged: Vec::new(),
    }
}
