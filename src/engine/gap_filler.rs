use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::mentions::{Mention, find_all_article_mentions};

static TITLE_RANGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*(?:[αάa]ρθρ[οα]\s+)?(\d{1,3})\s*[-–—]\s*(\d{1,3})\s*\)").ok()
});

/// Widest numeric span listed number by number. A wider span, usually left
/// by an OCR-merged header number, is searched only through the numbers its
/// mentions carry and is reported whole.
pub const MAX_LISTED_SPAN: u32 = 10_000;

pub fn is_listable(span: &RangeInclusive<u32>) -> bool {
    span.is_empty() || span.end() - span.start() < MAX_LISTED_SPAN
}

/// How strongly a mention argues for an article boundary; lower is stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum MentionPriority {
    StartOfLine = 1,
    QuotedStartOfLine = 2,
    Inline = 3,
    QuotedInline = 4,
}

impl MentionPriority {
    pub fn of(mention: &Mention) -> Self {
        match (mention.is_start_of_line, mention.is_quoted) {
            (true, false) => Self::StartOfLine,
            (true, true) => Self::QuotedStartOfLine,
            (false, false) => Self::Inline,
            (false, true) => Self::QuotedInline,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl From<MentionPriority> for u8 {
    fn from(priority: MentionPriority) -> Self {
        priority.rank()
    }
}

/// The mention chosen as evidence for a needed number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMention {
    pub article_number: u32,
    pub priority: MentionPriority,
    pub mention: Mention,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GapFill {
    pub found: Vec<RankedMention>,
    pub still_missing: Vec<u32>,
    /// Spans too wide to list; members found inside them are in `found`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlisted: Vec<RangeInclusive<u32>>,
}

impl GapFill {
    pub fn found_numbers(&self) -> Vec<u32> {
        self.found.iter().map(|found| found.article_number).collect()
    }
}

/// Searches `text` for the best mention of each needed number.
pub fn fill_missing(text: &str, needed: &[u32]) -> GapFill {
    if needed.is_empty() || text.is_empty() {
        return GapFill {
            still_missing: sorted_unique(needed),
            ..GapFill::default()
        };
    }
    fill_missing_from_mentions(&find_all_article_mentions(text), needed)
}

/// Per needed number keeps the best-priority mention; ties go to the first
/// occurrence in document order. Numbers without any mention stay missing.
pub fn fill_missing_from_mentions(mentions: &[Mention], needed: &[u32]) -> GapFill {
    let needed = needed.iter().copied().collect::<BTreeSet<u32>>();
    let best = best_mentions(mentions, &needed);
    let still_missing = needed
        .iter()
        .copied()
        .filter(|number| !best.contains_key(number))
        .collect::<Vec<u32>>();

    GapFill {
        found: best.into_values().collect(),
        still_missing,
        unlisted: Vec::new(),
    }
}

/// Gap filling over whole spans. Only numbers some mention carries are
/// looked up, so the cost follows the text and not the width of a span.
pub fn fill_missing_in_spans(mentions: &[Mention], spans: &[RangeInclusive<u32>]) -> GapFill {
    let needed = mentions
        .iter()
        .map(Mention::article_number)
        .filter(|number| spans.iter().any(|span| span.contains(number)))
        .collect::<BTreeSet<u32>>();
    let best = best_mentions(mentions, &needed);
    let (still_missing, unlisted) = unclaimed(spans, |number| best.contains_key(&number));

    GapFill {
        found: best.into_values().collect(),
        still_missing,
        unlisted,
    }
}

/// Members of `spans` for which `claimed` is false. Spans wider than
/// [`MAX_LISTED_SPAN`] come back whole in the second list.
pub fn unclaimed(
    spans: &[RangeInclusive<u32>],
    claimed: impl Fn(u32) -> bool,
) -> (Vec<u32>, Vec<RangeInclusive<u32>>) {
    let mut missing = Vec::new();
    let mut unlisted = Vec::new();
    for span in spans {
        if is_listable(span) {
            missing.extend(span.clone().filter(|number| !claimed(*number)));
        } else {
            unlisted.push(span.clone());
        }
    }
    (missing, unlisted)
}

fn best_mentions(mentions: &[Mention], needed: &BTreeSet<u32>) -> BTreeMap<u32, RankedMention> {
    let mut best = BTreeMap::<u32, RankedMention>::new();

    for mention in mentions {
        let number = mention.article_number();
        if !needed.contains(&number) {
            continue;
        }

        let priority = MentionPriority::of(mention);
        let replace = best
            .get(&number)
            .is_none_or(|incumbent| priority < incumbent.priority);
        if replace {
            best.insert(
                number,
                RankedMention {
                    article_number: number,
                    priority,
                    mention: mention.clone(),
                },
            );
        }
    }

    for found in best.values() {
        debug!(
            number = found.article_number,
            priority = found.priority.rank(),
            line = found.mention.line_index,
            "gap filled from mention"
        );
    }
    best
}

/// Numbers declared by a "(a-b)" range in a record title; empty if none or
/// if the range runs backwards.
pub fn title_range(title: &str) -> Vec<u32> {
    let Some(pattern) = TITLE_RANGE.as_ref() else {
        return Vec::new();
    };
    let Some(captures) = pattern.captures(title) else {
        return Vec::new();
    };

    let bound = |index: usize| {
        captures
            .get(index)
            .and_then(|value| value.as_str().parse::<u32>().ok())
    };
    match (bound(1), bound(2)) {
        (Some(start), Some(end)) if start <= end => (start..=end).collect(),
        _ => Vec::new(),
    }
}

/// Spans strictly between consecutive numbers that differ by more than one.
pub fn internal_gaps(numbers: &[u32]) -> Vec<RangeInclusive<u32>> {
    let sorted = sorted_unique(numbers);
    sorted
        .windows(2)
        .filter(|pair| pair[1] - pair[0] > 1)
        .map(|pair| (pair[0] + 1)..=(pair[1] - 1))
        .collect()
}

pub fn sorted_unique(numbers: &[u32]) -> Vec<u32> {
    numbers
        .iter()
        .copied()
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}
