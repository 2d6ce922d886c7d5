use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use super::gap_filler::{RankedMention, fill_missing_in_spans, unclaimed};
use super::mentions::Mention;

/// Outcome of resolving the numeric gap between two adjacent records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BridgeOutcome {
    pub gap: Option<RangeInclusive<u32>>,
    pub left: Vec<RankedMention>,
    pub right: Vec<RankedMention>,
    pub unresolved: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved_unlisted: Vec<RangeInclusive<u32>>,
}

impl BridgeOutcome {
    pub fn is_empty(&self) -> bool {
        self.gap.is_none()
    }
}

/// Span strictly between the left record's last and the right record's
/// first confirmed number, if there is one.
pub fn bridge_gap(left_numbers: &[u32], right_numbers: &[u32]) -> Option<RangeInclusive<u32>> {
    let left_max = left_numbers.iter().max()?;
    let right_min = right_numbers.iter().min()?;
    let gap = left_max.checked_add(1)?..=right_min.checked_sub(1)?;
    (!gap.is_empty()).then_some(gap)
}

/// Resolves the gap against the left record's text first, then the right
/// record's text for whatever remains. A number resolvable in both is
/// attributed to the left record.
pub fn resolve_bridge(
    left_numbers: &[u32],
    left_mentions: &[Mention],
    right_numbers: &[u32],
    right_mentions: &[Mention],
) -> BridgeOutcome {
    let Some(gap) = bridge_gap(left_numbers, right_numbers) else {
        return BridgeOutcome::default();
    };
    let spans = [gap.clone()];

    let from_left = fill_missing_in_spans(left_mentions, &spans);
    let taken = from_left.found_numbers();
    let mut from_right = fill_missing_in_spans(right_mentions, &spans);
    from_right
        .found
        .retain(|found| taken.binary_search(&found.article_number).is_err());
    let resolved_right = from_right.found_numbers();

    let (unresolved, unresolved_unlisted) = unclaimed(&spans, |number| {
        taken.binary_search(&number).is_ok() || resolved_right.binary_search(&number).is_ok()
    });

    debug!(
        gap_start = *gap.start(),
        gap_end = *gap.end(),
        left = from_left.found.len(),
        right = from_right.found.len(),
        unresolved = unresolved.len(),
        "bridge resolved"
    );

    BridgeOutcome {
        gap: Some(gap),
        left: from_left.found,
        right: from_right.found,
        unresolved,
        unresolved_unlisted,
    }
}
