use std::ops::RangeInclusive;

use serde::Serialize;

use super::gap_filler::{internal_gaps, unclaimed};

/// Repeats of the same number tolerated by the ordered-reading check, e.g.
/// a header echoed by a heading line right after it.
pub const MAX_CONSECUTIVE_REPEATS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceReport {
    pub detected_numbers: Vec<u32>,
    pub forms_single_continuous_sequence: bool,
    pub missing_numbers: Vec<u32>,
    /// Gaps too wide to list in `missing_numbers`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlisted_gaps: Vec<RangeInclusive<u32>>,
    /// Numbers appear in reading order, each the previous one or its successor.
    pub reads_in_order: bool,
}

impl SequenceReport {
    pub fn missing_count(&self) -> usize {
        self.unlisted_gaps
            .iter()
            .map(|span| (span.end() - span.start()) as usize + 1)
            .sum::<usize>()
            + self.missing_numbers.len()
    }
}

/// Compares `numbers` against the full run `min..=max`, gap by gap.
pub fn check_sequence_integrity(numbers: &[u32]) -> SequenceReport {
    let reads_in_order = reads_in_order(numbers, MAX_CONSECUTIVE_REPEATS);

    if numbers.len() < 2 {
        return SequenceReport {
            detected_numbers: numbers.to_vec(),
            forms_single_continuous_sequence: true,
            missing_numbers: Vec::new(),
            unlisted_gaps: Vec::new(),
            reads_in_order,
        };
    }

    let (missing_numbers, unlisted_gaps) = unclaimed(&internal_gaps(numbers), |_| false);

    SequenceReport {
        detected_numbers: numbers.to_vec(),
        forms_single_continuous_sequence: missing_numbers.is_empty() && unlisted_gaps.is_empty(),
        missing_numbers,
        unlisted_gaps,
        reads_in_order,
    }
}

/// Stricter reading: every step is +1, or a repeat of the same number at
/// most `max_repeats` times in a row.
pub fn reads_in_order(numbers: &[u32], max_repeats: usize) -> bool {
    let mut repeats = 0;
    for pair in numbers.windows(2) {
        if pair[0].checked_add(1) == Some(pair[1]) {
            repeats = 0;
        } else if pair[1] == pair[0] {
            repeats += 1;
            if repeats > max_repeats {
                return false;
            }
        } else {
            return false;
        }
    }
    true
}
