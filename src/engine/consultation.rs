use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::bridge::{BridgeOutcome, resolve_bridge};
use super::chunks::ArticleChunk;
use super::gap_filler::RankedMention;
use super::integrity::{SequenceReport, check_sequence_integrity};
use super::record::{
    AnalysisOptions, ArticleRecord, CompletionSource, RecordAnalysis, analyse_record,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberSource {
    Header,
    Range,
    TitleRange,
    InternalGap,
    Bridge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub record_id: i64,
    pub article_number: u32,
    pub source: NumberSource,
    pub evidence: Option<RankedMention>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Fresh,
    DuplicateOf(i64),
}

/// Every confirmed number of a consultation, keyed by `(record_id, number)`,
/// plus the first record that emitted each number.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsultationLedger {
    #[serde(serialize_with = "entries_in_key_order")]
    entries: BTreeMap<(i64, u32), LedgerEntry>,
    #[serde(skip)]
    owners: BTreeMap<u32, i64>,
}

fn entries_in_key_order<S: Serializer>(
    entries: &BTreeMap<(i64, u32), LedgerEntry>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(entries.values())
}

impl ConsultationLedger {
    pub fn record(&mut self, entry: LedgerEntry) {
        self.entries
            .entry((entry.record_id, entry.article_number))
            .or_insert(entry);
    }

    pub fn get(&self, record_id: i64, article_number: u32) -> Option<&LedgerEntry> {
        self.entries.get(&(record_id, article_number))
    }

    pub fn entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Claims `article_number` for emission from `record_id`. The first
    /// record to claim a number owns it; later claims by another record are
    /// duplicates.
    pub fn claim(&mut self, record_id: i64, article_number: u32) -> Claim {
        match self.owners.get(&article_number) {
            Some(owner) if *owner != record_id => Claim::DuplicateOf(*owner),
            Some(_) => Claim::Fresh,
            None => {
                self.owners.insert(article_number, record_id);
                Claim::Fresh
            }
        }
    }

    fn register(&mut self, analysis: &RecordAnalysis) {
        let record_id = analysis.record_id;
        for number in &analysis.initial_numbers {
            self.record(LedgerEntry {
                record_id,
                article_number: *number,
                source: NumberSource::Header,
                evidence: None,
            });
        }
        for number in &analysis.range_declared {
            self.record(LedgerEntry {
                record_id,
                article_number: *number,
                source: NumberSource::Range,
                evidence: None,
            });
        }
        let ranked = [
            (NumberSource::TitleRange, &analysis.title_completions),
            (NumberSource::InternalGap, &analysis.gap_completions),
            (NumberSource::Bridge, &analysis.bridged),
        ];
        for (source, found) in ranked {
            for mention in found {
                self.record(LedgerEntry {
                    record_id,
                    article_number: mention.article_number,
                    source,
                    evidence: Some(mention.clone()),
                });
            }
        }
    }
}

/// How often each repair mechanism contributed across a consultation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MechanismCounts {
    pub start_of_line_headers: usize,
    pub title_range_completions: usize,
    pub internal_gap_completions: usize,
    pub range_declared_numbers: usize,
    pub bridge_completions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BridgeReport {
    pub left_record_id: i64,
    pub right_record_id: i64,
    #[serde(flatten)]
    pub outcome: BridgeOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultationAnalysis {
    pub consultation_id: i64,
    pub records: Vec<RecordAnalysis>,
    pub bridges: Vec<BridgeReport>,
    pub ledger: ConsultationLedger,
    pub before: SequenceReport,
    pub after: SequenceReport,
}

impl ConsultationAnalysis {
    pub fn mechanism_counts(&self) -> MechanismCounts {
        self.records
            .iter()
            .fold(MechanismCounts::default(), |mut counts, record| {
                counts.start_of_line_headers += record.initial_numbers.len();
                counts.title_range_completions += record.title_completions.len();
                counts.internal_gap_completions += record.gap_completions.len();
                counts.range_declared_numbers += record.range_declared.len();
                counts.bridge_completions += record.bridged.len();
                counts
            })
    }

    pub fn record(&self, record_id: i64) -> Option<&RecordAnalysis> {
        self.records
            .iter()
            .find(|analysis| analysis.record_id == record_id)
    }
}

/// Analyses each record, bridges consecutive-id neighbours left to right and
/// reports the consultation-wide sequence before and after repair.
pub fn analyse_consultation(
    consultation_id: i64,
    records: &[ArticleRecord],
    options: &AnalysisOptions,
) -> ConsultationAnalysis {
    let mut analyses = records
        .iter()
        .map(|record| analyse_record(record, options))
        .collect::<Vec<RecordAnalysis>>();

    let mut bridges = Vec::new();
    for index in 1..analyses.len() {
        let (head, tail) = analyses.split_at_mut(index);
        let left = &mut head[index - 1];
        let right = &mut tail[0];
        if left.record_id.checked_add(1) != Some(right.record_id) {
            continue;
        }

        let outcome = resolve_bridge(
            &left.confirmed_numbers(),
            &left.mentions,
            &right.confirmed_numbers(),
            &right.mentions,
        );
        if outcome.is_empty() {
            continue;
        }
        if !outcome.unresolved.is_empty() || !outcome.unresolved_unlisted.is_empty() {
            debug!(
                consultation_id,
                left = left.record_id,
                right = right.record_id,
                unresolved = ?outcome.unresolved,
                unlisted = ?outcome.unresolved_unlisted,
                "bridge gap left unresolved"
            );
        }

        left.bridged.extend(outcome.left.iter().cloned());
        right.bridged.extend(outcome.right.iter().cloned());
        bridges.push(BridgeReport {
            left_record_id: left.record_id,
            right_record_id: right.record_id,
            outcome,
        });
    }

    let mut ledger = ConsultationLedger::default();
    for analysis in &analyses {
        ledger.register(analysis);
    }

    let before = check_sequence_integrity(
        &analyses
            .iter()
            .flat_map(|analysis| analysis.initial_numbers.iter().copied())
            .collect::<Vec<u32>>(),
    );
    let after = check_sequence_integrity(
        &analyses
            .iter()
            .flat_map(|analysis| analysis.confirmed_numbers())
            .collect::<Vec<u32>>(),
    );

    debug!(
        consultation_id,
        records = analyses.len(),
        bridges = bridges.len(),
        ledger_entries = ledger.len(),
        continuous_before = before.forms_single_continuous_sequence,
        continuous_after = after.forms_single_continuous_sequence,
        "consultation analysed"
    );

    ConsultationAnalysis {
        consultation_id,
        records: analyses,
        bridges,
        ledger,
        before,
        after,
    }
}

/// One record's contribution to an article dump.
#[derive(Debug, Clone, Serialize)]
pub struct EmittedRecord {
    pub record_id: i64,
    pub title: String,
    pub final_sequence_numbers: Vec<u32>,
    pub source_of_completion: CompletionSource,
    pub chunks: Vec<ArticleChunk>,
    /// Numbers skipped because an earlier record already emitted them.
    pub duplicates: Vec<u32>,
}

/// Chunks each record and emits every article number at most once per
/// consultation. Records with no confirmed number are dropped, or passed
/// through as a single unnumbered block with `include_singletons`.
pub fn emit_articles(
    records: &[ArticleRecord],
    analysis: &mut ConsultationAnalysis,
    include_singletons: bool,
) -> Vec<EmittedRecord> {
    let mut emitted = Vec::new();

    for record in records {
        let Some(record_analysis) = analysis.record(record.id) else {
            continue;
        };
        let final_sequence_numbers = record_analysis.confirmed_numbers();
        let source_of_completion = record_analysis.source_of_completion();

        if final_sequence_numbers.is_empty() {
            if include_singletons {
                emitted.push(EmittedRecord {
                    record_id: record.id,
                    title: record.title.clone(),
                    final_sequence_numbers,
                    source_of_completion,
                    chunks: vec![ArticleChunk {
                        article_number: None,
                        line_index: None,
                        origin: None,
                        header_line: String::new(),
                        body: record.content.clone(),
                    }],
                    duplicates: Vec::new(),
                });
            }
            continue;
        }

        let candidates = record_analysis.chunks(&record.content);
        let mut chunks = Vec::new();
        let mut duplicates = Vec::new();
        for chunk in candidates {
            let Some(number) = chunk.article_number else {
                continue;
            };
            match analysis.ledger.claim(record.id, number) {
                Claim::Fresh => chunks.push(chunk),
                Claim::DuplicateOf(owner) => {
                    debug!(
                        record_id = record.id,
                        owner,
                        number,
                        "duplicate article chunk skipped"
                    );
                    duplicates.push(number);
                }
            }
        }

        emitted.push(EmittedRecord {
            record_id: record.id,
            title: record.title.clone(),
            final_sequence_numbers,
            source_of_completion,
            chunks,
            duplicates,
        });
    }

    emitted
}
