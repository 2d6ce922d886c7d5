//! Article sequence reconstruction: header grammar, mention scanning, header
//! location, gap filling, cross-record bridging, chunking and integrity
//! reporting. Everything here is pure and never fails on text content.

mod bridge;
mod chunks;
mod consultation;
mod gap_filler;
mod grammar;
mod integrity;
mod lines;
mod locator;
mod markup;
mod mentions;
mod record;
#[cfg(test)]
mod tests;
mod word_numerals;

pub use bridge::{BridgeOutcome, bridge_gap, resolve_bridge};
pub use chunks::{ArticleChunk, BoundaryOrigin, reconstruct_chunks};
pub use consultation::{
    Claim, ConsultationAnalysis, ConsultationLedger, EmittedRecord, LedgerEntry, MechanismCounts,
    NumberSource, analyse_consultation, emit_articles,
};
pub use gap_filler::{
    GapFill, MentionPriority, RankedMention, fill_missing, fill_missing_from_mentions,
    internal_gaps, title_range,
};
pub use grammar::{
    DigitHeaderGrammar, HeaderGrammar, HeaderMatch, parse_article_header, parse_header_with,
};
pub use integrity::{SequenceReport, check_sequence_integrity};
pub use locator::{
    LocatorOptions, TrueHeaderLocation, get_true_main_article_header_locations,
    locate_true_headers,
};
pub use mentions::{Mention, find_all_article_mentions, find_mentions_with};
pub use record::{
    AnalysisOptions, ArticleRecord, CompletionSource, GrammarKind, RecordAnalysis,
    analyse_document, analyse_record,
};
pub use word_numerals::{WordNumeralHeaderGrammar, ordinal_value};
