use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SequenceCheckRow {
    pub consultation_id: i64,
    pub consultation_title: String,
    pub initial_continuous: bool,
    pub missing_numbers_initial: String,
    pub continuous_after_refinement: bool,
    pub missing_numbers_after: String,
    pub missing_remaining_count: usize,
    pub start_of_line_headers: usize,
    pub title_range_completions: usize,
    pub internal_gap_completions: usize,
    pub range_declared_numbers: usize,
    pub bridge_completions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDumpRow {
    pub consultation_id: i64,
    pub consultation_title: String,
    pub article_id: i64,
    pub article_title: String,
    pub final_sequence_numbers: String,
    pub source_of_completion: String,
    pub article_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleJson {
    pub article_number: Option<u32>,
    pub header: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeReportRow {
    pub consultation_id: i64,
    pub consultation_url: String,
    pub article_id: i64,
    pub article_title: String,
    pub expected_sequence_from_title: String,
    pub found_sequence_in_content_initial: String,
    pub missing_articles_initial: String,
    pub missing_articles_found_by_mentions_count: usize,
    pub refined_sequence_after_mentions: String,
    pub missing_articles_remaining: String,
    pub missing_articles_remaining_count: usize,
    pub perfect_after_refinement: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub grammar: String,
    pub include_range_headers: bool,
    pub track_quote_blocks: bool,
    pub include_singletons: bool,
    pub consultation_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunCounts {
    pub consultations_total: usize,
    pub consultations_processed: usize,
    pub consultations_skipped: usize,
    pub records_processed: usize,
    pub rows_written: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub command: String,
    pub status: String,
    pub started_at: String,
    pub completed_at: String,
    pub db_path: String,
    pub db_sha256: String,
    pub options: RunOptions,
    pub counts: RunCounts,
    pub outputs: Vec<String>,
    pub warnings: Vec<String>,
}
