pub mod check;
pub mod extract;
pub mod inspect;
pub mod range_report;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::{AnalysisArgs, GrammarMode, StoreArgs};
use crate::engine::ArticleRecord;
use crate::model::{RunCounts, RunManifest, RunOptions};
use crate::store::ArticleStore;
use crate::util::{
    ensure_directory, now_utc_string, sha256_file, utc_compact_string, write_json_pretty,
};

const MANIFEST_VERSION: u32 = 1;
const PROGRESS_EVERY: usize = 50;

/// Bookkeeping shared by the batch commands: counts, warnings, outputs and
/// the run manifest written at the end.
pub(crate) struct BatchRun {
    command_name: &'static str,
    run_id: String,
    started_at: String,
    compact_ts: String,
    db_path: PathBuf,
    db_sha256: String,
    out_dir: PathBuf,
    command: String,
    options: RunOptions,
    pub(crate) counts: RunCounts,
    pub(crate) warnings: Vec<String>,
    outputs: Vec<String>,
}

impl BatchRun {
    pub(crate) fn start(
        command_name: &'static str,
        store: &StoreArgs,
        analysis: &AnalysisArgs,
        include_singletons: bool,
    ) -> Result<Self> {
        let started_ts = Utc::now();
        let compact_ts = utc_compact_string(started_ts);
        let run_id = format!("run-{compact_ts}");

        ensure_directory(&store.out_dir)?;
        let db_sha256 = sha256_file(&store.db)?;

        info!(
            command = command_name,
            run_id = %run_id,
            db = %store.db.display(),
            "starting batch run"
        );

        Ok(Self {
            command_name,
            run_id,
            started_at: now_utc_string(),
            compact_ts,
            db_path: store.db.clone(),
            db_sha256,
            out_dir: store.out_dir.clone(),
            command: render_command(command_name, store, analysis, include_singletons),
            options: RunOptions {
                grammar: analysis.grammar.as_str().to_string(),
                include_range_headers: analysis.include_range_headers,
                track_quote_blocks: analysis.track_quote_blocks,
                include_singletons,
                consultation_id: store.consultation_id,
            },
            counts: RunCounts::default(),
            warnings: Vec::new(),
            outputs: Vec::new(),
        })
    }

    pub(crate) fn output_path(&mut self, outbase: &str, extension: &str) -> PathBuf {
        let path = self.out_dir.join(format!("{outbase}.{extension}"));
        self.outputs.push(path.display().to_string());
        path
    }

    /// Visits every selected consultation. A consultation that fails to load
    /// or to process is logged, counted as skipped and left out.
    pub(crate) fn for_each_consultation<F>(
        &mut self,
        store: &ArticleStore,
        consultation_ids: &[i64],
        mut visit: F,
    ) where
        F: FnMut(i64, Vec<ArticleRecord>) -> Result<usize>,
    {
        self.counts.consultations_total = consultation_ids.len();

        for (position, consultation_id) in consultation_ids.iter().copied().enumerate() {
            if position > 0 && position % PROGRESS_EVERY == 0 {
                info!(
                    processed = position,
                    total = consultation_ids.len(),
                    "consultation progress"
                );
            }

            let records = match store.articles_for(consultation_id) {
                Ok(records) => records,
                Err(err) => {
                    self.skip(consultation_id, &err);
                    continue;
                }
            };
            if records.is_empty() {
                continue;
            }
            let record_count = records.len();

            match visit(consultation_id, records) {
                Ok(rows) => {
                    self.counts.consultations_processed += 1;
                    self.counts.records_processed += record_count;
                    self.counts.rows_written += rows;
                }
                Err(err) => self.skip(consultation_id, &err),
            }
        }
    }

    fn skip(&mut self, consultation_id: i64, err: &anyhow::Error) {
        warn!(consultation_id, error = %err, "consultation skipped");
        self.counts.consultations_skipped += 1;
        self.warnings
            .push(format!("consultation {consultation_id} skipped: {err:#}"));
    }

    pub(crate) fn finish(self) -> Result<PathBuf> {
        let manifest_path = self
            .out_dir
            .join("manifests")
            .join(format!("{}_run_{}.json", self.command_name, self.compact_ts));

        let manifest = RunManifest {
            manifest_version: MANIFEST_VERSION,
            run_id: self.run_id,
            command: self.command,
            status: "completed".to_string(),
            started_at: self.started_at,
            completed_at: now_utc_string(),
            db_path: self.db_path.display().to_string(),
            db_sha256: self.db_sha256,
            options: self.options,
            counts: self.counts,
            outputs: self.outputs,
            warnings: self.warnings,
        };
        write_json_pretty(&manifest_path, &manifest)?;

        info!(
            path = %manifest_path.display(),
            processed = manifest.counts.consultations_processed,
            skipped = manifest.counts.consultations_skipped,
            rows = manifest.counts.rows_written,
            "wrote run manifest"
        );
        Ok(manifest_path)
    }
}

pub(crate) fn selected_consultations(
    store: &ArticleStore,
    consultation_id: Option<i64>,
) -> Result<Vec<i64>> {
    match consultation_id {
        Some(id) => Ok(vec![id]),
        None => store.consultation_ids(),
    }
}

fn render_command(
    command_name: &str,
    store: &StoreArgs,
    analysis: &AnalysisArgs,
    include_singletons: bool,
) -> String {
    let mut command = vec![
        "arthra".to_string(),
        command_name.to_string(),
        "--db".to_string(),
        store.db.display().to_string(),
        "--out-dir".to_string(),
        store.out_dir.display().to_string(),
    ];

    if let Some(id) = store.consultation_id {
        command.push("--consultation-id".to_string());
        command.push(id.to_string());
    }
    if include_singletons {
        command.push("--include-singletons".to_string());
    }
    if analysis.include_range_headers {
        command.push("--include-range-headers".to_string());
    }
    if analysis.track_quote_blocks {
        command.push("--track-quote-blocks".to_string());
    }
    if analysis.grammar != GrammarMode::Digits {
        command.push("--grammar".to_string());
        command.push(analysis.grammar.as_str().to_string());
    }

    command.join(" ")
}
