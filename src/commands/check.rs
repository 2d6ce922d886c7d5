use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CheckArgs;
use crate::commands::{BatchRun, selected_consultations};
use crate::engine::{AnalysisOptions, ArticleRecord, analyse_consultation};
use crate::model::SequenceCheckRow;
use crate::store::ArticleStore;
use crate::util::{json_list, write_csv};

pub fn run(args: CheckArgs) -> Result<()> {
    let store = ArticleStore::open(&args.store.db)?;
    let options = args.analysis.options();
    let mut batch = BatchRun::start("check", &args.store, &args.analysis, false)?;

    let consultation_ids = selected_consultations(&store, args.store.consultation_id)?;
    let mut rows = Vec::new();
    batch.for_each_consultation(&store, &consultation_ids, |consultation_id, records| {
        rows.push(check_consultation(&store, consultation_id, &records, &options)?);
        Ok(1)
    });

    let continuous_before = rows.iter().filter(|row| row.initial_continuous).count();
    let continuous_after = rows
        .iter()
        .filter(|row| row.continuous_after_refinement)
        .count();
    info!(
        consultations = rows.len(),
        continuous_before,
        continuous_after,
        "sequence check complete"
    );

    let csv_path = batch.output_path(&args.outbase, "csv");
    write_csv(&csv_path, &rows)?;
    info!(path = %csv_path.display(), "wrote sequence check");

    batch.finish()?;
    Ok(())
}

/// Consultation-wide before/after integrity with per-mechanism counts.
pub(crate) fn check_consultation(
    store: &ArticleStore,
    consultation_id: i64,
    records: &[ArticleRecord],
    options: &AnalysisOptions,
) -> Result<SequenceCheckRow> {
    let meta = store.consultation_meta(consultation_id)?;
    let analysis = analyse_consultation(consultation_id, records, options);
    let counts = analysis.mechanism_counts();

    debug!(
        consultation_id,
        missing_before = analysis.before.missing_count(),
        missing_after = analysis.after.missing_count(),
        "consultation checked"
    );

    Ok(SequenceCheckRow {
        consultation_id,
        consultation_title: meta.title,
        initial_continuous: analysis.before.forms_single_continuous_sequence,
        missing_numbers_initial: json_list(&analysis.before.missing_numbers),
        continuous_after_refinement: analysis.after.forms_single_continuous_sequence,
        missing_numbers_after: json_list(&analysis.after.missing_numbers),
        missing_remaining_count: analysis.after.missing_count(),
        start_of_line_headers: counts.start_of_line_headers,
        title_range_completions: counts.title_range_completions,
        internal_gap_completions: counts.internal_gap_completions,
        range_declared_numbers: counts.range_declared_numbers,
        bridge_completions: counts.bridge_completions,
    })
}
