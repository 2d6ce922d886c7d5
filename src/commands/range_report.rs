use anyhow::Result;
use tracing::info;

use crate::cli::RangeReportArgs;
use crate::commands::{BatchRun, selected_consultations};
use crate::engine::{AnalysisOptions, ArticleRecord, analyse_record};
use crate::model::RangeReportRow;
use crate::store::ArticleStore;
use crate::util::{json_list, write_csv};

pub fn run(args: RangeReportArgs) -> Result<()> {
    let store = ArticleStore::open(&args.store.db)?;
    let options = args.analysis.options();
    let mut batch = BatchRun::start("range-report", &args.store, &args.analysis, false)?;

    let consultation_ids = selected_consultations(&store, args.store.consultation_id)?;
    let mut rows = Vec::new();
    batch.for_each_consultation(&store, &consultation_ids, |consultation_id, records| {
        let report = report_consultation(&store, consultation_id, &records, &options)?;
        let written = report.len();
        rows.extend(report);
        Ok(written)
    });

    let perfect = rows.iter().filter(|row| row.perfect_after_refinement).count();
    info!(
        titles_with_ranges = rows.len(),
        perfect,
        "range report complete"
    );

    let csv_path = batch.output_path(&args.outbase, "csv");
    write_csv(&csv_path, &rows)?;
    info!(path = %csv_path.display(), "wrote range report");

    batch.finish()?;
    Ok(())
}

/// One row per record whose title declares an "(a-b)" range.
pub(crate) fn report_consultation(
    store: &ArticleStore,
    consultation_id: i64,
    records: &[ArticleRecord],
    options: &AnalysisOptions,
) -> Result<Vec<RangeReportRow>> {
    let analyses = records
        .iter()
        .map(|record| (record, analyse_record(record, options)))
        .filter(|(_, analysis)| !analysis.title_expected.is_empty())
        .collect::<Vec<_>>();
    if analyses.is_empty() {
        return Ok(Vec::new());
    }

    let consultation_url = store.consultation_meta(consultation_id)?.url;
    let mut rows = Vec::with_capacity(analyses.len());

    for (record, analysis) in analyses {
        let missing_initial = analysis
            .title_expected
            .iter()
            .copied()
            .filter(|number| analysis.initial_numbers.binary_search(number).is_err())
            .collect::<Vec<u32>>();
        let missing_remaining = analysis.missing_vs_title();

        rows.push(RangeReportRow {
            consultation_id,
            consultation_url: consultation_url.clone(),
            article_id: record.id,
            article_title: record.title.clone(),
            expected_sequence_from_title: json_list(&analysis.title_expected),
            found_sequence_in_content_initial: json_list(&analysis.initial_numbers),
            missing_articles_initial: json_list(&missing_initial),
            missing_articles_found_by_mentions_count: analysis.title_completions.len(),
            refined_sequence_after_mentions: json_list(&analysis.confirmed_numbers()),
            missing_articles_remaining_count: missing_remaining.len(),
            missing_articles_remaining: json_list(&missing_remaining),
            perfect_after_refinement: missing_remaining.is_empty(),
        });
    }

    Ok(rows)
}
