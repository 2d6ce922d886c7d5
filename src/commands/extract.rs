use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ExtractArgs;
use crate::commands::{BatchRun, selected_consultations};
use crate::engine::{AnalysisOptions, ArticleRecord, analyse_consultation, emit_articles};
use crate::model::{ArticleDumpRow, ArticleJson};
use crate::store::ArticleStore;
use crate::util::{json_list, write_csv, write_jsonl};

pub fn run(args: ExtractArgs) -> Result<()> {
    let store = ArticleStore::open(&args.store.db)?;
    let options = args.analysis.options();
    let mut batch = BatchRun::start(
        "extract",
        &args.store,
        &args.analysis,
        args.include_singletons,
    )?;

    let consultation_ids = selected_consultations(&store, args.store.consultation_id)?;
    let mut rows = Vec::new();
    let mut articles = Vec::new();
    batch.for_each_consultation(&store, &consultation_ids, |consultation_id, records| {
        let dump = dump_consultation(
            &store,
            consultation_id,
            &records,
            &options,
            args.include_singletons,
        )?;
        let written = dump.len();
        for (row, article) in dump {
            rows.push(row);
            articles.push(article);
        }
        Ok(written)
    });

    let csv_path = batch.output_path(&args.outbase, "csv");
    let jsonl_path = batch.output_path(&args.outbase, "jsonl");
    write_csv(&csv_path, &rows)?;
    write_jsonl(&jsonl_path, &articles)?;
    info!(
        csv = %csv_path.display(),
        jsonl = %jsonl_path.display(),
        articles = rows.len(),
        "wrote article dump"
    );

    batch.finish()?;
    Ok(())
}

/// De-duplicated article chunks of one consultation, one row per chunk.
pub(crate) fn dump_consultation(
    store: &ArticleStore,
    consultation_id: i64,
    records: &[ArticleRecord],
    options: &AnalysisOptions,
    include_singletons: bool,
) -> Result<Vec<(ArticleDumpRow, ArticleJson)>> {
    let meta = store.consultation_meta(consultation_id)?;
    let mut analysis = analyse_consultation(consultation_id, records, options);
    let emitted = emit_articles(records, &mut analysis, include_singletons);

    let mut dump = Vec::new();
    for record in emitted {
        let final_sequence_numbers = json_list(&record.final_sequence_numbers);
        for chunk in &record.chunks {
            let article = ArticleJson {
                article_number: chunk.article_number,
                header: chunk.header_line.clone(),
                body: chunk.body_text().to_string(),
            };
            let article_json = serde_json::to_string(&article).with_context(|| {
                format!("failed to serialize article of record {}", record.record_id)
            })?;

            dump.push((
                ArticleDumpRow {
                    consultation_id,
                    consultation_title: meta.title.clone(),
                    article_id: record.record_id,
                    article_title: record.title.clone(),
                    final_sequence_numbers: final_sequence_numbers.clone(),
                    source_of_completion: record.source_of_completion.as_str().to_string(),
                    article_json,
                },
                article,
            ));
        }
    }

    Ok(dump)
}
