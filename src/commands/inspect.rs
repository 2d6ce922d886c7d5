use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InspectArgs;
use crate::engine::{
    AnalysisOptions, ArticleChunk, Mention, RecordAnalysis, SequenceReport, analyse_document,
};

#[derive(Debug, Serialize)]
pub(crate) struct InspectReport {
    pub path: String,
    pub title: String,
    pub grammar: &'static str,
    pub mentions: Vec<Mention>,
    pub analysis: RecordAnalysis,
    pub chunks: Vec<ArticleChunk>,
    pub before: SequenceReport,
    pub after: SequenceReport,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let mut options = args.analysis.options();
    options.locator.index_lines = args.index_lines.iter().copied().collect();

    let report = inspect_text(&args.path.display().to_string(), &args.title, &text, &options);
    info!(
        path = %report.path,
        headers = report.analysis.headers.len(),
        chunks = report.chunks.len(),
        continuous_after = report.after.forms_single_continuous_sequence,
        "document inspected"
    );

    let rendered =
        serde_json::to_string_pretty(&report).context("failed to serialize inspect report")?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn inspect_text(
    path: &str,
    title: &str,
    text: &str,
    options: &AnalysisOptions,
) -> InspectReport {
    let analysis = analyse_document(0, title, text, options);
    InspectReport {
        path: path.to_string(),
        title: title.to_string(),
        grammar: options.grammar.as_str(),
        mentions: analysis.mentions.clone(),
        chunks: analysis.chunks(text),
        before: analysis.report_before(),
        after: analysis.report_after(),
        analysis,
    }
}
