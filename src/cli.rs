use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::engine::{AnalysisOptions, GrammarKind, LocatorOptions};

#[derive(Parser, Debug)]
#[command(
    name = "arthra",
    version,
    about = "Article sequence reconstruction for Greek consultation documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Check(CheckArgs),
    Extract(ExtractArgs),
    RangeReport(RangeReportArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long, default_value = "deliberation_data_gr_markdownify.db")]
    pub db: PathBuf,

    #[arg(long, default_value = ".cache/arthra")]
    pub out_dir: PathBuf,

    #[arg(long)]
    pub consultation_id: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    #[arg(long, default_value_t = false)]
    pub include_range_headers: bool,

    #[arg(long, default_value_t = false)]
    pub track_quote_blocks: bool,

    #[arg(long, value_enum, default_value_t = GrammarMode::Digits)]
    pub grammar: GrammarMode,
}

impl AnalysisArgs {
    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            grammar: self.grammar.kind(),
            locator: LocatorOptions {
                include_range_headers: self.include_range_headers,
                track_quote_blocks: self.track_quote_blocks,
                ..LocatorOptions::default()
            },
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum GrammarMode {
    Digits,
    Words,
}

impl GrammarMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Digits => "digits",
            Self::Words => "words",
        }
    }

    pub fn kind(self) -> GrammarKind {
        match self {
            Self::Digits => GrammarKind::Digits,
            Self::Words => GrammarKind::Words,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[arg(long, default_value = "consultation_sequence_check")]
    pub outbase: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[arg(long, default_value = "consultation_article_dump")]
    pub outbase: String,

    #[arg(long, default_value_t = false)]
    pub include_singletons: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RangeReportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[arg(long, default_value = "partial_range_report")]
    pub outbase: String,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    pub path: PathBuf,

    #[arg(long, default_value = "")]
    pub title: String,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Zero-based line indices to treat as a table of contents.
    #[arg(long = "index-line")]
    pub index_lines: Vec<usize>,
}
