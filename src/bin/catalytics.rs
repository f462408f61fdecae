//! Catalytics CLI - Command-line interface for Catalytics
//!
//! Commands:
//! - analyze: Run the full analysis battery over a catalog and print the report
//! - table: Emit the analysis-ready table (NDJSON or CSV)
//! - validate: Validate raw items against the input contract
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use catalytics::hypotheses::TestOutcome;
use catalytics::pipeline::{AnalyzerConfig, CatalogAnalyzer};
use catalytics::record::{RawItem, RawItemAdapter};
use catalytics::report::{table_to_csv, AnalysisReport};
use catalytics::types::Category;
use catalytics::{AnalyticsError, PRODUCER_NAME, SCHEMA_VERSION, VERSION};

/// Catalytics - Catalog analytics engine for creator engagement hypothesis testing
#[derive(Parser)]
#[command(name = "catalytics")]
#[command(version = VERSION)]
#[command(about = "Analyze a creator catalog and test engagement hypotheses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis battery and print the report
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format (defaults to text on a TTY, json otherwise)
        #[arg(long)]
        output_format: Option<ReportFormat>,

        /// Share of the catalog sampled by the keyword analysis
        #[arg(long, default_value = "0.1")]
        top_fraction: f64,

        /// Number of keywords reported
        #[arg(long, default_value = "15")]
        keywords: usize,

        /// First category of the pairwise comparison
        #[arg(long, default_value = "tutorial")]
        pair_a: CategoryArg,

        /// Second category of the pairwise comparison
        #[arg(long, default_value = "career")]
        pair_b: CategoryArg,
    },

    /// Emit the analysis-ready table
    Table {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Table output format
        #[arg(long, default_value = "ndjson")]
        output_format: TableFormat,
    },

    /// Validate raw items against the input contract
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one item per line)
    Ndjson,
    /// JSON array of items
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable report
    Text,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum TableFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// Comma-separated values
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaType {
    /// Input schema (catalog.raw_item.v1)
    Input,
    /// Report schema
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Tutorial,
    Career,
    Project,
    Tools,
    QaLivestream,
    Advice,
    Other,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Tutorial => Category::Tutorial,
            CategoryArg::Career => Category::Career,
            CategoryArg::Project => Category::Project,
            CategoryArg::Tools => Category::Tools,
            CategoryArg::QaLivestream => Category::QaLivestream,
            CategoryArg::Advice => Category::Advice,
            CategoryArg::Other => Category::Other,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CatalyticsCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            input_format,
            output_format,
            top_fraction,
            keywords,
            pair_a,
            pair_b,
        } => cmd_analyze(
            &input,
            input_format,
            output_format,
            AnalyzerConfig {
                top_fraction,
                keyword_limit: keywords,
                pair_a: pair_a.into(),
                pair_b: pair_b.into(),
                ..AnalyzerConfig::default()
            },
        ),

        Commands::Table {
            input,
            input_format,
            output_format,
        } => cmd_table(&input, input_format, output_format),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => {
            cmd_schema(schema_type);
            Ok(())
        }
    }
}

fn cmd_analyze(
    input: &Path,
    input_format: InputFormat,
    output_format: Option<ReportFormat>,
    config: AnalyzerConfig,
) -> Result<(), CatalyticsCliError> {
    let items = load_items(input, input_format)?;
    let analyzer = CatalogAnalyzer::with_config(&items, config)?;
    let report = analyzer.report();

    let format = output_format.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdout) {
            ReportFormat::Text
        } else {
            ReportFormat::Json
        }
    });

    match format {
        ReportFormat::Text => print!("{}", render_text(&report)),
        ReportFormat::Json => println!("{}", report.to_json()?),
        ReportFormat::JsonPretty => println!("{}", report.to_json_pretty()?),
    }

    Ok(())
}

fn cmd_table(
    input: &Path,
    input_format: InputFormat,
    output_format: TableFormat,
) -> Result<(), CatalyticsCliError> {
    let items = load_items(input, input_format)?;
    let analyzer = CatalogAnalyzer::new(&items)?;

    match output_format {
        TableFormat::Ndjson => {
            for record in analyzer.table() {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        TableFormat::Csv => print!("{}", table_to_csv(analyzer.table())),
    }

    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), CatalyticsCliError> {
    let items = load_items(input, input_format)?;
    let issues = RawItemAdapter::validate_items(&items);

    let report = ValidationReport {
        total_items: items.len(),
        valid_items: items.len() - issues.len(),
        invalid_items: issues.len(),
        errors: issues
            .iter()
            .map(|issue| ValidationErrorDetail {
                index: issue.index,
                item_id: issue.item_id.clone(),
                error: issue.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total items:   {}", report.total_items);
        println!("Valid items:   {}", report.valid_items);
        println!("Invalid items: {}", report.invalid_items);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Item {} (index {}): {}", err.item_id, err.index, err.error);
            }
        }
    }

    if report.invalid_items > 0 {
        Err(CatalyticsCliError::ValidationFailed(report.invalid_items))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {}", SCHEMA_VERSION);
            println!();
            println!("One JSON object per published media item:");
            println!();
            println!("  id         - opaque identifier, unique within a run");
            println!("  title      - free text, drives category classification");
            println!("  views      - non-negative view count");
            println!("  likes      - non-negative like count");
            println!("  comments   - non-negative comment count");
            println!("  duration   - compact encoding, e.g. PT15M30S");
            println!("  published  - ISO-8601 timestamp");
            println!("  description, tags - optional");
        }
        SchemaType::Report => {
            println!("Report Schema");
            println!();
            println!("- report_version, producer {{ name, version, instance_id }}, computed_at");
            println!("- item_count, summary (describe rows per metric)");
            println!("- by_category / by_day group tables");
            println!("- top_by_views / top_by_engagement item tables");
            println!("- duration_engagement: correlations + verdict");
            println!("- day_of_week: ANOVA, post-hoc pairs, recommendation");
            println!("- category_pair: group stats, t-test, rank-sum, Cohen's d, verdict");
            println!("- category_anova: F-statistic, p-value, significance");
            println!("- keywords: top tokens in the top-viewed slice");
            println!();
            println!("Each test outcome is either completed or indeterminate with a reason.");
        }
    }
}

// Helper functions

fn load_items(input: &Path, format: InputFormat) -> Result<Vec<RawItem>, CatalyticsCliError> {
    let data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let items = match format {
        InputFormat::Ndjson => RawItemAdapter::parse_ndjson(&data)?,
        InputFormat::Json => RawItemAdapter::parse_array(&data)?,
    };

    if items.is_empty() {
        return Err(CatalyticsCliError::NoItems);
    }

    Ok(items)
}

fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let line = "=".repeat(72);

    out.push_str(&format!("{line}\nCATALOG ANALYSIS ({} items)\n{line}\n\n", report.item_count));

    out.push_str("Summary statistics\n------------------\n");
    for row in &report.summary {
        out.push_str(&format!(
            "{:<20} mean {:>14.4}  median {:>14.4}  std {:>14.4}\n",
            row.metric, row.mean, row.median, row.std_dev
        ));
    }

    out.push_str("\nCategory performance\n--------------------\n");
    for group in &report.by_category {
        out.push_str(&format!(
            "{:<16} n={:<4} mean views {:>12.0}  engagement {:>8.4}\n",
            group.key, group.count, group.mean_views, group.mean_engagement_rate
        ));
    }

    out.push_str("\nTop items by views\n------------------\n");
    for item in &report.top_by_views {
        out.push_str(&format!("{:>10}  {}\n", item.views, item.title));
    }

    out.push_str("\nHypothesis 1: shorter items engage more\n");
    match &report.duration_engagement {
        TestOutcome::Completed(result) => {
            out.push_str(&format!(
                "  r(duration, engagement) = {:.4} (p = {:.4}) -> {:?}\n",
                result.engagement_rate.r, result.engagement_rate.p_value, result.verdict
            ));
        }
        TestOutcome::Indeterminate { reason } => {
            out.push_str(&format!("  indeterminate: {reason}\n"));
        }
    }

    out.push_str("\nHypothesis 2: publish day affects reach\n");
    match &report.day_of_week {
        TestOutcome::Completed(result) => {
            out.push_str(&format!(
                "  ANOVA F = {:.4}, p = {:.4} -> {:?}\n",
                result.f_statistic, result.p_value, result.verdict
            ));
            if let Some(recommendation) = &result.recommendation {
                out.push_str(&format!(
                    "  recommendation: publish on {} (avoid {})\n",
                    recommendation.best_day, recommendation.worst_day
                ));
            }
            for pair in result.pairwise.iter().filter(|p| p.significant) {
                out.push_str(&format!(
                    "  {} vs {}: diff = {:.0}, adjusted p = {:.4}\n",
                    pair.day_a, pair.day_b, pair.mean_diff, pair.adjusted_p
                ));
            }
        }
        TestOutcome::Indeterminate { reason } => {
            out.push_str(&format!("  indeterminate: {reason}\n"));
        }
    }

    out.push_str("\nHypothesis 3: category pairwise comparison\n");
    match &report.category_pair {
        TestOutcome::Completed(result) => {
            out.push_str(&format!(
                "  {} (n={}, mean {:.0}) vs {} (n={}, mean {:.0})\n",
                result.group_a.category,
                result.group_a.count,
                result.group_a.mean_views,
                result.group_b.category,
                result.group_b.count,
                result.group_b.mean_views,
            ));
            out.push_str(&format!(
                "  rank-sum U = {:.1}, p = {:.4} (t-test p = {:.4} for comparison)\n",
                result.u_statistic, result.u_p_value, result.t_p_value
            ));
            out.push_str(&format!(
                "  Cohen's d = {:.4} ({}) -> {:?}\n",
                result.cohens_d,
                result.effect_size.as_str(),
                result.verdict
            ));
        }
        TestOutcome::Indeterminate { reason } => {
            out.push_str(&format!("  indeterminate: {reason}\n"));
        }
    }

    out.push_str("\nAll-category ANOVA\n");
    match &report.category_anova {
        TestOutcome::Completed(result) => {
            out.push_str(&format!(
                "  F = {:.4}, p = {:.4}, significant: {}\n",
                result.f_statistic, result.p_value, result.significant
            ));
        }
        TestOutcome::Indeterminate { reason } => {
            out.push_str(&format!("  indeterminate: {reason}\n"));
        }
    }

    out.push_str(&format!(
        "\nTop keywords ({} items sampled)\n-------------------------------\n",
        report.keywords.sampled_items
    ));
    for keyword in &report.keywords.keywords {
        out.push_str(&format!("{:<24} {:>4}\n", keyword.token, keyword.count));
    }

    out
}

// Error types

#[derive(Debug)]
enum CatalyticsCliError {
    Io(io::Error),
    Analytics(AnalyticsError),
    Json(serde_json::Error),
    NoItems,
    ValidationFailed(usize),
}

impl From<io::Error> for CatalyticsCliError {
    fn from(e: io::Error) -> Self {
        CatalyticsCliError::Io(e)
    }
}

impl From<AnalyticsError> for CatalyticsCliError {
    fn from(e: AnalyticsError) -> Self {
        CatalyticsCliError::Analytics(e)
    }
}

impl From<serde_json::Error> for CatalyticsCliError {
    fn from(e: serde_json::Error) -> Self {
        CatalyticsCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CatalyticsCliError> for CliError {
    fn from(e: CatalyticsCliError) -> Self {
        match e {
            CatalyticsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CatalyticsCliError::Analytics(e) => CliError {
                code: "ANALYTICS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches the {SCHEMA_VERSION} schema")),
            },
            CatalyticsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CatalyticsCliError::NoItems => CliError {
                code: "NO_ITEMS".to_string(),
                message: "No items found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CatalyticsCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{count} items failed validation"),
                hint: Some(format!("Run '{PRODUCER_NAME} validate' for details")),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_items: usize,
    valid_items: usize,
    invalid_items: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    item_id: String,
    error: String,
}
