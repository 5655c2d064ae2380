use std::io::Write;
use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use log::{error, info, LevelFilter};

use rowmatch::matcher::{apply_clusters, ClusterAssigner};
use rowmatch::normalize::{MyMemoryTranslator, Normalizer, ScriptDetector};
use rowmatch::{parser, report, MatchConfig, Result, SimilarityMetric};

/// Matches rows of a CSV file on a chosen field and writes one line per
/// group of duplicates to the output file.
#[derive(Parser, Debug)]
#[command(
    name = "find_duplicates",
    version,
    about = "Groups near-duplicate rows of a CSV file by fuzzy-matching a chosen field"
)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Output report file
    output: PathBuf,

    /// Field whose values are compared for similarity
    #[arg(short = 'm', long, default_value = "Address")]
    match_field: String,

    /// Field whose values are printed in the report
    #[arg(short = 'd', long, default_value = "Name")]
    display_field: String,

    /// Minimum similarity score (exclusive), strictly between 0 and 100
    #[arg(short = 't', long, default_value_t = 70)]
    threshold: u32,

    /// Similarity metric used for scoring
    #[arg(long, value_enum, default_value_t = SimilarityMetric::TokenSort)]
    metric: SimilarityMetric,
}

fn init_logging() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = MatchConfig {
        match_field: cli.match_field,
        display_field: cli.display_field,
        threshold: cli.threshold,
        metric: cli.metric,
    };
    config.validate()?;

    let mut table = parser::load_table(&cli.input, &config)?;
    info!(
        "Matching {} rows on field '{}' with threshold {} ({})",
        table.len(),
        config.match_field,
        config.threshold,
        config.metric.as_str()
    );

    let translator = MyMemoryTranslator::new()?;
    let normalizer = Normalizer::new(ScriptDetector::new(), translator);
    normalizer.normalize_table(&mut table);

    let assigner = ClusterAssigner::new(&config);
    let assigned = assigner.assign(&table);
    apply_clusters(&mut table, &assigned);

    report::write_report(&table, &cli.output)?;
    info!("Report written to {}", cli.output.display());
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}
