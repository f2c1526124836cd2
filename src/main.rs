use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use film_resolver::config::{AppConfig, CliConfig, FileConfig};
use film_resolver::{
    metrics, reference_index, ExtractorRegistry, FilmJob, FilmMatcher, FilmRecord, TaxonomyTables,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON job file: the local film and the scraped pages.
    #[clap(value_parser = parse_path)]
    pub job_file: PathBuf,

    /// Path to a TOML config file. Values in it override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to a JSON reference index snapshot.
    #[clap(long, value_parser = parse_path, conflicts_with = "index_url")]
    pub index_file: Option<PathBuf>,

    /// Base URL of a reference index HTTP API.
    #[clap(long)]
    pub index_url: Option<String>,

    /// Name of the extractor used to read the scraped pages.
    #[clap(long)]
    pub extractor: Option<String>,

    /// Path to a TOML file extending the built-in taxonomy tables.
    #[clap(long, value_parser = parse_path)]
    pub taxonomy_file: Option<PathBuf>,

    /// Log duration mismatches instead of rejecting the page.
    #[clap(long)]
    pub no_duration_match: bool,

    /// Print the collected metrics to stderr when done.
    #[clap(long)]
    pub print_metrics: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            index_file: self.index_file.clone(),
            index_url: self.index_url.clone(),
            extractor: self.extractor.clone(),
            taxonomy_file: self.taxonomy_file.clone(),
            no_duration_match: self.no_duration_match,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // stdout carries the enriched record, logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;
    info!("Using extractor '{}'", config.extractor);

    let taxonomy = match &config.taxonomy_file {
        Some(path) => TaxonomyTables::from_file(path)?,
        None => TaxonomyTables::builtin()?,
    };
    let registry = ExtractorRegistry::with_builtin();
    let extractor = registry.get(&config.extractor)?;
    let index = reference_index::open(&config.reference_index)?;

    metrics::init_metrics();

    let job = FilmJob::load(&cli_args.job_file)?;
    let mut record = FilmRecord::new(job.film).context("Invalid film in job file")?;
    info!(
        "Processing '{}' ({} candidate pages)",
        record.title,
        job.pages.len()
    );

    let matcher = FilmMatcher::new(&config.matching, &taxonomy, index.as_ref());
    let enriched = matcher.process(&mut record, &job.pages, extractor);

    if cli_args.print_metrics {
        eprintln!("{}", metrics::gather_text());
    }

    match enriched {
        Some(enriched) => {
            println!("{}", serde_json::to_string_pretty(&enriched)?);
            Ok(())
        }
        None => {
            info!("No candidate page matched '{}'", record.title);
            std::process::exit(1);
        }
    }
}
