use clap::Parser;
use color_eyre::eyre::Result;
use config::Config;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use itertools::Itertools;
use pipeline::{Pipeline, SourceReport};
use records::Dataset;
use sink::{FileSink, Format, RecordSink};
use std::path::PathBuf;
use tracing::{debug, info};

mod bucket;
mod config;
mod errors;
mod pipeline;
mod records;
mod sink;
mod sources;
mod stats;
mod words;

/// Computes letter ratings and word scores for 4 to 7 letter Russian words
/// and writes them out for loading into a database.
#[derive(Parser, Debug)]
#[command(name = "wordstat", version, about)]
struct Cli {
    /// Word lists with one candidate word per line
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// JSON config file [default: wordstat.json if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, overrides the config
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Output path, `-` for stdout; overrides the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of top scoring words per length to show in the summary
    #[arg(long)]
    top: Option<usize>,

    /// More logging, repeat for debug output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    errors::install_hooks()?;
    let cli = Cli::parse();
    errors::install_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;
    if let Some(source) = &config.source {
        info!(path = %source.display(), "using config file");
    }
    debug!(?config, "loaded configuration");
    let format = cli.format.unwrap_or(config.output.format);
    let output = cli.output.unwrap_or(config.output.path);
    let top = cli.top.unwrap_or(config.summary.top);

    let sources = sources::open_sources(&cli.files)?;
    for source in &sources {
        debug!(source = %source.name(), bytes = source.size(), "opened source");
    }

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
    };

    progress.set_style(ProgressStyle::with_template(
        "{msg:20!} {wide_bar} {bytes}/{total_bytes}",
    )?);
    let mut pipeline = Pipeline::new();
    let reports = sources
        .into_iter()
        .map(|source| {
            let name = source.name();
            pipeline.ingest(source.reader(&progress), &name)
        })
        .collect_vec();

    progress.reset();
    progress.set_message("scoring");
    progress.set_style(ProgressStyle::with_template(
        "{msg:20!} {wide_bar} {pos}/{len} words",
    )?);
    for len in bucket::WORD_LENGTHS {
        if let Some(bucket) = pipeline.bucket(len) {
            info!(len, words = bucket.word_count(), slots = bucket.slots(), "filled bucket");
        }
    }
    let dataset = pipeline.finish(&progress);
    progress.finish_and_clear();

    let mut sink = FileSink::new(output, format);
    sink.write(&dataset)?;
    info!(path = %sink.path().display(), ?format, "wrote dataset");

    if !cli.quiet {
        print_summary(&dataset, &reports, top, &sink);
    }
    Ok(())
}

fn print_summary(dataset: &Dataset, reports: &[SourceReport], top: usize, sink: &FileSink) {
    let lines: usize = reports.iter().map(|r| r.lines).sum();
    let interrupted = reports.iter().filter(|r| r.interrupted).count();
    eprintln!(
        "{} {lines} lines from {} file(s)",
        "read".bold(),
        reports.len()
    );
    if interrupted > 0 {
        eprintln!(
            "{} {interrupted} file(s) could not be read to the end",
            "warning".yellow().bold()
        );
    }

    for bucket in &dataset.buckets {
        let best = dataset
            .top_words(bucket.len, top)
            .into_iter()
            .format_with(", ", |record, f| {
                f(&format_args!("{} {}", record.word, record.score.to_string().dark_grey()))
            });
        eprintln!(
            "{} {:>7} words  {best}",
            format!("{}-letter", bucket.len).bold(),
            bucket.words.len()
        );
    }

    if sink.is_stdout() {
        return;
    }
    eprintln!(
        "{} {}",
        "wrote".green().bold(),
        sink.path().display()
    );
}
