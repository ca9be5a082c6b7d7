use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};

use corpus_clean::cli::{CleanArgs, Cli, Command, FilterArgs, SummaryArgs};
use corpus_clean::{Cleaner, Resources, corpus};

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // stdout carries the cleaned stream; logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_max_level(level);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn clean(args: &CleanArgs) -> Result<()> {
    let config = args.to_config();
    let options = args.resource_options();
    info!(?config, resources = %options.dir.display(), "Starting clean");

    let resources = Resources::load(&config, &options).with_context(|| {
        format!("Failed to load resources from {}", options.dir.display())
    })?;
    let mut cleaner = Cleaner::new(config, resources)?;

    let mut out = BufWriter::new(io::stdout().lock());
    match args.input_path() {
        Some(path) => cleaner.run(open(path)?, &mut out),
        None => cleaner.run(io::stdin().lock(), &mut out),
    }
    .context("Failed to write cleaned output")?;
    Ok(())
}

fn summary(args: &SummaryArgs) -> Result<()> {
    let words = corpus::summary(open(&args.file)?, args.single_doc)?;
    info!(distinct = words.len(), "Summary complete");

    let mut out = BufWriter::new(io::stdout().lock());
    for w in &words {
        writeln!(out, "{} {} {}", w.word, w.count, w.documents)?;
    }
    out.flush()?;
    Ok(())
}

fn doccount(args: &SummaryArgs) -> Result<()> {
    let counts = corpus::doccount(open(&args.file)?, args.single_doc)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for count in counts {
        writeln!(out, "{count}")?;
    }
    out.flush()?;
    Ok(())
}

fn filter(args: &FilterArgs) -> Result<()> {
    let content = fs::read_to_string(&args.words)
        .with_context(|| format!("Failed to read {}", args.words.display()))?;
    let words: HashSet<String> = content
        .lines()
        .map(str::trim_end)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    let mut out = BufWriter::new(io::stdout().lock());
    let removed = corpus::filter_words(open(&args.infile)?, &words, &mut out)?;
    info!(removed, "Filter complete");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match &cli.command {
        Command::Clean(args) => clean(args),
        Command::Summary(args) => summary(args),
        Command::Doccount(args) => doccount(args),
        Command::Filter(args) => filter(args),
    }
}
