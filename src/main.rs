//! Tincture CLI entrypoint.
//!
//! Reads ingredient-label lines from a file (or stdin) and writes one JSON classification per
//! line to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;

use tincture::config::Config;
use tincture::curation::CurationQueue;
use tincture::pipeline::{Classifier, ClassifierOptions};
use tincture::reference::{self, ReferenceData, audit};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Classify ingredient-label lines against the reference dictionaries.
///
/// Reference data location and matching options come from `TINCTURE_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "tincture", version, about, long_about = None)]
struct Cli {
    /// File with one label per line (default: stdin)
    input: Option<PathBuf>,

    /// Write unresolved matches, deduplicated and counted, to this JSON file
    #[arg(long, value_name = "PATH")]
    curation: Option<PathBuf>,

    /// Print the reference-data audit as JSON and exit
    #[arg(long)]
    audit: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        context_radius = config.context_radius,
        case_sensitive = config.case_sensitive,
        priority = %config.priority,
        "Tincture starting"
    );

    let (data, report) = ReferenceData::load_dir(&config.data_dir, config.index_options())
        .with_context(|| format!("loading reference data from {}", config.data_dir.display()))?;

    if args.audit {
        let findings = audit(&data);
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &findings)?;
        writeln!(out)?;
        return Ok(());
    }

    if report.has_rejections() {
        tracing::warn!(
            rejected = report.entry_errors.len(),
            "Some reference entries were skipped"
        );
    }

    let reference = reference::install(data)?;
    let classifier = Classifier::new(reference, ClassifierOptions::from(&config));
    let queue = CurationQueue::default();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for line in reader.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let classification = classifier.classify(text);
        serde_json::to_writer(&mut out, &classification)?;
        writeln!(out)?;
        queue.extend(classification.unresolved);
    }
    out.flush()?;

    if let Some(path) = &args.curation {
        let entries = queue.drain_sorted();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &entries)?;
        writer.flush()?;
        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            "Wrote curation queue"
        );
    }

    let stats = classifier.stats();
    tracing::info!(
        matches = stats.matches,
        resolved = stats.resolved,
        unresolved = stats.unresolved,
        unclassified = stats.unclassified,
        overlaps = stats.overlaps,
        "Tincture finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_input_and_flags() {
        let cli = Cli::try_parse_from([
            "tincture",
            "--audit",
            "--curation",
            "queue.json",
            "labels.txt",
        ])
        .expect("should parse");

        assert!(cli.audit);
        assert_eq!(cli.curation, Some(PathBuf::from("queue.json")));
        assert_eq!(cli.input, Some(PathBuf::from("labels.txt")));
    }

    #[test]
    fn test_cli_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["tincture"]).expect("should parse");

        assert!(!cli.audit);
        assert!(cli.curation.is_none());
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_flag_and_second_input() {
        assert!(Cli::try_parse_from(["tincture", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["tincture", "a.txt", "b.txt"]).is_err());
        assert!(Cli::try_parse_from(["tincture", "--curation"]).is_err());
    }
}
