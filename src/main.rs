//! The `corpus-index` command builds word-frequency tallies and inverted
//! indexes from bulk text input.

use std::io;
use std::path::Path;
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use corpus_index::corpus;
use corpus_index::exit_code::ExitCode;
use corpus_index::options::Threads;
use corpus_index::pipeline::{self, IndexSummary, format_bytes, format_count};

mod args;

use crate::args::{Args, Command, IndexArgs};

fn main() {
    if let Err(err) = run() {
        let code = ExitCode::from_error(&err);
        match err.downcast_ref::<clap::Error>() {
            // Help and version displays carry their own formatting.
            Some(clap_err) => {
                clap_err.print().ok();
            }
            None => eprintln!("corpus-index: {err:#}"),
        }
        exit(code.code());
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::try_parse()?;
    match args.command {
        Command::Tally(index_args) => {
            let options = index_args.to_options(IndexArgs::tally_memory_default());
            let summary = pipeline::tally(&index_args.input, &index_args.output, &options)?;
            report(&summary, &index_args.output);
        }
        Command::Invert(index_args) => {
            let options = index_args.to_options(IndexArgs::invert_memory_default());
            let summary = pipeline::invert(&index_args.input, &index_args.output, &options)?;
            report(&summary, &index_args.output);
        }
        Command::Generate(generate_args) => {
            let parts = generate_args
                .num_threads
                .map_or(Threads::All, Threads::from)
                .count();
            corpus::generate(
                &generate_args.dictionary,
                &generate_args.output_dir,
                generate_args.size_mb.saturating_mul(1024 * 1024),
                parts,
            )?;
            eprintln!(
                "Generated {} of corpus in {}",
                format_bytes(generate_args.size_mb.saturating_mul(1024 * 1024)),
                generate_args.output_dir.display()
            );
        }
    }

    Ok(())
}

/// Final status line, written after the progress line has been cleared.
fn report(summary: &IndexSummary, output: &Path) {
    eprintln!(
        "Indexed {} tokens ({} unique) from {} in {:.2?} -> {}",
        format_count(summary.token_count),
        format_count(summary.unique_terms as u64),
        format_bytes(summary.bytes_read),
        summary.elapsed,
        output.display(),
    );
    if summary.partitions_spilled > 0 {
        eprintln!(
            "Spilled {} partition file(s) while indexing",
            summary.partitions_spilled
        );
    }
}
