//! Sequential write throughput benchmark.
//!
//! A buffer of random bytes is read once, then written to a file in fixed-size
//! chunks for a fixed number of trials. Each trial prints
//! `<tag>,<elapsed_seconds>,<bytes_per_second>` on stdout.

pub mod aligned;
pub mod bench;
pub mod config;
pub mod error;
pub mod journal;
pub mod sink;
pub mod source;

use std::io::{self, Write};

pub use bench::{TrialRecord, run, run_trial, write_chunked};
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use journal::Journal;
pub use sink::WriteMode;
pub use source::{read_n_bytes, read_n_from};

/// Entry point shared by the binaries: default config, results on stdout,
/// notices to syslog.
pub fn execute(process: &str, mode: WriteMode) -> Result<()> {
    let config = BenchConfig::default();
    let mut journal = Journal::connect(process);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = execute_with(&config, mode, &mut journal, &mut out).map(drop);
    if let Err(err) = &outcome {
        journal.error(format_args!("{} run aborted: {}", mode.tag(), err));
    }
    outcome
}

/// Load the source buffer, then run every trial against it.
pub fn execute_with<W: Write>(
    config: &BenchConfig,
    mode: WriteMode,
    journal: &mut Journal,
    out: &mut W,
) -> Result<Vec<TrialRecord>> {
    journal.notice(format_args!(
        "reading {} bytes from {}",
        config.buffer_size,
        config.source_path.display()
    ));
    let buf = read_n_bytes(&config.source_path, config.buffer_size)?;

    journal.notice(format_args!(
        "{} trials of {} to {} in {}-byte chunks",
        config.trials,
        mode.tag(),
        config.output_path.display(),
        config.chunk_size
    ));
    let records = run(config, mode, &buf, out)?;
    out.flush()?;

    journal.notice(format_args!("finished {} trials", records.len()));
    Ok(records)
}
