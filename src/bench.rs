use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::aligned::DIRECT_ALIGN;
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::sink::{TrialFile, WriteMode};

/// Write `buf` to `writer` as sequential `chunk`-sized pieces, the last one
/// possibly shorter. Returns the number of pieces issued.
///
/// Panics if `chunk` is zero.
pub fn write_chunked<W: Write>(writer: &mut W, buf: &[u8], chunk: usize) -> io::Result<usize> {
    let mut calls = 0;
    for piece in buf.chunks(chunk) {
        writer.write_all(piece)?;
        calls += 1;
    }
    Ok(calls)
}

/// Timing of one full-buffer write.
#[derive(Debug, Clone, Copy)]
pub struct TrialRecord {
    pub started: Instant,
    pub finished: Instant,
    pub bytes: usize,
}

impl TrialRecord {
    pub fn elapsed(&self) -> Duration {
        self.finished.duration_since(self.started)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Bytes per second. A zero elapsed time gives infinity.
    pub fn throughput(&self) -> f64 {
        self.bytes as f64 / self.elapsed_secs()
    }

    /// Floats use `{:?}` so whole numbers keep their `.0`.
    pub fn csv_line(&self, tag: &str) -> String {
        format!("{},{:?},{:?}", tag, self.elapsed_secs(), self.throughput())
    }
}

fn check_direct_alignment(chunk_size: usize, len: usize) -> Result<()> {
    for (what, value) in [("chunk size", chunk_size), ("buffer length", len)] {
        if value % DIRECT_ALIGN != 0 {
            return Err(BenchError::Misaligned {
                what,
                value,
                align: DIRECT_ALIGN,
            });
        }
    }
    Ok(())
}

/// Open the output file, write all of `buf` in chunks and time it.
///
/// The clock stops once the write calls (and for `Buffered`, the flush) have
/// returned; nothing is synced to the device. The file is closed before this
/// returns, including when a write fails.
pub fn run_trial(config: &BenchConfig, mode: WriteMode, buf: &[u8]) -> Result<TrialRecord> {
    if mode == WriteMode::Direct {
        check_direct_alignment(config.chunk_size, buf.len())?;
    }

    let mut file = TrialFile::open(&config.output_path, mode, config.chunk_size)?;

    let started = Instant::now();
    write_chunked(&mut file, buf, config.chunk_size)?;
    file.flush()?;
    let finished = Instant::now();

    Ok(TrialRecord {
        started,
        finished,
        bytes: buf.len(),
    })
}

/// Run `config.trials` trials back to back, writing one result line to `out`
/// after each. The first failure ends the run.
pub fn run<W: Write>(
    config: &BenchConfig,
    mode: WriteMode,
    buf: &[u8],
    out: &mut W,
) -> Result<Vec<TrialRecord>> {
    let mut records = Vec::with_capacity(config.trials);
    for _ in 0..config.trials {
        let record = run_trial(config, mode, buf)?;
        writeln!(out, "{}", record.csv_line(mode.tag()))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the length of every write call.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<usize>,
        data: Vec<u8>,
    }

    impl Write for CallLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls.push(buf.len());
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts `budget` bytes, then fails like a full disk.
    struct FullDisk {
        budget: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn uneven_tail_chunk() {
        let buf: Vec<u8> = (0..10_000u32).map(|i| i as u8).collect();
        let mut log = CallLog::default();
        let calls = write_chunked(&mut log, &buf, 4096).unwrap();
        assert_eq!(calls, 3);
        assert_eq!(log.calls, [4096, 4096, 1808]);
        assert_eq!(log.data, buf);
    }

    #[test]
    fn even_chunks() {
        let mut log = CallLog::default();
        let calls = write_chunked(&mut log, &[9u8; 16], 4).unwrap();
        assert_eq!(calls, 4);
        assert_eq!(log.calls, [4, 4, 4, 4]);
    }

    #[test]
    fn empty_buffer_issues_no_writes() {
        let mut log = CallLog::default();
        assert_eq!(write_chunked(&mut log, &[], 4096).unwrap(), 0);
        assert!(log.calls.is_empty());
    }

    #[test]
    fn write_failure_propagates() {
        let mut disk = FullDisk { budget: 5_000 };
        let err = write_chunked(&mut disk, &[0u8; 10_000], 4096).unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
    }

    #[test]
    fn record_math() {
        let started = Instant::now();
        let record = TrialRecord {
            started,
            finished: started + Duration::from_millis(250),
            bytes: 1 << 30,
        };
        assert_eq!(record.elapsed_secs(), 0.25);
        assert_eq!(record.throughput(), 4_294_967_296.0);
        assert_eq!(record.csv_line("blocking"), "blocking,0.25,4294967296.0");
    }

    #[test]
    fn zero_elapsed_is_not_guarded() {
        let now = Instant::now();
        let record = TrialRecord {
            started: now,
            finished: now,
            bytes: 16,
        };
        assert!(record.throughput().is_infinite());
        assert_eq!(record.csv_line("blocking"), "blocking,0.0,inf");
    }

    #[test]
    fn direct_alignment_checks() {
        assert!(check_direct_alignment(4096, 8192).is_ok());
        assert!(matches!(
            check_direct_alignment(4096, 10_000),
            Err(BenchError::Misaligned { what: "buffer length", .. })
        ));
        assert!(matches!(
            check_direct_alignment(512, 8192),
            Err(BenchError::Misaligned { what: "chunk size", .. })
        ));
    }
}
