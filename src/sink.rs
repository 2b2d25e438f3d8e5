use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::os::fd::OwnedFd;
use std::path::Path;

use nix::fcntl::{OFlag, open};
use nix::sys::stat::Mode;
use nix::unistd;

use crate::aligned::{AlignedBlock, DIRECT_ALIGN};
use crate::error::{BenchError, Result};

/// How each trial hands the source buffer to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// One write(2) per chunk straight from the source buffer.
    Blocking,
    /// Chunks go through a `BufWriter`, flushed before the clock stops.
    Buffered,
    /// `O_DIRECT`, each chunk staged through a page-aligned block.
    Direct,
}

impl WriteMode {
    /// First column of every result line.
    pub fn tag(self) -> &'static str {
        match self {
            WriteMode::Blocking => "blocking",
            WriteMode::Buffered => "buf",
            WriteMode::Direct => "direct",
        }
    }
}

/// Output file for a single trial. Dropping it closes the descriptor.
pub enum TrialFile {
    Plain(File),
    Buffered(BufWriter<File>),
    Direct(DirectFile),
}

impl TrialFile {
    /// Create or truncate `path` for writing in the given mode.
    pub fn open(path: &Path, mode: WriteMode, chunk_size: usize) -> Result<Self> {
        match mode {
            WriteMode::Blocking => Ok(TrialFile::Plain(create_truncated(path)?)),
            WriteMode::Buffered => Ok(TrialFile::Buffered(BufWriter::new(create_truncated(path)?))),
            WriteMode::Direct => Ok(TrialFile::Direct(DirectFile::open(path, chunk_size)?)),
        }
    }
}

fn create_truncated(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl Write for TrialFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            TrialFile::Plain(file) => file.write(buf),
            TrialFile::Buffered(writer) => writer.write(buf),
            TrialFile::Direct(direct) => direct.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            TrialFile::Plain(file) => file.flush(),
            TrialFile::Buffered(writer) => writer.flush(),
            TrialFile::Direct(direct) => direct.flush(),
        }
    }
}

/// File opened with `O_DIRECT`.
///
/// Callers' slices carry no alignment guarantee, so every write is copied into
/// `staging` first. Each write must be a multiple of [`DIRECT_ALIGN`].
pub struct DirectFile {
    fd: OwnedFd,
    staging: AlignedBlock,
}

impl DirectFile {
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        let staging = AlignedBlock::new(chunk_size)?;
        let fd = open(
            path,
            OFlag::O_CREAT | OFlag::O_WRONLY | OFlag::O_TRUNC | OFlag::O_DIRECT,
            Mode::S_IRUSR | Mode::S_IWUSR,
        )
        .map_err(BenchError::Sys)?;
        Ok(Self { fd, staging })
    }
}

impl Write for DirectFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len().min(self.staging.len());
        if len % DIRECT_ALIGN != 0 {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("direct write of {len} bytes is not a multiple of {DIRECT_ALIGN}"),
            ));
        }
        if len == 0 {
            return Ok(0);
        }

        let block = &mut self.staging.as_mut_slice()[..len];
        block.copy_from_slice(&buf[..len]);
        let written = unistd::write(&self.fd, block).map_err(io::Error::from)?;
        whole_direct_write(written, len)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A partial O_DIRECT write leaves an unaligned remainder that can't be
/// reissued, so it is reported as an error with both counts.
fn whole_direct_write(written: usize, expected: usize) -> io::Result<usize> {
    if written == expected {
        Ok(written)
    } else {
        Err(io::Error::other(format!(
            "short direct write: {written} of {expected} bytes"
        )))
    }
}
