use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("randomness source {} unavailable: {source}", path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("system call failed: {0}")]
    Sys(#[from] nix::Error),

    #[error("source ended after {got} of {want} bytes")]
    ShortRead { want: usize, got: usize },

    #[error("{what} of {value} bytes is not a multiple of {align}")]
    Misaligned {
        what: &'static str,
        value: usize,
        align: usize,
    },

    #[error("posix_memalign({size}, align {align}) failed")]
    Alloc { size: usize, align: usize },
}

pub type Result<T> = std::result::Result<T, BenchError>;
