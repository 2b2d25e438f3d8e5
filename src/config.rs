use std::path::PathBuf;

/// Bytes pulled from the randomness source once and written on every trial.
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 30;

/// Size of each write call.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

pub const DEFAULT_TRIALS: usize = 10;

pub const DEFAULT_SOURCE_PATH: &str = "/dev/random";

/// Relative to the working directory, truncated at the start of every trial.
pub const DEFAULT_OUTPUT_PATH: &str = "out.bin";

/// Read size used when filling the source buffer.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Parameters of one benchmark run.
///
/// The binaries never change these; they exist as a struct so the loop can be
/// driven at small sizes from tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub buffer_size: usize,
    pub chunk_size: usize,
    pub trials: usize,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            trials: DEFAULT_TRIALS,
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}
