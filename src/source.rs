use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::config::READ_CHUNK_SIZE;
use crate::error::{BenchError, Result};

/// Read exactly `want` bytes from the file at `path`.
///
/// The file is closed before returning, on success or failure.
pub fn read_n_bytes<P: AsRef<Path>>(path: P, want: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| BenchError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_n_from(file, want)
}

/// Fill a buffer of exactly `want` bytes from `reader`, 4096 bytes at a time.
///
/// Bytes the reader yields past `want` are discarded. A reader that hits end
/// of stream early produces [`BenchError::ShortRead`]; a zero `want` never
/// touches the reader.
pub fn read_n_from<R: Read>(mut reader: R, want: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; want];
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let mut written = 0;

    while written < want {
        let read = match reader.read(&mut chunk) {
            Ok(0) => return Err(BenchError::ShortRead { want, got: written }),
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };

        let n = read.min(want - written);
        bytes[written..written + n].copy_from_slice(&chunk[..n]);
        written += n;
    }

    assert_eq!(written, want, "source buffer is {written} bytes, wanted {want}");
    Ok(bytes)
}
