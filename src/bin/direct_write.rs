use write_bench::{BenchError, WriteMode};

// O_DIRECT bypasses the page cache; fails with EINVAL on filesystems
// without direct I/O support (tmpfs, for one).
fn main() -> Result<(), BenchError> {
    write_bench::execute("direct_write", WriteMode::Direct)
}
