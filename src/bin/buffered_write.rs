use write_bench::{BenchError, WriteMode};

// Same loop as blocking_write, but chunks are collected in a BufWriter and
// flushed before the clock stops.
fn main() -> Result<(), BenchError> {
    write_bench::execute("buffered_write", WriteMode::Buffered)
}
