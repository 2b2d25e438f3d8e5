use write_bench::{BenchError, WriteMode};

fn main() -> Result<(), BenchError> {
    write_bench::execute("blocking_write", WriteMode::Blocking)
}
