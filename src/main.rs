//! flexdb CLI entry point
//!
//! Parses arguments, runs one command, and exits non-zero on failure. All
//! logic lives in the `cli` module, which has already written the error
//! line by the time `run` returns.

use flexdb::cli;

fn main() {
    if cli::run().is_err() {
        std::process::exit(1);
    }
}
