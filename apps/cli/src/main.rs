//! # splitbill
//!
//! Entry point for the `splitbill` binary. Everything happens in
//! [`splitbill_cli::run`].

use std::process::ExitCode;

fn main() -> ExitCode {
    splitbill_cli::run()
}
