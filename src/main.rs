//! Binary entrypoint for the support bot server.

use std::process::ExitCode;

use support_bot::start_support_bot;

fn main() -> ExitCode {
    start_support_bot::run()
}
