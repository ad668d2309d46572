//! Binary entrypoint that serves the question-answering API.

use std::process::ExitCode;

use civic_query::start;

/// Start the HTTP server with the production registry.
fn main() -> ExitCode {
    start::run()
}
