use slog::Logger;
use sloggers::terminal::{Destination, TerminalLoggerBuilder};
use sloggers::types::{Format, Severity};
use sloggers::Build;

/// Terminal logger for both binaries. Logs go to stderr so piping the JSON
/// output around stays clean.
pub fn setup() -> Logger {
    let mut builder = TerminalLoggerBuilder::new();
    builder.level(Severity::Debug);
    builder.format(Format::Full);
    builder.destination(Destination::Stderr);

    builder.build().unwrap()
}
