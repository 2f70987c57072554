//! Unrecoverable failures.
//!
//! The table fails only when storage runs out or its arena is re-entered,
//! and the parser stops the same way on a syntax error it cannot recover
//! from. Both funnel
//! through [`report_fatal_error`] so the process exits with one diagnostic
//! shape: `<message> at <context>`.

use crate::SymtabError;

/// Exit status used for every fatal error.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Report an unrecoverable error and terminate the process.
pub fn report_fatal_error(message: &str, context: &str) -> ! {
    tracing::error!(reason = message, context, "fatal error");
    eprintln!("{}", render(message, context));
    std::process::exit(FATAL_EXIT_CODE);
}

/// Terminate on a failure inside the symbol table.
#[cold]
pub(crate) fn table_failure(err: &SymtabError, context: &str) -> ! {
    report_fatal_error(&err.to_string(), context)
}

fn render(message: &str, context: &str) -> String {
    format!("{message} at {context}")
}
