//! Process-level entry helpers and error reporting.

use crate::core::cli::CliArgs;
use crate::core::errors::BuildError;

/// Tag printed in front of a diagnostic
///
/// Pipeline failures are tagged with their kind, anything else (bad
/// arguments, unreadable config) is a plain `error`.
pub fn error_tag(error: &anyhow::Error) -> String {
    match error.downcast_ref::<BuildError>() {
        Some(build_error) => format!("error[{}]", build_error.kind()),
        None => "error".to_string(),
    }
}

/// Report a fatal error on stderr and exit with code 1.
///
/// Standard output is left untouched, so a failed build never produces a
/// partial artifact there.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!("{}: {error}", error_tag(&error));
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse command line arguments.
pub fn get_cli_args() -> CliArgs {
    use clap::Parser;
    CliArgs::parse()
}
