// file: src/utils/logging.rs
// description: Tracing subscriber setup and the colored run summary lines

use colored::*;
use std::fmt::Display;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `RUST_LOG` takes precedence over `--verbose`. Source locations are only
/// printed in verbose mode.
pub fn init_logger(colored_output: bool, verbose: bool) {
    colored::control::set_override(colored_output);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_file(verbose)
                .with_line_number(verbose)
                .with_ansi(colored_output),
        )
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

/// `[3/6] Extracting channel ids`
pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

/// One indented `label: value` line of the final summary.
pub fn format_stat(label: &str, value: impl Display) -> String {
    format!("   • {}: {}", label, value.to_string().bold())
}
