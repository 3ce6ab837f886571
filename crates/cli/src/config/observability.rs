//! Logging Config

use clap::Args;

/// How log lines written to stderr are rendered.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// One line per event, for reading in a terminal.
    Compact,

    /// One JSON object per event, for piping into log tooling.
    Json,
}

/// Diagnostics settings. Logs never mix with command output on stdout.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Minimum level or filter directive; quiet (`warn`) unless raised
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Rendering of stderr log lines (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
