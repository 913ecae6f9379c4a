//! CLI argument definitions.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "thermolog",
    version,
    about = "Continuous ADC temperature logger"
)]
pub struct Args {
    /// Path to config TOML; a missing file falls back to built-in defaults
    #[arg(long, value_name = "FILE", default_value = "etc/thermolog.toml")]
    pub config: PathBuf,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Calibration policy override
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Reporting interval override in milliseconds
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Exit after this many reports (0 = run until ctrl-c)
    #[arg(long, default_value_t = 0)]
    pub reports: u64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    Polynomial,
    Linear,
}

impl From<PolicyArg> for thermolog_config::PolicyKind {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Polynomial => Self::Polynomial,
            PolicyArg::Linear => Self::Linear,
        }
    }
}
