use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "godepo",
    about = "Discover externally hosted imports of a Go project",
    version
)]
pub struct Cli {
    /// Project path to scan (a leading `~` is expanded)
    #[arg(default_value = ".", value_name = "PATH")]
    pub path: PathBuf,

    /// Config file [default: ./.godepo/config.toml, fallback ~/.config/godepo/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Write the json/plain report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Drop imports under the module path declared in go.mod
    #[arg(long)]
    pub skip_own_module: bool,

    /// Print every file read and every import found
    #[arg(long)]
    pub debug: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Reject flag combinations clap cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        if self.output.is_some() && self.report == ReportFormat::Terminal {
            bail!("--output requires --report json or --report plain");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Plain,
}
