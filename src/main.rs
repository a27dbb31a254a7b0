//! `godepo` — discover the externally hosted imports of a Go project.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and expand `~` in the project path.
//! 2. Load config ([`config::load_config`]).
//! 3. Optionally read the project's own module path ([`detector`]).
//! 4. Walk the tree and extract external imports ([`scanner`]).
//! 5. Append manually configured packages ([`scanner::supplement`]).
//! 6. Render the requested report ([`report`]).

mod cli;
mod config;
mod detector;
mod diag;
mod error;
mod models;
mod report;
mod scanner;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, ReportFormat};
use config::{expand_home, load_config};
use detector::detect_module_path;
use diag::Diagnostics;
use models::ScanReport;
use scanner::{supplement, Progress, Scanner};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    let diag = Diagnostics::new(cli.debug);

    diag.debug("Debug mode activated!");

    // Resolve project path
    let path = expand_home(&cli.path)?;
    let path = path.canonicalize().unwrap_or(path);

    let config = load_config(&path, cli.config.as_deref())?;

    let own_module = if cli.skip_own_module {
        let module = detect_module_path(&path)?;
        match &module {
            Some(m) => diag.debug(format!("Skipping own module '{}'", m)),
            None => diag.warn(format!("No go.mod module path found in {}", path.display())),
        }
        module
    } else {
        None
    };

    let classifier = config.classifier.build(own_module)?;
    let scanner = Scanner::new(
        config.scan.path_filter(),
        classifier,
        config.scan.on_read_error,
        diag,
    )?;

    // Debug lines would tear through a progress bar.
    let show_progress = !cli.quiet && !diag.is_debug();
    let mut pb: Option<ProgressBar> = None;

    let mut outcome = scanner.scan(&path, |event| match event {
        Progress::Walked(total) => {
            if show_progress {
                let bar = ProgressBar::new(total as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                {
                    bar.set_style(style.progress_chars("#>-"));
                }
                pb = Some(bar);
            }
        }
        Progress::FileDone => {
            if let Some(bar) = &pb {
                bar.inc(1);
            }
        }
    })?;

    if let Some(bar) = pb {
        bar.finish_and_clear();
    }

    supplement(&mut outcome.packages, &config.packages.extra, &diag);

    if !cli.quiet {
        if outcome.packages.is_empty() {
            eprintln!(
                "  {} {} files, no external packages",
                "→".cyan(),
                outcome.files_scanned
            );
        } else {
            eprintln!(
                "  {} {} files, {} external packages",
                "→".cyan(),
                outcome.files_scanned,
                outcome.packages.len()
            );
        }
    }

    let report = ScanReport::from_outcome(&path, &outcome);

    let rendered = match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&report, cli.quiet);
            None
        }
        ReportFormat::Json => Some(report::render_json(&report)?),
        ReportFormat::Plain => Some(report::render_plain(&outcome.packages)),
    };

    if let Some(text) = rendered {
        match &cli.output {
            Some(file) => {
                std::fs::write(file, &text)?;
                if !cli.quiet {
                    eprintln!("  {} wrote {}", "→".cyan(), file.display());
                }
            }
            None => print!("{}", ensure_newline(text)),
        }
    }

    Ok(())
}

fn ensure_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
