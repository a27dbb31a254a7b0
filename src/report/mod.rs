//! Report renderers for scan results.
//!
//! - [`terminal`] — colored summary box and package table; respects `--quiet`.
//! - [`render_json`] / [`render_plain`] — machine-readable output for the
//!   manifest tooling that consumes the package list.

pub mod terminal;

use anyhow::Result;

use crate::models::ScanReport;
use crate::scanner::package_set::PackageSet;

/// Pretty-printed JSON document of the whole report.
pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One import path per line, in discovery order.
pub fn render_plain(packages: &PackageSet) -> String {
    let mut out = String::new();
    for path in packages.result() {
        out.push_str(&path);
        out.push('\n');
    }
    out
}
