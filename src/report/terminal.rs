use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{PackageSource, ScanReport};

/// Render a colored terminal report.
pub fn render(report: &ScanReport, quiet: bool) {
    let total = report.packages.len();
    let manual = report
        .packages
        .iter()
        .filter(|p| p.source == PackageSource::Config)
        .count();

    if quiet {
        println!(
            "Files: {}  Packages: {}  Skipped: {}",
            report.files_scanned,
            total.to_string().green(),
            report.skipped.len().to_string().yellow(),
        );
        return;
    }

    println!("\n {} v{}", "godepo".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Scanning: {}\n", report.root);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Files scanned      : {}", report.files_scanned));
    println!(" │  {:<48} │", format!("External packages  : {}", total));
    println!(" │  {:<48} │", format!("  from config      : {}", manual));
    println!(" │  {:<48} │", format!("Files skipped      : {}", report.skipped.len()));
    println!(" │  {:<48} │", format!("Hosts              : {}", summarize_hosts(report)));
    println!(" └────────────────────────────────────────────────────┘\n");

    if !report.skipped.is_empty() {
        println!(" {} Files that could not be read:\n", "[WARN]".yellow().bold());
        for skipped in &report.skipped {
            println!("   {}  {}", skipped.path, skipped.error.dimmed());
        }
        println!();
    }

    if total == 0 {
        println!(" {} No external packages found.\n", "✓".green());
        return;
    }

    println!(" {} External packages:\n", "[DEPS]".cyan().bold());
    render_table(report);
    println!();
}

fn render_table(report: &ScanReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Import path").add_attribute(Attribute::Bold),
            Cell::new("Host").add_attribute(Attribute::Bold),
            Cell::new("First seen").add_attribute(Attribute::Bold),
        ]);

    for (idx, pkg) in report.packages.iter().enumerate() {
        let first_seen = match &pkg.first_seen {
            Some(file) => Cell::new(file),
            None => Cell::new(format!("({})", pkg.source)).fg(Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(idx + 1).set_alignment(CellAlignment::Right),
            Cell::new(&pkg.import_path).fg(Color::Cyan),
            Cell::new(&pkg.host),
            first_seen,
        ]);
    }

    println!("{}", table);
}

/// Top three hosts by package count, e.g. `[github.com (4), gopkg.in (1)]`.
fn summarize_hosts(report: &ScanReport) -> String {
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for pkg in &report.packages {
        *counts.entry(pkg.host.as_str()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(host, cnt)| format!("{} ({})", host, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
