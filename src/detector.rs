use std::path::Path;

use anyhow::Result;
use regex::Regex;

/// Read the module path declared by `<path>/go.mod`, if there is one.
///
/// Imports under this path are the project's own packages, which the dotted
/// domain heuristic would otherwise report as external.
pub fn detect_module_path(path: &Path) -> Result<Option<String>> {
    let go_mod = path.join("go.mod");
    if !go_mod.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&go_mod)?;
    parse_module_directive(&content)
}

fn parse_module_directive(content: &str) -> Result<Option<String>> {
    let re = Regex::new(r#"^\s*module\s+"?([^\s"]+)"?"#)?;

    for line in content.lines() {
        let line = line.split("//").next().unwrap_or(line);
        if let Some(caps) = re.captures(line) {
            return Ok(Some(caps[1].to_string()));
        }
    }

    Ok(None)
}
