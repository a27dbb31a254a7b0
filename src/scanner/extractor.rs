//! Line-oriented import extraction.
//!
//! Each physical line is fed through [`ScanState::step`], a pure transition
//! function. The scan is lexical, not a parser: an import hidden behind a
//! trailing `//` comment inside a block, or behind unusual comment nesting, is
//! simply not seen.

use anyhow::Result;
use regex::Regex;

use crate::diag::Diagnostics;

const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";
const IMPORT_BLOCK_OPEN: &str = "import (";
const IMPORT_BLOCK_CLOSE: &str = ")";

/// Where the scanner is within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Seeking,
    /// Inside `/* ... */`. `in_imports` is the block state to return to once
    /// the comment closes.
    InCommentBlock { in_imports: bool },
    InImportBlock,
    /// The import block closed; the rest of the file is not scanned.
    Done,
}

/// What a single line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    Nothing,
    Candidate(&'a str),
    BlockEnded,
}

impl ScanState {
    /// Consume one line and return the next state plus what the line yielded.
    ///
    /// `single_import` recognises the one-line `import "..."` form and is
    /// only consulted while seeking.
    pub fn step<'a>(
        self,
        line: &'a str,
        single_import: impl Fn(&'a str) -> Option<&'a str>,
    ) -> (ScanState, LineEvent<'a>) {
        use ScanState::*;

        match self {
            Done => (Done, LineEvent::Nothing),
            _ if line.contains(BLOCK_COMMENT_OPEN) => {
                let in_imports = match self {
                    InImportBlock => true,
                    InCommentBlock { in_imports } => in_imports,
                    _ => false,
                };
                (InCommentBlock { in_imports }, LineEvent::Nothing)
            }
            InCommentBlock { in_imports } => {
                if line.contains(BLOCK_COMMENT_CLOSE) {
                    let resumed = if in_imports { InImportBlock } else { Seeking };
                    (resumed, LineEvent::Nothing)
                } else {
                    (self, LineEvent::Nothing)
                }
            }
            _ if line.contains(IMPORT_BLOCK_OPEN) => (InImportBlock, LineEvent::Nothing),
            InImportBlock => {
                if line.contains(IMPORT_BLOCK_CLOSE) {
                    (Done, LineEvent::BlockEnded)
                } else if line.contains(LINE_COMMENT) || !line.contains('"') {
                    (InImportBlock, LineEvent::Nothing)
                } else {
                    (InImportBlock, block_entry(line))
                }
            }
            Seeking => match single_import(line) {
                Some(path) => (Seeking, LineEvent::Candidate(path)),
                None => (Seeking, LineEvent::Nothing),
            },
        }
    }
}

/// Parse one line of a grouped import block: `alias "host/path"`,
/// `_ "host/path"`, `. "host/path"` or just `"host/path"`.
fn block_entry(line: &str) -> LineEvent<'_> {
    let trimmed = line.trim();
    let quoted = match trimmed.find(char::is_whitespace) {
        Some(idx) if !trimmed.starts_with('"') => trimmed[idx..].trim_start(),
        _ => trimmed,
    };
    let path = quoted.trim_matches('"');
    if path.is_empty() {
        LineEvent::Nothing
    } else {
        LineEvent::Candidate(path)
    }
}

/// Pulls raw import candidates out of one file's text.
pub struct ImportExtractor {
    single_import: Regex,
    diag: Diagnostics,
}

impl ImportExtractor {
    pub fn new(diag: Diagnostics) -> Result<Self> {
        // `import "path"` or `import alias "path"` at the start of a line.
        let single_import = Regex::new(r#"^\s*import\s+(?:[\w.]+\s+)?"([^"]+)""#)?;
        Ok(Self { single_import, diag })
    }

    fn single_import<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.single_import
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Run the state machine over a whole file and return the raw candidates
    /// in line order.
    pub fn extract<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut state = ScanState::Seeking;
        let mut candidates = Vec::new();

        for line in text.split('\n') {
            let (next, event) = state.step(line, |l| self.single_import(l));
            match event {
                LineEvent::Candidate(path) => candidates.push(path),
                LineEvent::BlockEnded => self.diag.debug("\tImports ended."),
                LineEvent::Nothing => {}
            }
            state = next;
            if state == ScanState::Done {
                break;
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<&str> {
        ImportExtractor::new(Diagnostics::default())
            .unwrap()
            .extract(text)
    }

    fn no_single(_: &str) -> Option<&str> {
        None
    }

    #[test]
    fn test_grouped_block_skips_commented_line() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n\t\"github.com/foo/bar\"\n\t// \"github.com/should/be/skipped\"\n\t\"github.com/baz/qux\"\n)\n\nfunc main() {}\n";
        assert_eq!(
            extract(src),
            vec!["fmt", "github.com/foo/bar", "github.com/baz/qux"]
        );
    }

    #[test]
    fn test_single_line_import() {
        let src = "package main\n\nimport \"github.com/solo/pkg\"\n";
        assert_eq!(extract(src), vec!["github.com/solo/pkg"]);
    }

    #[test]
    fn test_multiple_single_line_imports() {
        let src = "package main\nimport \"fmt\"\nimport \"github.com/a/b\"\n\nfunc main() {}\n";
        assert_eq!(extract(src), vec!["fmt", "github.com/a/b"]);
    }

    #[test]
    fn test_block_comment_on_one_line_hides_import() {
        let src = "package main\n/* import \"github.com/hidden/pkg\" */\n";
        assert!(extract(src).is_empty());
    }

    #[test]
    fn test_multiline_block_comment_hides_imports() {
        let src = "/*\nimport \"github.com/hidden/one\"\nimport (\n\"github.com/hidden/two\"\n*/\nimport \"github.com/visible/pkg\"\n";
        assert_eq!(extract(src), vec!["github.com/visible/pkg"]);
    }

    #[test]
    fn test_block_comment_inside_import_block_resumes_block() {
        let src = "import (\n\t\"github.com/a/one\"\n\t/*\n\t\"github.com/hidden/x\"\n\t*/\n\t\"github.com/a/two\"\n)\n";
        assert_eq!(extract(src), vec!["github.com/a/one", "github.com/a/two"]);
    }

    #[test]
    fn test_aliases_and_blank_identifiers_are_stripped() {
        let src = "import (\n\t_ \"github.com/lib/pq\"\n\tyaml \"gopkg.in/yaml.v2\"\n\t. \"github.com/dot/imported\"\n)\n";
        assert_eq!(
            extract(src),
            vec!["github.com/lib/pq", "gopkg.in/yaml.v2", "github.com/dot/imported"]
        );
    }

    #[test]
    fn test_trailing_comment_discards_whole_line() {
        let src = "import (\n\t\"github.com/a/b\" // pinned\n\t\"github.com/c/d\"\n)\n";
        assert_eq!(extract(src), vec!["github.com/c/d"]);
    }

    #[test]
    fn test_scan_stops_after_import_block() {
        let src = "import (\n\t\"github.com/a/b\"\n)\n\nimport \"github.com/after/block\"\n";
        assert_eq!(extract(src), vec!["github.com/a/b"]);
    }

    #[test]
    fn test_lines_without_quotes_in_block_are_ignored() {
        let src = "import (\n\n\tfoo\n\t\"github.com/x/y\"\n)\n";
        assert_eq!(extract(src), vec!["github.com/x/y"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let src = "import (\r\n\t\"github.com/a/b\"\r\n)\r\n";
        assert_eq!(extract(src), vec!["github.com/a/b"]);
    }

    #[test]
    fn test_step_transitions() {
        let (s, e) = ScanState::Seeking.step("import (", no_single);
        assert_eq!((s, e), (ScanState::InImportBlock, LineEvent::Nothing));

        let (s, _) = ScanState::InImportBlock.step("/* note", no_single);
        assert_eq!(s, ScanState::InCommentBlock { in_imports: true });

        let (s, _) = s.step("still comment \"github.com/x/y\"", no_single);
        assert_eq!(s, ScanState::InCommentBlock { in_imports: true });

        let (s, _) = s.step("*/", no_single);
        assert_eq!(s, ScanState::InImportBlock);

        let (s, e) = s.step(")", no_single);
        assert_eq!((s, e), (ScanState::Done, LineEvent::BlockEnded));

        let (s, e) = ScanState::Done.step("import \"github.com/x/y\"", no_single);
        assert_eq!((s, e), (ScanState::Done, LineEvent::Nothing));
    }

    #[test]
    fn test_comment_opener_takes_precedence_over_import_syntax() {
        let (s, e) = ScanState::Seeking.step("import \"github.com/x/y\" /* why */", no_single);
        assert_eq!(s, ScanState::InCommentBlock { in_imports: false });
        assert_eq!(e, LineEvent::Nothing);
    }

    #[test]
    fn test_single_line_alias_and_canonical_import_comment() {
        let src = "package foo // import \"github.com/self/foo\"\n\nimport yaml \"gopkg.in/yaml.v2\"\n";
        assert_eq!(extract(src), vec!["gopkg.in/yaml.v2"]);
    }
}
