//! Diagnosis of documents that fail to parse
//!
//! Produces the parser's position plus a few heuristic flags for the mistakes
//! generators make most often: raw ampersands, bare angle brackets, and
//! typographic quotes.

use std::fmt;

/// Entities XML predefines, plus the character-reference prefix
const ENTITY_PREFIXES: [&str; 6] = ["amp;", "lt;", "gt;", "quot;", "apos;", "#"];

const SMART_QUOTES: [char; 4] = ['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Where and why parsing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Parser message
    pub message: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
    /// `(line number, text)` for the failing line and its neighbours
    pub context: Vec<(usize, String)>,
}

/// Heuristic issue flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueFlags {
    /// `&` not starting a predefined entity or character reference
    pub unescaped_ampersand: bool,
    /// `< ` or ` >` sequences, typically comparison operators outside CDATA
    pub stray_angle_bracket: bool,
    /// Typographic quotes
    pub smart_quotes: bool,
}

impl IssueFlags {
    /// True if any flag is raised
    #[inline]
    #[must_use]
    pub fn any(&self) -> bool {
        self.unescaped_ampersand || self.stray_angle_bracket || self.smart_quotes
    }
}

/// Result of diagnosing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    /// `None` when the document parses
    pub failure: Option<ParseFailure>,
    /// Heuristic flags, computed regardless of the parse outcome
    pub issues: IssueFlags,
}

impl Diagnosis {
    /// Whether the document parses
    #[inline]
    #[must_use]
    pub fn parses(&self) -> bool {
        self.failure.is_none()
    }
}

/// Diagnose one (already sanitised) document
#[must_use]
pub fn diagnose(xml: &str) -> Diagnosis {
    let failure = roxmltree::Document::parse(xml).err().map(|err| {
        let pos = err.pos();
        ParseFailure {
            message: err.to_string(),
            line: pos.row,
            column: pos.col,
            context: context_lines(xml, pos.row as usize),
        }
    });

    Diagnosis {
        failure,
        issues: IssueFlags {
            unescaped_ampersand: has_unescaped_ampersand(xml),
            stray_angle_bracket: xml.contains("< ") || xml.contains(" >"),
            smart_quotes: xml.contains(SMART_QUOTES),
        },
    }
}

fn has_unescaped_ampersand(xml: &str) -> bool {
    xml.match_indices('&').any(|(i, _)| {
        let rest = &xml[i + 1..];
        !ENTITY_PREFIXES.iter().any(|entity| rest.starts_with(entity))
    })
}

fn context_lines(xml: &str, line: usize) -> Vec<(usize, String)> {
    let first = line.saturating_sub(1).max(1);
    xml.lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(n, _)| (first..=line + 1).contains(n))
        .map(|(n, text)| (n, text.to_string()))
        .collect()
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => writeln!(f, "parses successfully")?,
            Some(failure) => {
                writeln!(f, "parse error: {}", failure.message)?;
                for (n, text) in &failure.context {
                    writeln!(f, "{n:>5} | {text}")?;
                    if *n == failure.line as usize {
                        let pad = failure.column.saturating_sub(1) as usize;
                        writeln!(f, "      | {}^ (column {})", " ".repeat(pad), failure.column)?;
                    }
                }
            }
        }

        writeln!(f, "unescaped '&': {}", self.issues.unescaped_ampersand)?;
        writeln!(f, "'<' or '>' outside tags: {}", self.issues.stray_angle_bracket)?;
        write!(f, "smart quotes: {}", self.issues.smart_quotes)
    }
}
