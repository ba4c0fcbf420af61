//! The crate's single public error type and the pluggable warning
//! [`Reporter`].
//!
//! A position-carrying error split into the three kinds this crate
//! distinguishes (Syntax, Internal, Limit) plus a separate warning channel
//! for semantic-local issues that do not abort the parse. Derives
//! `Display`/`std::error::Error` via `thiserror`, since there is no
//! syntax tree for a caller to walk instead.

use std::fmt;
use thiserror::Error;

/// Everything the caller needs to point a human, or a language server, at
/// the exact spot a parse failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A lexical mismatch or grammar-engine exhaustion. `expected` lists the
    /// productions the engine was still trying to match at `offset`, the
    /// farthest position any alternative reached.
    #[error("syntax error at {line}:{column}: {message}\n{excerpt}")]
    Syntax {
        message: String,
        line: u32,
        column: u32,
        offset: usize,
        excerpt: String,
        expected: Vec<String>,
    },
    /// A recursion-depth or token-count ceiling was exceeded. Reported
    /// distinctly from [`ParseError::Syntax`] so a caller can tell "your
    /// input was malformed" apart from "your input was too large for the
    /// configured limits".
    #[error("limit exceeded at {line}:{column}: {message}")]
    Limit {
        message: String,
        line: u32,
        column: u32,
    },
    /// An assertion violation in the Transformer: the grammar produced a
    /// parse node shape the Transformer has no reduction for. Always a bug
    /// in this crate, never a user error; names the assignment being
    /// processed when one was in scope.
    #[error("internal error while transforming `{assignment}`: {message}")]
    Internal { message: String, assignment: String },
    /// A semantic-local issue severe enough to abort the parse rather than
    /// go through the [`Reporter`] as a warning — currently just duplicated
    /// `ENUMERATED` numbers within one type (a "warn vs overwrite" open
    /// question resolves the other duplicate-name cases to warnings, but
    /// this one is treated as a hard error).
    #[error("semantic error at {line}:{column}: {message}")]
    Semantic { message: String, line: u32, column: u32 },
    /// `parse_files` was asked for an encoding other than `"utf-8"`.
    #[error("unsupported encoding `{0}`, only \"utf-8\" is supported")]
    UnsupportedEncoding(String),
    /// `parse_files` could not read one of the given paths.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl ParseError {
    pub(crate) fn limit(message: impl Into<String>, line: u32, column: u32) -> Self {
        ParseError::Limit {
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn internal(message: impl Into<String>, assignment: impl Into<String>) -> Self {
        ParseError::Internal {
            message: message.into(),
            assignment: assignment.into(),
        }
    }

    pub(crate) fn semantic(message: impl Into<String>, line: u32, column: u32) -> Self {
        ParseError::Semantic {
            message: message.into(),
            line,
            column,
        }
    }

    /// Builds a [`ParseError::Syntax`] from a raw failure plus the original
    /// source, producing the one-line excerpt with a caret marker under the
    /// failing column. Kept separate from the Grammar Engine so the engine
    /// itself never needs to hold the whole source string, only token
    /// positions — a bare lexer/parser failure stays separate from the
    /// richer rendering a caller opts into.
    pub(crate) fn syntax(source: &str, line: u32, column: u32, offset: usize, expected: Vec<String>) -> Self {
        let excerpt = render_excerpt(source, line, column);
        let message = if expected.is_empty() {
            "unexpected token".to_string()
        } else {
            format!("expected {}", join_expected(&expected))
        };
        ParseError::Syntax {
            message,
            line,
            column,
            offset,
            excerpt,
            expected,
        }
    }
}

fn join_expected(expected: &[String]) -> String {
    match expected.len() {
        0 => String::new(),
        1 => expected[0].clone(),
        _ => format!("one of {}", expected.join(", ")),
    }
}

fn render_excerpt(source: &str, line: u32, column: u32) -> String {
    let line_text = source.lines().nth(line.saturating_sub(1) as usize).unwrap_or("");
    let mut out = String::new();
    out.push_str(line_text);
    out.push('\n');
    for _ in 0..column {
        out.push(' ');
    }
    out.push('^');
    out
}

/// A recoverable, non-aborting diagnostic: duplicated ENUMERATED numbers
/// downgraded to a hard [`ParseError`] instead (see
/// `mir::transform`), duplicated assignment names, or a malformed
/// constraint shape that caused its node to be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning at {}:{}: {}", self.line, self.column, self.message)
    }
}

/// The sink semantic-local warnings are handed to. The core crate never
/// formats a terminal-facing message itself; an embedding tool (a CLI, a
/// language server) implements this to route warnings to its own
/// presentation layer, keeping the parser itself independent of any
/// particular diagnostics-rendering crate.
pub trait Reporter {
    fn warn(&mut self, warning: Warning);
}

/// The default [`Reporter`]: collects warnings in memory for a caller that
/// doesn't need a custom sink.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    warnings: Vec<Warning>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl Reporter for CollectingReporter {
    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
