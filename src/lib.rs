#![doc = include_str!("../README.md")]

mod error;
mod lexer;
mod limit;
mod parser;
mod token;

pub mod mir;

#[cfg(test)]
mod tests;

pub use crate::error::{CollectingReporter, ParseError, Reporter, Warning};
pub use crate::mir::ModuleTree;
pub use crate::token::{Token, TokenKind};

/// Lexes and parses `source` — one or more concatenated `ModuleDefinition`s —
/// then runs the Transformer over the resulting parse tree, returning the
/// combined [`ModuleTree`]. Semantic-local issues (duplicated assignment
/// names, malformed constraint shapes) are routed to a default
/// [`CollectingReporter`] and silently discarded; use [`parse_string_with`]
/// to observe them, or [`Parser`] to override the recursion/token limits
/// first.
///
/// This function is synchronous and holds no state across calls: two
/// concurrent invocations on independent inputs never interact.
pub fn parse_string(source: &str) -> Result<ModuleTree, ParseError> {
    Parser::new(source).parse()
}

/// As [`parse_string`], but routes semantic-local warnings to the given
/// [`Reporter`] instead of discarding them.
pub fn parse_string_with(source: &str, reporter: &mut dyn Reporter) -> Result<ModuleTree, ParseError> {
    Parser::new(source).parse_with(reporter)
}

/// A builder over the two configuration knobs this crate exposes: the Grammar
/// Engine's recursion-depth ceiling and the lexer's token-count ceiling.
/// Both default to the same generous constants [`parse_string`] uses;
/// construct one directly only when an input is known to need a tighter or
/// looser ceiling than those defaults.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    source: &'a str,
    limits: parser::Limits,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source` with default limits.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            limits: parser::Limits::default(),
        }
    }

    /// Overrides the Grammar Engine's recursion-depth ceiling.
    /// Exceeding it aborts the parse with [`ParseError::Limit`] rather than
    /// a stack overflow.
    pub fn recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.limits.recursion_limit = recursion_limit;
        self
    }

    /// Overrides the lexer's token-count ceiling. Exceeding it
    /// aborts lexing early with [`ParseError::Limit`] instead of continuing
    /// to allocate tokens for a pathological input.
    pub fn token_limit(mut self, token_limit: usize) -> Self {
        self.limits.token_limit = token_limit;
        self
    }

    /// Parses with the configured limits, discarding semantic-local
    /// warnings.
    pub fn parse(self) -> Result<ModuleTree, ParseError> {
        let mut reporter = CollectingReporter::new();
        self.parse_with(&mut reporter)
    }

    /// Parses with the configured limits, routing semantic-local warnings
    /// to `reporter`.
    pub fn parse_with(self, reporter: &mut dyn Reporter) -> Result<ModuleTree, ParseError> {
        let tree = parser::parse_source(self.source, self.limits)?;
        mir::transform(&tree, reporter)
    }
}

/// Reads `paths` in order, concatenates their contents with a newline
/// between each, and hands the result to [`parse_string`]. `encoding` must be
/// `"utf-8"`; any other value is rejected rather than silently mis-decoded.
pub fn parse_files<P: AsRef<std::path::Path>>(paths: &[P], encoding: &str) -> Result<ModuleTree, ParseError> {
    if encoding != "utf-8" {
        return Err(ParseError::UnsupportedEncoding(encoding.to_string()));
    }
    let mut source = String::new();
    for (i, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        if i > 0 {
            source.push('\n');
        }
        let text = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        source.push_str(&text);
    }
    parse_string(&source)
}
