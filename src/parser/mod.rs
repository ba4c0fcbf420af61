//! Grammar Engine + Grammar Rules: turns a token stream into a [`ParseNode`]
//! tree. The public [`crate::parse_string`]/[`crate::parse_files`] entry
//! points hand that tree to [`crate::mir`] for the Transformer pass.

pub(crate) mod engine;
pub(crate) mod grammar;
pub(crate) mod node;

use crate::error::ParseError;
use crate::lexer;
use engine::Engine;
use node::ParseNode;

/// Recursion- and token-count ceilings a single [`parse`] invocation is
/// bounded by, exposed through [`crate::Parser`] instead of being fixed
/// constants.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub(crate) recursion_limit: usize,
    pub(crate) token_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            recursion_limit: 4_096,
            token_limit: 1_000_000,
        }
    }
}

/// Lexes and parses `source`, returning the root `ModuleDefinitions`
/// [`ParseNode`] or a [`ParseError`] pointing at the farthest position the
/// grammar reached before giving up.
pub(crate) fn parse<'a>(source: &'a str, tokens: &'a [crate::token::Token<'a>], limits: Limits) -> Result<ParseNode<'a>, ParseError> {
    let mut engine = Engine::new(tokens, limits.recursion_limit);
    match grammar::module_definitions(&mut engine) {
        Ok(tree) if engine.is_eof() => Ok(tree),
        _ => Err(unparsed_error(source, &engine)),
    }
}

fn unparsed_error(source: &str, engine: &Engine<'_>) -> ParseError {
    let tok = engine.max_reached_token();
    if engine.limit_hit() {
        return ParseError::limit("recursion limit exceeded while parsing", tok.line, tok.column);
    }
    let expected = engine.expected_at_max();
    ParseError::syntax(source, tok.line, tok.column, tok.offset, expected)
}

/// Tokenizes then parses `source` in one step, used by both public entry
/// points in [`crate::lib`].
pub(crate) fn parse_source(source: &str, limits: Limits) -> Result<ParseNode<'_>, ParseError> {
    let tokens = lexer::tokenize(source, limits.token_limit)?;
    parse(source, &tokens, limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> ParseNode<'_> {
        parse_source(src, Limits::default()).expect("expected a successful parse")
    }

    #[test]
    fn parses_minimal_module() {
        let tree = parse_ok("M DEFINITIONS ::= BEGIN A ::= INTEGER END");
        assert_eq!(tree.tag_name(), Some("ModuleDefinitions"));
    }

    #[test]
    fn reports_syntax_error_with_position() {
        let err = parse_source("M DEFINITIONS ::= BEGIN A ::= END", Limits::default()).unwrap_err();
        match err {
            ParseError::Syntax { line, .. } => assert_eq!(line, 1),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn parses_imports_clause() {
        let tree = parse_ok("M DEFINITIONS ::= BEGIN IMPORTS X, Y FROM N; END");
        assert_eq!(tree.tag_name(), Some("ModuleDefinitions"));
    }
}
