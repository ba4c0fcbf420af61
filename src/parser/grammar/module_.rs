//! `ModuleDefinition` and its header productions (X.680 §12-15): the single
//! entry point the rest of the grammar hangs off of.

use super::assignment::assignment;
use super::value::object_identifier_value;
use crate::parser::engine::{choice, Engine, PResult};
use crate::parser::node::ParseNode;
use crate::token::TokenKind;

/// `ModuleDefinitions ::= ModuleDefinition+`, the root production a full
/// source string (possibly several concatenated modules, per `parse_files`)
/// reduces to.
pub(crate) fn module_definitions<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let modules = e.one_or_more(module_definition)?;
    Ok(ParseNode::tagged("ModuleDefinitions", ParseNode::seq(modules)))
}

/// `ModuleDefinition ::= ModuleIdentifier DEFINITIONS TagDefault
/// ExtensibilityDefault "::=" BEGIN ModuleBody END`.
fn module_definition<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let ident = module_identifier(e)?;
    e.keyword("DEFINITIONS")?;
    let tags = e.optional(tag_default);
    let extensibility = e.optional(|e| {
        e.keyword("EXTENSIBILITY")?;
        e.keyword("IMPLIED")
    });
    e.terminal(TokenKind::Assign)?;
    e.keyword("BEGIN")?;
    let exports = e.optional(exports);
    let imports = e.optional(imports);
    let assignments = e.zero_or_more(assignment);
    e.keyword("END")?;

    let mut parts = vec![ident];
    if let Some(t) = tags {
        parts.push(t);
    }
    if extensibility.is_some() {
        parts.push(ParseNode::tagged("ExtensibilityImplied", ParseNode::seq(vec![])));
    }
    if let Some(x) = exports {
        parts.push(x);
    }
    if let Some(i) = imports {
        parts.push(i);
    }
    parts.push(ParseNode::tagged("Assignments", ParseNode::seq(assignments)));
    Ok(ParseNode::tagged("ModuleDefinition", ParseNode::seq(parts)))
}

/// `ModuleIdentifier ::= modulereference DefinitiveOID?`.
fn module_identifier<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::TypeReference)?;
    let oid = e.optional(object_identifier_value);
    let mut parts = vec![ParseNode::Leaf(name)];
    if let Some(o) = oid {
        parts.push(o);
    }
    Ok(ParseNode::tagged("ModuleIdentifier", ParseNode::seq(parts)))
}

fn tag_default<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let kw = choice!(
        e,
        |e: &mut Engine<'a>| e.keyword("EXPLICIT"),
        |e: &mut Engine<'a>| e.keyword("IMPLICIT"),
        |e: &mut Engine<'a>| e.keyword("AUTOMATIC"),
    )?;
    e.keyword("TAGS")?;
    Ok(ParseNode::tagged("TagDefault", ParseNode::Leaf(kw)))
}

/// `Exports ::= EXPORTS (ALL | SymbolList)? ";"`. Captured but not consumed
/// by the Transformer (no cross-module resolution is in scope); kept so a
/// module containing an `EXPORTS` clause still parses.
fn exports<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("EXPORTS")?;
    let all = e.optional(|e| e.keyword("ALL")).is_some();
    let symbols = if all {
        Vec::new()
    } else {
        e.optional(symbol_list).unwrap_or_default()
    };
    e.terminal(TokenKind::Semicolon)?;
    Ok(ParseNode::tagged("Exports", ParseNode::seq(symbols)))
}

/// `Imports ::= IMPORTS SymbolsFromModule* ";"`.
fn imports<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("IMPORTS")?;
    let groups = e.zero_or_more(symbols_from_module);
    e.terminal(TokenKind::Semicolon)?;
    Ok(ParseNode::tagged("Imports", ParseNode::seq(groups)))
}

/// `SymbolsFromModule ::= SymbolList FROM modulereference`.
fn symbols_from_module<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let symbols = symbol_list(e)?;
    e.keyword("FROM")?;
    let module = e.terminal(TokenKind::TypeReference)?;
    Ok(ParseNode::tagged(
        "SymbolsFromModule",
        ParseNode::seq(vec![ParseNode::seq(symbols), ParseNode::Leaf(module)]),
    ))
}

fn symbol_list<'a>(e: &mut Engine<'a>) -> PResult<Vec<ParseNode<'a>>> {
    e.delimited_list(symbol, |e| e.terminal(TokenKind::Comma).map(|_| ()))
}

fn symbol<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| e.terminal(TokenKind::TypeReference).map(ParseNode::Leaf),
        |e: &mut Engine<'a>| e.terminal(TokenKind::Identifier).map(ParseNode::Leaf),
    )
}
