//! `EnumeratedType` and its `Enumerations`/`EnumerationItem` sub-productions
//! (X.680 §19).

use super::value::{defined_value, signed_number};
use crate::parser::engine::{choice, Engine, PResult};
use crate::parser::node::ParseNode;
use crate::token::TokenKind;

/// `ENUMERATED "{" Enumerations "}"`. The root/extension split is left flat
/// here for the same reason [`super::ty::component_type_lists`] is: the
/// Transformer buckets by counting `ExtensionMarker` occurrences rather than
/// the grammar threading separate before/after productions.
pub(crate) fn enumerated_type<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("ENUMERATED")?;
    e.terminal(TokenKind::LBrace)?;
    let items = enumerations(e)?;
    e.terminal(TokenKind::RBrace)?;
    Ok(ParseNode::tagged("EnumeratedType", ParseNode::seq(items)))
}

fn enumerations<'a>(e: &mut Engine<'a>) -> PResult<Vec<ParseNode<'a>>> {
    let mut items = Vec::new();
    loop {
        if e.at(TokenKind::Ellipsis) {
            let tok = e.bump();
            let exc = e.optional(super::constraint::exception_spec);
            let mut parts = vec![ParseNode::Leaf(tok)];
            if let Some(x) = exc {
                parts.push(x);
            }
            items.push(ParseNode::tagged("ExtensionMarker", ParseNode::seq(parts)));
        } else {
            match e.attempt(enumeration_item) {
                Ok(item) => items.push(item),
                Err(()) => break,
            }
        }
        if e.optional(|e| e.terminal(TokenKind::Comma)).is_none() {
            break;
        }
    }
    if items.is_empty() {
        return e.no_match("enumeration item");
    }
    Ok(items)
}

/// `EnumerationItem ::= Identifier | NamedNumber`, `NamedNumber`'s
/// parenthesized value being `signed-number | definedValue` per X.680 §19.2,
/// same as the sibling `named_number` in `super::ty`.
fn enumeration_item<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| {
            let name = e.terminal(TokenKind::Identifier)?;
            e.terminal(TokenKind::LParen)?;
            let num = choice!(
                e,
                |e: &mut Engine<'a>| signed_number(e),
                |e: &mut Engine<'a>| defined_value(e),
            )?;
            e.terminal(TokenKind::RParen)?;
            Ok(ParseNode::tagged(
                "NamedEnumerationItem",
                ParseNode::seq(vec![ParseNode::Leaf(name), num]),
            ))
        },
        |e: &mut Engine<'a>| {
            e.terminal(TokenKind::Identifier)
                .map(|t| ParseNode::tagged("EnumerationItem", ParseNode::Leaf(t)))
        },
    )
}
