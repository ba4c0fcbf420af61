//! `Value` (X.680 §11, §18.1, §20.1, §21.1) and the handful of value-shaped
//! fragments reused elsewhere in the grammar (`SignedNumber`,
//! `DefinedValue`, `ObjIdComponents`). The transformer evaluates these
//! further; the grammar layer only captures syntax.

use crate::parser::engine::{choice, Engine, PResult};
use crate::parser::node::ParseNode;
use crate::token::TokenKind;

pub(crate) fn value<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| e.keyword("TRUE").map(|t| ParseNode::tagged("BooleanValue", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.keyword("FALSE").map(|t| ParseNode::tagged("BooleanValue", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.keyword("NULL").map(|t| ParseNode::tagged("NullValue", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.terminal(TokenKind::CString).map(|t| ParseNode::tagged("CStringValue", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.terminal(TokenKind::BString).map(|t| ParseNode::tagged("BStringValue", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.terminal(TokenKind::HString).map(|t| ParseNode::tagged("HStringValue", ParseNode::Leaf(t))),
        object_identifier_value,
        |e: &mut Engine<'a>| signed_number(e).map(|n| ParseNode::tagged("IntegerValue", n)),
        |e: &mut Engine<'a>| e.terminal(TokenKind::Identifier).map(|t| ParseNode::tagged("ReferencedValue", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.terminal(TokenKind::TypeReference).map(|t| ParseNode::tagged("ReferencedValue", ParseNode::Leaf(t))),
    )
}

/// `SignedNumber ::= number | "-" number`; also used directly by
/// `EnumerationItem` and `NamedNumber`.
pub(crate) fn signed_number<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let minus = e.optional(|e| e.terminal(TokenKind::Minus));
    let num = e.terminal(TokenKind::Number)?;
    let mut parts = Vec::new();
    if let Some(m) = minus {
        parts.push(ParseNode::Leaf(m));
    }
    parts.push(ParseNode::Leaf(num));
    Ok(ParseNode::tagged("SignedNumber", ParseNode::seq(parts)))
}

/// `DefinedValue`, simplified to a bare value reference — this grammar does
/// not resolve cross-module value references, so a
/// dotted `Module.value` form is accepted just as an identifier followed by
/// an unconsumed `.`, which the enclosing production will then fail to
/// continue past; full external value references are not a documented
/// scenario for this crate.
pub(crate) fn defined_value<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.terminal(TokenKind::Identifier)
        .map(|t| ParseNode::tagged("DefinedValue", ParseNode::Leaf(t)))
}

pub(crate) fn object_identifier_value<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.terminal(TokenKind::LBrace)?;
    let comps = e.one_or_more(oid_component)?;
    e.terminal(TokenKind::RBrace)?;
    Ok(ParseNode::tagged("ObjectIdentifierValue", ParseNode::seq(comps)))
}

fn oid_component<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| {
            let name = e.terminal(TokenKind::Identifier)?;
            e.terminal(TokenKind::LParen)?;
            let num = e.terminal(TokenKind::Number)?;
            e.terminal(TokenKind::RParen)?;
            Ok(ParseNode::tagged(
                "NameAndNumberForm",
                ParseNode::seq(vec![ParseNode::Leaf(name), ParseNode::Leaf(num)]),
            ))
        },
        |e: &mut Engine<'a>| e.terminal(TokenKind::Number).map(|t| ParseNode::tagged("NumberForm", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.terminal(TokenKind::Identifier).map(|t| ParseNode::tagged("NameForm", ParseNode::Leaf(t))),
    )
}

/// Consumes tokens up to (and including) the brace that balances the one
/// already consumed by the caller, used to capture constructs this grammar
/// treats as syntax-only: `CONSTRAINED BY { ... }`, `WITH SYNTAX { ... }`,
/// and object/object-set skeletons. Evaluating these bodies is explicitly
/// out of scope ("does not evaluate value expressions beyond
/// syntactic capture").
pub(crate) fn capture_balanced_braces<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let mut depth: u32 = 1;
    let mut leaves = Vec::new();
    loop {
        if e.is_eof() {
            return Err(());
        }
        match e.peek().kind {
            TokenKind::LBrace => {
                depth += 1;
                leaves.push(ParseNode::Leaf(e.bump()));
            }
            TokenKind::RBrace => {
                depth -= 1;
                let tok = e.bump();
                if depth == 0 {
                    break;
                }
                leaves.push(ParseNode::Leaf(tok));
            }
            _ => leaves.push(ParseNode::Leaf(e.bump())),
        }
    }
    Ok(ParseNode::seq(leaves))
}
