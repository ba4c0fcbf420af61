//! Information object classes (X.681): `ObjectClassAssignment`,
//! `ObjectAssignment`, `ObjectSetAssignment`. Only the fixed `CLASS { ... }`
//! field-spec shape and fixed-type-value/type field kinds are modeled, per
//! the restriction to single-module, cross-reference-free definitions —
//! object-from-object and object-set-from-objects productions hit
//! [`Engine::no_match`] rather than being silently accepted and mis-parsed.

use super::value::{capture_balanced_braces, value};
use crate::parser::engine::{choice, Engine, PResult};
use crate::parser::node::ParseNode;
use crate::token::TokenKind;

/// `ObjectClassAssignment ::= objectclassreference "::=" ObjectClass`, with
/// `ObjectClass` restricted to a literal `CLASS { FieldSpec, ... } (WITH
/// SYNTAX { ... })?` — parameterized and referenced object classes are a
/// `NoMatch`.
pub(crate) fn object_class_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::TypeReference)?;
    e.terminal(TokenKind::Assign)?;
    e.keyword("CLASS")?;
    e.terminal(TokenKind::LBrace)?;
    let fields = e.delimited_list(field_spec, |e| e.terminal(TokenKind::Comma).map(|_| ()))?;
    e.terminal(TokenKind::RBrace)?;
    let syntax = e.optional(|e| {
        e.keyword("WITH")?;
        e.keyword("SYNTAX")?;
        e.terminal(TokenKind::LBrace)?;
        capture_balanced_braces(e)
    });

    let mut parts = vec![ParseNode::Leaf(name), ParseNode::seq(fields)];
    if let Some(s) = syntax {
        parts.push(ParseNode::tagged("WithSyntax", s));
    }
    Ok(ParseNode::tagged("ObjectClassAssignment", ParseNode::seq(parts)))
}

/// `FieldSpec`, restricted to `TypeFieldSpec` (`&Type`) and
/// `FixedTypeValueFieldSpec` (`&value Type UNIQUE? (OPTIONAL|DEFAULT v)?`).
fn field_spec<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| {
            e.terminal(TokenKind::Amp)?;
            let name = e.terminal(TokenKind::TypeReference)?;
            let optional = e.optional(|e| e.keyword("OPTIONAL")).is_some();
            let mut parts = vec![ParseNode::Leaf(name)];
            if optional {
                parts.push(ParseNode::tagged("Optional", ParseNode::seq(vec![])));
            }
            Ok(ParseNode::tagged("TypeFieldSpec", ParseNode::seq(parts)))
        },
        |e: &mut Engine<'a>| {
            e.terminal(TokenKind::Amp)?;
            let name = e.terminal(TokenKind::Identifier)?;
            let ty = super::ty::type_(e)?;
            let unique = e.optional(|e| e.keyword("UNIQUE")).is_some();
            let modifier = e.optional(|e| {
                choice!(
                    e,
                    |e: &mut Engine<'a>| e.keyword("OPTIONAL").map(|_| ParseNode::tagged(
                        "Optional",
                        ParseNode::seq(vec![])
                    )),
                    |e: &mut Engine<'a>| {
                        e.keyword("DEFAULT")?;
                        value(e).map(|v| ParseNode::tagged("Default", v))
                    },
                )
            });

            let mut parts = vec![ParseNode::Leaf(name), ty];
            if unique {
                parts.push(ParseNode::tagged("Unique", ParseNode::seq(vec![])));
            }
            if let Some(m) = modifier {
                parts.push(m);
            }
            Ok(ParseNode::tagged("FixedTypeValueFieldSpec", ParseNode::seq(parts)))
        },
    )
}

/// `ObjectAssignment ::= objectreference DefinedObjectClass "::=" Object`,
/// with `Object` restricted to a braced field-value list captured
/// syntactically — evaluating object field values against their class's
/// field kinds is out of scope.
pub(crate) fn object_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::Identifier)?;
    let class = e.terminal(TokenKind::TypeReference)?;
    e.terminal(TokenKind::Assign)?;
    e.terminal(TokenKind::LBrace)?;
    let body = capture_balanced_braces(e)?;
    Ok(ParseNode::tagged(
        "ObjectAssignment",
        ParseNode::seq(vec![ParseNode::Leaf(name), ParseNode::Leaf(class), body]),
    ))
}

/// `ObjectSetAssignment ::= objectsetreference DefinedObjectClass "::=" ObjectSet`,
/// `ObjectSet` captured syntactically for the same reason as `Object` above.
pub(crate) fn object_set_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::TypeReference)?;
    let class = e.terminal(TokenKind::TypeReference)?;
    e.terminal(TokenKind::Assign)?;
    e.terminal(TokenKind::LBrace)?;
    let body = capture_balanced_braces(e)?;
    Ok(ParseNode::tagged(
        "ObjectSetAssignment",
        ParseNode::seq(vec![ParseNode::Leaf(name), ParseNode::Leaf(class), body]),
    ))
}
