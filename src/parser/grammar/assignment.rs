//! `Assignment` (X.680 §16.1) dispatch, and X.683 parameterization
//! (`ParameterizedTypeAssignment`, `ParameterizedValueAssignment`, `ParameterList`).

use super::object_class::{object_assignment, object_class_assignment, object_set_assignment};
use super::ty::type_;
use super::value::value;
use crate::parser::engine::{choice, Engine, PResult};
use crate::parser::node::ParseNode;
use crate::token::TokenKind;

/// `Assignment ::= TypeAssignment | ValueAssignment | ParameterizedTypeAssignment
/// | ParameterizedValueAssignment | ObjectClassAssignment | ObjectAssignment
/// | ObjectSetAssignment`, tried in an order that puts the unambiguous
/// `TypeReference "::=" ...` shapes (object class, object set,
/// parameterized/plain type) before plain `ValueAssignment`/
/// `ObjectAssignment`, which start with a lowercase identifier instead, and
/// `ParameterizedValueAssignment` ahead of the plain `ValueAssignment` it
/// otherwise falls through to on an unparameterized value.
pub(crate) fn assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        object_class_assignment,
        parameterized_type_assignment,
        type_assignment,
        parameterized_value_assignment,
        value_assignment,
        object_set_assignment,
        object_assignment,
    )
}

/// `TypeAssignment ::= typereference "::=" Type`.
fn type_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::TypeReference)?;
    e.terminal(TokenKind::Assign)?;
    let ty = type_(e)?;
    Ok(ParseNode::tagged(
        "TypeAssignment",
        ParseNode::seq(vec![ParseNode::Leaf(name), ty]),
    ))
}

/// `ValueAssignment ::= valuereference Type "::=" Value`.
fn value_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::Identifier)?;
    let ty = type_(e)?;
    e.terminal(TokenKind::Assign)?;
    let v = value(e)?;
    Ok(ParseNode::tagged(
        "ValueAssignment",
        ParseNode::seq(vec![ParseNode::Leaf(name), ty, v]),
    ))
}

/// `ParameterizedValueAssignment ::= valuereference "{" ParameterList "}" Type "::=" Value`.
fn parameterized_value_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::Identifier)?;
    e.terminal(TokenKind::LBrace)?;
    let params = e.delimited_list(parameter, |e| e.terminal(TokenKind::Comma).map(|_| ()))?;
    e.terminal(TokenKind::RBrace)?;
    let ty = type_(e)?;
    e.terminal(TokenKind::Assign)?;
    let v = value(e)?;
    Ok(ParseNode::tagged(
        "ParameterizedValueAssignment",
        ParseNode::seq(vec![
            ParseNode::Leaf(name),
            ParseNode::tagged("ParameterList", ParseNode::seq(params)),
            ty,
            v,
        ]),
    ))
}

/// `ParameterizedTypeAssignment ::= typereference "{" ParameterList "}" "::=" Type`.
fn parameterized_type_assignment<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let name = e.terminal(TokenKind::TypeReference)?;
    e.terminal(TokenKind::LBrace)?;
    let params = e.delimited_list(parameter, |e| e.terminal(TokenKind::Comma).map(|_| ()))?;
    e.terminal(TokenKind::RBrace)?;
    e.terminal(TokenKind::Assign)?;
    let ty = type_(e)?;
    Ok(ParseNode::tagged(
        "ParameterizedTypeAssignment",
        ParseNode::seq(vec![
            ParseNode::Leaf(name),
            ParseNode::tagged("ParameterList", ParseNode::seq(params)),
            ty,
        ]),
    ))
}

/// `Parameter ::= (ParamGovernor ":")? Reference`, where the governor is
/// itself a type or value reference. The governor is captured but not
/// matched against its use-site argument — cross-checking actual parameter
/// kinds against their governors would need the object-class machinery
/// this crate deliberately stops short of.
fn parameter<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let governed = e.optional(|e| {
        let governor = choice!(
            e,
            |e: &mut Engine<'a>| e.terminal(TokenKind::TypeReference),
            |e: &mut Engine<'a>| e.terminal(TokenKind::Identifier),
        )?;
        e.terminal(TokenKind::Colon)?;
        Ok(governor)
    });
    let reference = choice!(
        e,
        |e: &mut Engine<'a>| e.terminal(TokenKind::TypeReference),
        |e: &mut Engine<'a>| e.terminal(TokenKind::Identifier),
    )?;

    let mut parts = Vec::new();
    if let Some(g) = governed {
        parts.push(ParseNode::tagged("Governor", ParseNode::Leaf(g)));
    }
    parts.push(ParseNode::Leaf(reference));
    Ok(ParseNode::tagged("Parameter", ParseNode::seq(parts)))
}
