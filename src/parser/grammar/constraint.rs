//! `Constraint` and its `ConstraintSpec`/`ElementSetSpec`/`SubtypeElements`
//! sub-productions (X.680 §47-51, X.682 §9-10, X.683 §8-9).

use super::value::{capture_balanced_braces, defined_value, signed_number, value};
use crate::parser::engine::{choice, Engine, PResult};
use crate::parser::node::ParseNode;
use crate::token::TokenKind;

use super::ty::type_;

/// `( ConstraintSpec ExceptionSpec? )`
pub(crate) fn constraint<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.recurse(|e| {
        e.terminal(TokenKind::LParen)?;
        let spec = constraint_spec(e)?;
        let exc = e.optional(exception_spec);
        e.terminal(TokenKind::RParen)?;
        let mut parts = vec![spec];
        if let Some(x) = exc {
            parts.push(x);
        }
        Ok(ParseNode::tagged("Constraint", ParseNode::seq(parts)))
    })
}

fn constraint_spec<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(e, general_constraint, subtype_constraint)
}

/// General constraints (X.682): user-defined (`CONSTRAINED BY`), contents
/// (`CONTAINING`/`ENCODED BY`), and table constraints. Table constraints
/// reference an object set and are captured only syntactically — resolving
/// them needs cross-assignment lookup this crate does not perform.
fn general_constraint<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| {
            e.keyword("CONSTRAINED")?;
            e.keyword("BY")?;
            e.terminal(TokenKind::LBrace)?;
            let body = capture_balanced_braces(e)?;
            Ok(ParseNode::tagged("UserDefinedConstraint", body))
        },
        |e: &mut Engine<'a>| {
            e.keyword("CONTAINING")?;
            let ty = type_(e)?;
            let encoded_by = e.optional(|e| {
                e.keyword("ENCODED")?;
                e.keyword("BY")?;
                value(e)
            });
            let mut parts = vec![ty];
            if let Some(v) = encoded_by {
                parts.push(ParseNode::tagged("EncodedBy", v));
            }
            Ok(ParseNode::tagged("ContentsConstraint", ParseNode::seq(parts)))
        },
        |e: &mut Engine<'a>| {
            // Table constraint: `{ObjectSetRef}` optionally followed by a
            // component relation `{@field, ...}`. Captured as a syntactic
            // blob; not implemented beyond accepting the shape (an open
            // question: object-set-from-objects stays unresolved here).
            e.terminal(TokenKind::LBrace)?;
            let set_ref = capture_balanced_braces(e)?;
            let relation = e.optional(|e| {
                e.terminal(TokenKind::LBrace)?;
                capture_balanced_braces(e)
            });
            let mut parts = vec![ParseNode::tagged("ObjectSetRef", set_ref)];
            if let Some(r) = relation {
                parts.push(ParseNode::tagged("ComponentRelation", r));
            }
            Ok(ParseNode::tagged("TableConstraint", ParseNode::seq(parts)))
        },
    )
}

/// `SubtypeConstraint ::= ElementSetSpec`, with the `ALL EXCEPT` form
/// admitted alongside ordinary union/intersection element sets.
pub(crate) fn subtype_constraint<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| {
            e.keyword("ALL")?;
            e.keyword("EXCEPT")?;
            let elem = constraint_element(e)?;
            Ok(ParseNode::tagged("AllExcept", elem))
        },
        element_set_spec,
    )
}

fn element_set_spec<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let unions = e.delimited_list(intersection_elements, |e| {
        choice!(
            e,
            |e: &mut Engine<'a>| e.keyword("UNION").map(|_| ()),
            |e: &mut Engine<'a>| e.terminal(TokenKind::Pipe).map(|_| ()),
        )
    })?;
    if unions.len() == 1 {
        Ok(unions.into_iter().next().unwrap())
    } else {
        Ok(ParseNode::tagged("Unions", ParseNode::seq(unions)))
    }
}

fn intersection_elements<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let items = e.delimited_list(exclusion_element, |e| {
        choice!(
            e,
            |e: &mut Engine<'a>| e.keyword("INTERSECTION").map(|_| ()),
            |e: &mut Engine<'a>| e.terminal(TokenKind::Circumflex).map(|_| ()),
        )
    })?;
    if items.len() == 1 {
        Ok(items.into_iter().next().unwrap())
    } else {
        Ok(ParseNode::tagged("Intersections", ParseNode::seq(items)))
    }
}

fn exclusion_element<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let elem = constraint_element(e)?;
    let exc = e.optional(|e| {
        e.keyword("EXCEPT")?;
        constraint_element(e)
    });
    match exc {
        Some(x) => Ok(ParseNode::tagged("Exclusion", ParseNode::seq(vec![elem, x]))),
        None => Ok(elem),
    }
}

/// `SubtypeElements` (X.680 §51): the per-element constraint forms.
/// Ordered so that keyword-led forms (`SIZE`, `FROM`, `PATTERN`, `WITH
/// COMPONENT(S)`, `INCLUDES`) are tried before the catch-all value/type
/// forms, matching the reserved-word guard the module-level grammar uses.
fn constraint_element<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        size_constraint,
        from_constraint,
        pattern_constraint,
        with_components,
        contained_subtype,
        value_range,
        parenthesized_element_set,
        |e: &mut Engine<'a>| value(e),
        |e: &mut Engine<'a>| type_(e).map(|t| ParseNode::tagged("TypeConstraint", t)),
    )
}

fn size_constraint<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("SIZE")?;
    e.terminal(TokenKind::LParen)?;
    let spec = subtype_constraint(e)?;
    e.terminal(TokenKind::RParen)?;
    Ok(ParseNode::tagged("SizeConstraint", spec))
}

fn from_constraint<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("FROM")?;
    e.terminal(TokenKind::LParen)?;
    let spec = subtype_constraint(e)?;
    e.terminal(TokenKind::RParen)?;
    Ok(ParseNode::tagged("FromConstraint", spec))
}

fn pattern_constraint<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("PATTERN")?;
    let v = value(e)?;
    Ok(ParseNode::tagged("PatternConstraint", v))
}

/// `WITH COMPONENT Constraint` or `WITH COMPONENTS { ... }`. The
/// multi-component form's per-component presence list is captured as a
/// syntactic blob (see [`capture_balanced_braces`]); only the single
/// `WITH COMPONENT` form is lifted into a real nested `Constraint`.
fn with_components<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("WITH")?;
    choice!(
        e,
        |e: &mut Engine<'a>| {
            e.keyword("COMPONENT")?;
            let inner = constraint(e)?;
            Ok(ParseNode::tagged("WithComponent", inner))
        },
        |e: &mut Engine<'a>| {
            e.keyword("COMPONENTS")?;
            e.terminal(TokenKind::LBrace)?;
            let body = capture_balanced_braces(e)?;
            Ok(ParseNode::tagged("WithComponents", body))
        },
    )
}

fn contained_subtype<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.keyword("INCLUDES")?;
    let ty = type_(e)?;
    Ok(ParseNode::tagged("ContainedSubtype", ty))
}

/// `ValueRange ::= LowerEndpoint ".." UpperEndpoint`, each endpoint
/// optionally `MIN`/`MAX` and optionally marked exclusive with a
/// neighboring `<`.
fn value_range<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    let lower = endpoint_value(e)?;
    let lower_exclusive = e.optional(|e| e.terminal(TokenKind::Less)).is_some();
    e.terminal(TokenKind::Range)?;
    let upper_exclusive = e.optional(|e| e.terminal(TokenKind::Less)).is_some();
    let upper = endpoint_value(e)?;

    let mut parts = vec![ParseNode::tagged("Lower", lower)];
    if lower_exclusive {
        parts.push(ParseNode::tagged("LowerExclusive", ParseNode::seq(vec![])));
    }
    parts.push(ParseNode::tagged("Upper", upper));
    if upper_exclusive {
        parts.push(ParseNode::tagged("UpperExclusive", ParseNode::seq(vec![])));
    }
    Ok(ParseNode::tagged("ValueRange", ParseNode::seq(parts)))
}

fn endpoint_value<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    choice!(
        e,
        |e: &mut Engine<'a>| e.keyword("MIN").map(|t| ParseNode::tagged("Min", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| e.keyword("MAX").map(|t| ParseNode::tagged("Max", ParseNode::Leaf(t))),
        |e: &mut Engine<'a>| signed_number(e),
        |e: &mut Engine<'a>| defined_value(e),
    )
}

fn parenthesized_element_set<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.terminal(TokenKind::LParen)?;
    let spec = subtype_constraint(e)?;
    e.terminal(TokenKind::RParen)?;
    Ok(spec)
}

/// `ExceptionSpec ::= "!" ExceptionIdentification`. The identification is
/// captured but not further interpreted — it exists to document why a
/// constraint violation should be tolerated at runtime, which is outside
/// this crate's scope (no codec, no value evaluation beyond syntax).
pub(crate) fn exception_spec<'a>(e: &mut Engine<'a>) -> PResult<ParseNode<'a>> {
    e.terminal(TokenKind::Exclam)?;
    let ident = choice!(
        e,
        |e: &mut Engine<'a>| value(e),
        |e: &mut Engine<'a>| signed_number(e),
    )?;
    Ok(ParseNode::tagged("ExceptionSpec", ident))
}
