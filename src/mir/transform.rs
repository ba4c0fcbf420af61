//! The Transformer: walks a [`ParseNode`] tree top-down and reduces it to a
//! [`ModuleTree`]. Dispatch is a tagged-union match on each node's
//! `tag_name()` rather than a string-indexed table: a visitor keyed on the
//! tag name.

use std::collections::HashSet;

use super::types::*;
use crate::error::{ParseError, Reporter, Warning};
use crate::parser::node::ParseNode;

pub(crate) fn transform<'a>(root: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<ModuleTree, ParseError> {
    let mut tree = ModuleTree::default();
    for module_node in root.children() {
        let (name, module) = transform_module(module_node, reporter)?;
        if tree.modules.contains_key(&name) {
            reporter.warn(Warning {
                message: format!("duplicate module definition `{name}`"),
                line: module_node.line(),
                column: module_node.column(),
            });
        }
        tree.modules.insert(name, module);
    }
    Ok(tree)
}

fn transform_module<'a>(node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<(String, Module), ParseError> {
    let ident = node
        .find_tagged("ModuleIdentifier")
        .ok_or_else(|| ParseError::internal("ModuleDefinition missing a ModuleIdentifier", "<module>"))?;
    let name = ident
        .children()
        .first()
        .and_then(|n| n.text())
        .ok_or_else(|| ParseError::internal("ModuleIdentifier missing a name", "<module>"))?
        .to_string();

    let mut module = Module::new();

    if let Some(tag_default) = node.find_tagged("TagDefault") {
        module.tags = match tag_default.text() {
            Some("EXPLICIT") => Some(TagDefault::Explicit),
            Some("IMPLICIT") => Some(TagDefault::Implicit),
            Some("AUTOMATIC") => Some(TagDefault::Automatic),
            _ => None,
        };
    }
    module.extensibility_implied = node.find_tagged("ExtensibilityImplied").is_some();

    if let Some(imports_node) = node.find_tagged("Imports") {
        for group in imports_node.children() {
            let parts = group.children();
            if parts.len() != 2 {
                continue;
            }
            let symbols: Vec<String> = parts[0].children().iter().filter_map(|n| n.text()).map(String::from).collect();
            let from_module = parts[1].text().unwrap_or("").to_string();
            module.imports.entry(from_module).or_default().extend(symbols);
        }
    }

    let assignments = node
        .find_tagged("Assignments")
        .ok_or_else(|| ParseError::internal("ModuleDefinition missing its assignment list", name.clone()))?;
    for assignment in assignments.children() {
        transform_assignment(assignment, &mut module, reporter)?;
    }

    Ok((name, module))
}

fn transform_assignment<'a>(node: &ParseNode<'a>, module: &mut Module, reporter: &mut dyn Reporter) -> Result<(), ParseError> {
    match node.tag_name() {
        Some("TypeAssignment") => {
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let ty = transform_type(&children[1], reporter)?;
            insert_warn_overwrite(&mut module.types, name, ty, node, reporter, "type");
        }
        Some("ParameterizedTypeAssignment") => {
            // The parameter list gates how `Type` uses its dummy references,
            // none of which this crate resolves; only the
            // name and the underlying Type are kept.
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let ty = transform_type(&children[2], reporter)?;
            insert_warn_overwrite(&mut module.types, name, ty, node, reporter, "type");
        }
        Some("ValueAssignment") => {
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let ty = transform_type(&children[1], reporter)?;
            let value = transform_value(&children[2], &ty.type_name)?;
            insert_warn_overwrite(&mut module.values, name, value, node, reporter, "value");
        }
        Some("ParameterizedValueAssignment") => {
            // As with `ParameterizedTypeAssignment`, the parameter list gates
            // how `Type`/`Value` use their dummy references, none of which
            // this crate resolves; only the name, Type, and Value are kept.
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let ty = transform_type(&children[2], reporter)?;
            let value = transform_value(&children[3], &ty.type_name)?;
            insert_warn_overwrite(&mut module.values, name, value, node, reporter, "value");
        }
        Some("ObjectClassAssignment") => {
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let descriptor = transform_object_class(node)?;
            insert_warn_overwrite(&mut module.object_classes, name, descriptor, node, reporter, "object class");
        }
        Some("ObjectAssignment") => {
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let class = children[1].text().unwrap_or("").to_string();
            let syntax = render_captured(&children[2]);
            insert_warn_overwrite(&mut module.object_sets, name, ObjectSetDescriptor { class, syntax }, node, reporter, "object");
        }
        Some("ObjectSetAssignment") => {
            let children = node.children();
            let name = children[0].text().unwrap_or("").to_string();
            let class = children[1].text().unwrap_or("").to_string();
            let syntax = render_captured(&children[2]);
            insert_warn_overwrite(&mut module.object_sets, name, ObjectSetDescriptor { class, syntax }, node, reporter, "object set");
        }
        other => {
            return Err(ParseError::internal(
                format!("unrecognized assignment node `{:?}`", other),
                "<assignment>",
            ));
        }
    }
    Ok(())
}

/// Inserts `value` under `name`, warning (but still overwriting) if the
/// name is already bound.
fn insert_warn_overwrite<V>(
    map: &mut indexmap::IndexMap<String, V>,
    name: String,
    value: V,
    node: &ParseNode<'_>,
    reporter: &mut dyn Reporter,
    kind: &str,
) {
    if map.contains_key(&name) {
        reporter.warn(Warning {
            message: format!("duplicate {kind} assignment `{name}`, keeping the last one"),
            line: node.line(),
            column: node.column(),
        });
    }
    map.insert(name, value);
}

fn render_captured(node: &ParseNode<'_>) -> String {
    fn collect<'a>(node: &ParseNode<'a>, out: &mut Vec<&'a str>) {
        match node {
            ParseNode::Leaf(tok) => out.push(tok.text),
            ParseNode::Sequence(items) => items.iter().for_each(|n| collect(n, out)),
            ParseNode::Tagged(_, inner) => collect(inner, out),
        }
    }
    let mut parts = Vec::new();
    collect(node, &mut parts);
    parts.join(" ")
}

// --- Types -----------------------------------------------------------------

fn transform_type<'a>(node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<TypeDescriptor, ParseError> {
    let mut tag = None;
    let mut base = None;
    let mut constraints = Vec::new();
    for child in node.children() {
        match child.tag_name() {
            Some("Tag") => tag = Some(transform_tag(child)),
            Some("Constraint") => constraints.push(child),
            _ => base = Some(child),
        }
    }
    let base = base.ok_or_else(|| ParseError::internal("Type node missing a base type", "<type>"))?;
    let mut descriptor = transform_base_type(base, reporter)?;
    descriptor.tag = tag;
    apply_constraints(&mut descriptor, &constraints, reporter);
    Ok(descriptor)
}

fn transform_tag(node: &ParseNode<'_>) -> Tag {
    let mut class = None;
    let mut number = 0i64;
    let mut kind = None;
    for child in node.children() {
        match child.tag_name() {
            Some("TagClass") => {
                class = match child.text() {
                    Some("UNIVERSAL") => Some(TagClass::Universal),
                    Some("APPLICATION") => Some(TagClass::Application),
                    Some("PRIVATE") => Some(TagClass::Private),
                    _ => None,
                }
            }
            Some("TagNumber") => number = child.text().and_then(|t| t.parse().ok()).unwrap_or(0),
            Some("TagKind") => {
                kind = match child.text() {
                    Some("IMPLICIT") => Some(TagKind::Implicit),
                    Some("EXPLICIT") => Some(TagKind::Explicit),
                    _ => None,
                }
            }
            _ => {}
        }
    }
    Tag { number, class, kind }
}

fn transform_base_type<'a>(node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<TypeDescriptor, ParseError> {
    match node.tag_name() {
        Some("INTEGER") => {
            let mut descriptor = TypeDescriptor::of_kind("INTEGER");
            if let Some(list) = node.find_tagged("NamedNumberList") {
                descriptor.named_numbers = Some(transform_named_number_list(list)?);
            }
            Ok(descriptor)
        }
        Some("BIT STRING") => {
            let mut descriptor = TypeDescriptor::of_kind("BIT STRING");
            if let Some(list) = node.find_tagged("NamedBitList") {
                descriptor.named_numbers = Some(transform_named_number_list(list)?);
            }
            Ok(descriptor)
        }
        Some("EnumeratedType") => transform_enumerated(node),
        Some("SequenceOfType") => transform_of_type("SEQUENCE", node, reporter),
        Some("SetOfType") => transform_of_type("SET", node, reporter),
        Some("SequenceType") => transform_structured("SEQUENCE", node, reporter),
        Some("SetType") => transform_structured("SET", node, reporter),
        Some("ChoiceType") => transform_structured("CHOICE", node, reporter),
        Some("ReferencedType") => {
            let name = node.children().first().and_then(|n| n.text()).unwrap_or("").to_string();
            Ok(TypeDescriptor::of_kind(name))
        }
        Some("ObjectClassFieldType") => {
            let children = node.children();
            let class = children.first().and_then(|n| n.text()).unwrap_or("");
            let field = children.get(1).and_then(|n| n.text()).unwrap_or("");
            Ok(TypeDescriptor::of_kind(format!("{class}.&{field}")))
        }
        Some(kind) => Ok(TypeDescriptor::of_kind(kind)),
        None => Err(ParseError::internal("Type base node is untagged", "<type>")),
    }
}

fn transform_named_number_list(node: &ParseNode<'_>) -> Result<Vec<NamedNumber>, ParseError> {
    node.children()
        .iter()
        .map(|item| {
            let children = item.children();
            let name = children.first().and_then(|n| n.text()).unwrap_or("").to_string();
            let number = children.get(1).map(number_value).transpose()?.unwrap_or(0);
            Ok(NamedNumber { name, number })
        })
        .collect()
}

/// A `NamedNumber`/`NamedBit`/`NamedEnumerationItem` value: either a literal
/// `SignedNumber`, or a `DefinedValue` this crate does not resolve (no
/// cross-assignment lookup — recorded as `0`).
fn number_value(node: &ParseNode<'_>) -> Result<i64, ParseError> {
    match node.tag_name() {
        Some("SignedNumber") => parse_signed_number(node),
        _ => Ok(0),
    }
}

fn transform_of_type<'a>(label: &str, node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<TypeDescriptor, ParseError> {
    let mut constraints = Vec::new();
    let mut element = None;
    for child in node.children() {
        match child.tag_name() {
            Some("Constraint") => constraints.push(child),
            Some("Type") => element = Some(child),
            _ => {}
        }
    }
    let element = element.ok_or_else(|| ParseError::internal(format!("{label} OF missing an element type"), "<type>"))?;
    let elem_descriptor = transform_type(element, reporter)?;
    let mut descriptor = TypeDescriptor::of_kind(format!("{label} OF"));
    apply_constraints(&mut descriptor, &constraints, reporter);
    descriptor.element = Some(Box::new(elem_descriptor));
    Ok(descriptor)
}

fn transform_structured<'a>(label: &str, node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<TypeDescriptor, ParseError> {
    let mut descriptor = TypeDescriptor::of_kind(label);
    if let Some(list) = node.find_tagged("ComponentTypeLists") {
        let members = transform_component_type_lists(list, reporter)?;
        check_unique_member_names(&members, list.line(), reporter);
        descriptor.members = members;
    }
    Ok(descriptor)
}

fn transform_component_type_lists<'a>(node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<Vec<Member>, ParseError> {
    node.children().iter().map(|item| transform_component_item(item, reporter)).collect()
}

fn transform_component_item<'a>(node: &ParseNode<'a>, reporter: &mut dyn Reporter) -> Result<Member, ParseError> {
    match node.tag_name() {
        Some("ExtensionMarker") => Ok(Member::ExtensionMarker(ExtensionMarker)),
        Some("ExtensionAdditionGroup") => {
            let group = node
                .children()
                .iter()
                .map(|c| transform_component_item(c, reporter))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Member::ExtensionAdditionGroup(group))
        }
        Some("ComponentsOf") => {
            let ty_node = node.untag();
            let ty = transform_type(ty_node, reporter)?;
            Ok(Member::ComponentsOf { components_of: ty.type_name })
        }
        Some("ComponentType") => {
            let children = node.children();
            let named = children
                .iter()
                .find(|c| c.is_tagged("NamedType"))
                .ok_or_else(|| ParseError::internal("ComponentType missing a NamedType", "<component>"))?;
            let named_children = named.children();
            let name = named_children.first().and_then(|n| n.text()).unwrap_or("").to_string();
            let ty_node = named_children
                .get(1)
                .ok_or_else(|| ParseError::internal("NamedType missing its Type", "<component>"))?;
            let descriptor = transform_type(ty_node, reporter)?;
            let optional = children.iter().any(|c| c.is_tagged("Optional"));
            let default = children
                .iter()
                .find(|c| c.is_tagged("Default"))
                .map(|d| transform_value(d.untag(), &descriptor.type_name))
                .transpose()?;
            Ok(Member::Named(NamedMember {
                name,
                descriptor,
                optional: optional.then_some(true),
                default,
            }))
        }
        other => Err(ParseError::internal(
            format!("unrecognized component node `{:?}`", other),
            "<component>",
        )),
    }
}

fn check_unique_member_names(members: &[Member], line: u32, reporter: &mut dyn Reporter) {
    let mut seen = HashSet::new();
    for member in members {
        match member {
            Member::Named(named) => {
                if !seen.insert(named.name.clone()) {
                    reporter.warn(Warning {
                        message: format!("duplicate member name `{}`", named.name),
                        line,
                        column: 0,
                    });
                }
            }
            Member::ExtensionAdditionGroup(group) => check_unique_member_names(group, line, reporter),
            _ => {}
        }
    }
}

// --- ENUMERATED --------------------------------------------------------------

fn transform_enumerated(node: &ParseNode<'_>) -> Result<TypeDescriptor, ParseError> {
    let mut descriptor = TypeDescriptor::of_kind("ENUMERATED");
    let mut used = HashSet::new();

    for item in node.children() {
        if item.tag_name() == Some("NamedEnumerationItem") {
            let children = item.children();
            if let Some(num_node) = children.get(1) {
                used.insert(number_value(num_node)?);
            }
        }
    }

    let mut entries = Vec::new();
    let mut seen_numbers = HashSet::new();
    let mut next = 0i64;
    for item in node.children() {
        match item.tag_name() {
            Some("ExtensionMarker") => entries.push(EnumerationEntry::ExtensionMarker(ExtensionMarker)),
            Some("NamedEnumerationItem") => {
                let children = item.children();
                let name = children.first().and_then(|n| n.text()).unwrap_or("").to_string();
                let number = children.get(1).map(number_value).transpose()?.unwrap_or(0);
                if !seen_numbers.insert(number) {
                    return Err(ParseError::semantic(
                        format!("duplicate ENUMERATED number {number} for `{name}`"),
                        item.line(),
                        item.column(),
                    ));
                }
                entries.push(EnumerationEntry::Item(name, number));
            }
            Some("EnumerationItem") => {
                let name = item.text().unwrap_or("").to_string();
                while used.contains(&next) {
                    next += 1;
                }
                used.insert(next);
                seen_numbers.insert(next);
                entries.push(EnumerationEntry::Item(name, next));
                next += 1;
            }
            _ => {}
        }
    }

    descriptor.values = Some(entries);
    Ok(descriptor)
}

// --- Constraints -------------------------------------------------------------

fn apply_constraints(descriptor: &mut TypeDescriptor, constraints: &[&ParseNode<'_>], reporter: &mut dyn Reporter) {
    for constraint in constraints {
        if let Err(warning) = apply_constraint(descriptor, constraint) {
            reporter.warn(warning);
        }
    }
}

fn apply_constraint(descriptor: &mut TypeDescriptor, node: &ParseNode<'_>) -> Result<(), Warning> {
    let spec = node
        .children()
        .first()
        .ok_or_else(|| malformed_constraint(node, "empty constraint"))?;
    match spec.tag_name() {
        Some("SizeConstraint") => {
            let items = element_set(spec.untag())?;
            descriptor.size = Some(items);
        }
        Some("FromConstraint") => {
            let items = element_set(spec.untag())?;
            descriptor.from = Some(items);
        }
        Some("WithComponent") => {
            // `WITH COMPONENT`'s payload is itself a nested Constraint
            // (`grammar::constraint::with_components`); lift it into a real
            // inner-type-constraint TypeDescriptor rather than discarding it.
            let mut inner = TypeDescriptor::of_kind("WITH COMPONENT");
            apply_constraint(&mut inner, spec.untag())?;
            descriptor.with_components = Some(Box::new(inner));
        }
        Some("WithComponents") => {
            // The multi-component presence-list form is captured as opaque
            // syntax (see `grammar::value::capture_balanced_braces`);
            // preserve that captured text rather than dropping it, the same
            // way `PatternConstraint`/`ContentsConstraint`/etc. do in
            // `element_set` below.
            let mut inner = TypeDescriptor::of_kind("WITH COMPONENTS");
            inner.restricted_to = Some(vec![ElementSetItem::Single(Endpoint::Named(render_captured(spec.untag())))]);
            descriptor.with_components = Some(Box::new(inner));
        }
        _ => {
            let items = element_set(spec)?;
            merge_restricted_to(descriptor, items);
        }
    }
    Ok(())
}

fn merge_restricted_to(descriptor: &mut TypeDescriptor, mut items: Vec<ElementSetItem>) {
    match &mut descriptor.restricted_to {
        Some(existing) => existing.append(&mut items),
        None => descriptor.restricted_to = Some(items),
    }
}

/// Reduces one `ElementSetSpec`-shaped node (a single element, or a
/// `Unions`/`Intersections` wrapper) to a flat list of set items. Nested
/// unions/intersections are flattened rather than preserving their tree
/// shape — this grammar doesn't attempt to render set algebra back out,
/// only to expose the leaves a codec compiler would need.
fn element_set(node: &ParseNode<'_>) -> Result<Vec<ElementSetItem>, Warning> {
    match node.tag_name() {
        Some("Unions") | Some("Intersections") => {
            let mut items = Vec::new();
            for child in node.children() {
                items.extend(element_set(child)?);
            }
            Ok(items)
        }
        Some("Exclusion") => {
            let children = node.children();
            element_set(children.first().ok_or_else(|| malformed_constraint(node, "empty exclusion"))?)
        }
        Some("AllExcept") => Ok(vec![]),
        Some("ValueRange") => {
            let lower = node.find_tagged("Lower").ok_or_else(|| malformed_constraint(node, "value range missing lower bound"))?;
            let upper = node.find_tagged("Upper").ok_or_else(|| malformed_constraint(node, "value range missing upper bound"))?;
            Ok(vec![ElementSetItem::Range(endpoint(lower.untag())?, endpoint(upper.untag())?)])
        }
        Some("ExtensionMarker") => Ok(vec![ElementSetItem::ExtensionMarker(ExtensionMarker)]),
        Some("TypeConstraint") => Ok(vec![]),
        Some("UserDefinedConstraint") | Some("ContentsConstraint") | Some("TableConstraint") | Some("PatternConstraint") | Some("ContainedSubtype") => {
            Ok(vec![ElementSetItem::Single(Endpoint::Named(render_captured(node)))])
        }
        _ => Ok(vec![ElementSetItem::Single(endpoint(node)?)]),
    }
}

/// An endpoint or singleton value within a constraint: either one of
/// `endpoint_value`'s four forms (`MIN`, `MAX`, `SignedNumber`,
/// `DefinedValue`), or any `Value` form reached through the catch-all branch
/// of `constraint_element` — only `IntegerValue` renders as a number, the
/// rest render as their source text.
fn endpoint(node: &ParseNode<'_>) -> Result<Endpoint, Warning> {
    match node.tag_name() {
        Some("Min") => Ok(Endpoint::Min),
        Some("Max") => Ok(Endpoint::Max),
        Some("SignedNumber") => Ok(Endpoint::Number(parse_signed_number(node).map_err(|_| malformed_constraint(node, "invalid number"))?)),
        Some("IntegerValue") => Ok(Endpoint::Number(
            parse_signed_number(node.untag()).map_err(|_| malformed_constraint(node, "invalid number"))?,
        )),
        Some("BStringValue") => Ok(Endpoint::Named(canonicalize_bstring(node.text().unwrap_or("")))),
        Some("HStringValue") => Ok(Endpoint::Named(canonicalize_hstring(node.text().unwrap_or("")))),
        Some("CStringValue") => Ok(Endpoint::Named(unquote_cstring(node.text().unwrap_or("")))),
        Some("DefinedValue") | Some("ReferencedValue") | Some("BooleanValue") => Ok(Endpoint::Named(node.text().unwrap_or("").to_string())),
        Some("NullValue") => Ok(Endpoint::Named("NULL".to_string())),
        Some("ObjectIdentifierValue") => Ok(Endpoint::Named(render_captured(node))),
        _ => Ok(Endpoint::Named(node.text().unwrap_or("").to_string())),
    }
}

fn malformed_constraint(node: &ParseNode<'_>, message: &str) -> Warning {
    Warning {
        message: format!("malformed constraint: {message}"),
        line: node.line(),
        column: node.column(),
    }
}

// --- Values ------------------------------------------------------------------

fn transform_value(node: &ParseNode<'_>, type_hint: &str) -> Result<ValueDescriptor, ParseError> {
    let literal = match node.tag_name() {
        Some("BooleanValue") => LiteralValue::Boolean(node.text() == Some("TRUE")),
        Some("NullValue") => LiteralValue::Text("NULL".to_string()),
        Some("IntegerValue") => LiteralValue::Integer(parse_signed_number(node.untag())?),
        Some("CStringValue") => LiteralValue::Text(unquote_cstring(node.text().unwrap_or(""))),
        Some("BStringValue") => LiteralValue::CanonicalString(canonicalize_bstring(node.text().unwrap_or(""))),
        Some("HStringValue") => LiteralValue::CanonicalString(canonicalize_hstring(node.text().unwrap_or(""))),
        Some("ObjectIdentifierValue") => LiteralValue::ObjectIdentifier(transform_oid(node)?),
        Some("ReferencedValue") => LiteralValue::Text(node.text().unwrap_or("").to_string()),
        _ => LiteralValue::Text(node.text().unwrap_or("").to_string()),
    };
    Ok(ValueDescriptor {
        type_name: (!type_hint.is_empty()).then(|| type_hint.to_string()),
        value: literal,
    })
}

fn transform_oid(node: &ParseNode<'_>) -> Result<Vec<OidComponent>, ParseError> {
    node.children()
        .iter()
        .map(|c| match c.tag_name() {
            Some("NameAndNumberForm") => {
                let children = c.children();
                let name = children.first().and_then(|n| n.text()).unwrap_or("").to_string();
                let number = children.get(1).and_then(|n| n.text()).and_then(|t| t.parse().ok()).unwrap_or(0);
                Ok(OidComponent::Named(name, number))
            }
            Some("NumberForm") => Ok(OidComponent::Number(c.text().and_then(|t| t.parse().ok()).unwrap_or(0))),
            Some("NameForm") => Ok(OidComponent::Named(c.text().unwrap_or("").to_string(), 0)),
            other => Err(ParseError::internal(format!("unrecognized OID component `{:?}`", other), "<value>")),
        })
        .collect()
}

fn parse_signed_number(node: &ParseNode<'_>) -> Result<i64, ParseError> {
    let children = node.children();
    let (negative, num_node) = match children.len() {
        2 => (true, &children[1]),
        1 => (false, &children[0]),
        _ => return Err(ParseError::internal("SignedNumber has an unexpected shape", "<value>")),
    };
    let text = num_node.text().unwrap_or("0");
    let value: i64 = text
        .parse()
        .map_err(|_| ParseError::internal(format!("invalid integer literal `{text}`"), "<value>"))?;
    Ok(if negative { -value } else { value })
}

fn unquote_cstring(text: &str) -> String {
    let inner = text.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(text);
    inner.replace("\"\"", "\"")
}

fn canonicalize_bstring(text: &str) -> String {
    let body = text.strip_prefix('\'').and_then(|s| s.strip_suffix("'B")).unwrap_or(text);
    let bits: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    format!("0b{bits}")
}

fn canonicalize_hstring(text: &str) -> String {
    let body = text.strip_prefix('\'').and_then(|s| s.strip_suffix("'H")).unwrap_or(text);
    let hex: String = body.chars().filter(|c| !c.is_whitespace()).map(|c| c.to_ascii_lowercase()).collect();
    format!("0x{hex}")
}

// --- Information object classes ----------------------------------------------

fn transform_object_class(node: &ParseNode<'_>) -> Result<ObjectClassDescriptor, ParseError> {
    let children = node.children();
    let fields_node = children.get(1).ok_or_else(|| ParseError::internal("ObjectClassAssignment missing fields", "<class>"))?;
    let fields = fields_node
        .children()
        .iter()
        .map(|field| match field.tag_name() {
            Some("TypeFieldSpec") => {
                let name = field.children().first().and_then(|n| n.text()).unwrap_or("").to_string();
                Ok(FieldSpecDescriptor { name, kind: FieldSpecKind::Type })
            }
            Some("FixedTypeValueFieldSpec") => {
                let name = field.children().first().and_then(|n| n.text()).unwrap_or("").to_string();
                Ok(FieldSpecDescriptor { name, kind: FieldSpecKind::FixedTypeValue })
            }
            other => Err(ParseError::internal(format!("unrecognized field spec `{:?}`", other), "<class>")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let with_syntax = node.find_tagged("WithSyntax").map(render_captured);
    Ok(ObjectClassDescriptor { fields, with_syntax })
}
