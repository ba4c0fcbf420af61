//! The Transformer's output shape: [`ModuleTree`], [`TypeDescriptor`],
//! [`ValueDescriptor`] and their nested records. Every public type derives
//! `serde::Serialize` so a caller can render the exact JSON-like shape
//! described by the external interface without this crate performing any
//! serialization itself.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// The Transformer's top-level output: one module-name-keyed entry per
/// `ModuleDefinition` in the source. Preserves assignment order via
/// [`IndexMap`], per the ordering guarantee — callers must not depend on it
/// semantically, but duplicate-detection diagnostics do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleTree {
    #[serde(flatten)]
    pub modules: IndexMap<String, Module>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagDefault {
    Explicit,
    Implicit,
    Automatic,
}

#[derive(Debug, Clone, Serialize)]
pub struct Module {
    #[serde(rename = "extensibility-implied")]
    pub extensibility_implied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagDefault>,
    pub imports: IndexMap<String, Vec<String>>,
    pub types: IndexMap<String, TypeDescriptor>,
    pub values: IndexMap<String, ValueDescriptor>,
    #[serde(rename = "object-classes")]
    pub object_classes: IndexMap<String, ObjectClassDescriptor>,
    #[serde(rename = "object-sets")]
    pub object_sets: IndexMap<String, ObjectSetDescriptor>,
}

impl Module {
    pub(crate) fn new() -> Self {
        Self {
            extensibility_implied: false,
            tags: None,
            imports: IndexMap::new(),
            types: IndexMap::new(),
            values: IndexMap::new(),
            object_classes: IndexMap::new(),
            object_sets: IndexMap::new(),
        }
    }
}

/// `{number, class?, kind?}`, attached to a [`TypeDescriptor`] or a member
/// when a `Tag` preceded its `Type`.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<TagClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TagKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagClass {
    Universal,
    Application,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagKind {
    Implicit,
    Explicit,
}

/// A literal `"..."` marker inside an otherwise-typed list (an
/// `ElementSetItem`, an enumeration's `values`), serializing to the string
/// this crate's examples render it as.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionMarker;

impl Serialize for ExtensionMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("...")
    }
}

/// An endpoint of a value range, or a bare singleton: `MIN`/`MAX`, a signed
/// integer, or an unresolved named value (this crate does not resolve
/// cross-reference values).
///
/// Serialized by hand rather than via `#[serde(untagged)]`: the unit
/// variants `Min`/`Max` would otherwise serialize as `null` (an untagged
/// enum serializes each variant in its own natural shape, and a unit
/// variant's natural shape is `null`), losing the very value a caller
/// constraint-checking an endpoint needs.
#[derive(Debug, Clone)]
pub enum Endpoint {
    Min,
    Max,
    Number(i64),
    Named(String),
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Endpoint::Min => serializer.serialize_str("MIN"),
            Endpoint::Max => serializer.serialize_str("MAX"),
            Endpoint::Number(n) => serializer.serialize_i64(*n),
            Endpoint::Named(s) => serializer.serialize_str(s),
        }
    }
}

/// One member of a `SIZE`/value-range/`restricted-to` element set: a
/// singleton, an inclusive range, or the extension marker.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ElementSetItem {
    Range(Endpoint, Endpoint),
    Single(Endpoint),
    ExtensionMarker(ExtensionMarker),
}

/// One entry of an `ENUMERATED` type's `values` list: a named, numbered
/// item, or the extension marker at the point it occurred among the items.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnumerationEntry {
    Item(String, i64),
    ExtensionMarker(ExtensionMarker),
}

/// A `NamedNumber`/`NamedBit`: `identifier (number)`.
#[derive(Debug, Clone, Serialize)]
pub struct NamedNumber {
    pub name: String,
    pub number: i64,
}

/// The reduced form of a `Type` node: a required `type` name plus whichever
/// kind-dependent fields that type carries. Unlike a sum type per ASN.1
/// builtin kind, this stays a single flat record (every field optional
/// besides `type`) because the Transformer's reductions compose the same
/// way regardless of kind — a SEQUENCE can carry a `tag` and
/// `restricted-to` exactly like an INTEGER can.
#[derive(Debug, Clone, Serialize, Default)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<TypeDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<ElementSetItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Vec<ElementSetItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "restricted-to")]
    pub restricted_to: Option<Vec<ElementSetItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<EnumerationEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "named-numbers")]
    pub named_numbers: Option<Vec<NamedNumber>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "with-components")]
    pub with_components: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub(crate) fn of_kind(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }
}

/// A SEQUENCE/SET/CHOICE member, or a `COMPONENTS OF` synthetic member.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Member {
    Named(NamedMember),
    ComponentsOf {
        #[serde(rename = "components-of")]
        components_of: String,
    },
    /// An `[[ ... ]]` extension-addition group: a nested list of members
    /// at the point it appeared in the component list.
    ExtensionAdditionGroup(Vec<Member>),
    /// The bare `...` marker at the point it occurred among root members.
    ExtensionMarker(ExtensionMarker),
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedMember {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueDescriptor>,
}

/// `{type?, value}`, the reduced form of any `Value` node.
#[derive(Debug, Clone, Serialize)]
pub struct ValueDescriptor {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub value: LiteralValue,
}

/// The Rust-native representation of a captured literal. `Text` is the
/// fallback for anything this crate only captures syntactically (REAL
/// literals, values of referenced/open types, out-of-scope cross-module
/// references).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Integer(i64),
    Boolean(bool),
    ObjectIdentifier(Vec<OidComponent>),
    CanonicalString(String),
    Text(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OidComponent {
    Number(u64),
    Named(String, u64),
}

/// An information object class skeleton: its field specs and optional
/// `WITH SYNTAX` captured as opaque text (this crate does not evaluate
/// object/object-set bodies against it).
#[derive(Debug, Clone, Serialize, Default)]
pub struct ObjectClassDescriptor {
    pub fields: Vec<FieldSpecDescriptor>,
    #[serde(rename = "with-syntax", skip_serializing_if = "Option::is_none")]
    pub with_syntax: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpecDescriptor {
    pub name: String,
    pub kind: FieldSpecKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldSpecKind {
    Type,
    FixedTypeValue,
}

/// An object or object-set assignment whose body this crate only captures
/// as opaque source text (see [`ObjectClassDescriptor`]).
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSetDescriptor {
    pub class: String,
    pub syntax: String,
}
