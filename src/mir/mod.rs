//! The Transformer: reduces a parse tree into the [`ModuleTree`] this
//! crate hands back to its two public entry points. `types` is the public
//! output shape; `transform` is the internal visitor that builds it.

pub(crate) mod transform;
pub mod types;

pub use types::{
    ElementSetItem, Endpoint, EnumerationEntry, ExtensionMarker, FieldSpecDescriptor, FieldSpecKind, LiteralValue, Member,
    Module, ModuleTree, NamedMember, NamedNumber, ObjectClassDescriptor, ObjectSetDescriptor, OidComponent, Tag, TagClass,
    TagDefault, TagKind, TypeDescriptor, ValueDescriptor,
};
pub(crate) use transform::transform;
