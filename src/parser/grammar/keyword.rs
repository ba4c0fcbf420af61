//! The ASN.1 reserved-word set (X.680 §12.38 Table 1 plus the X.681/X.682
//! keywords this grammar recognizes), used for the negative-lookahead
//! "reserved-word guard" this grammar treats as load-bearing: without it,
//! constructs like `END` or `SEQUENCE` would be consumed as a
//! `TypeReference` wherever a referenced type is grammatically legal.

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub(crate) static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ABSENT", "ENCODED", "INTEGER", "RELATIVE-OID", "ABSTRACT-SYNTAX", "END", "INTERSECTION",
        "SEQUENCE", "ALL", "ENUMERATED", "ISO646String", "SET", "APPLICATION", "EXCEPT", "MAX",
        "SIZE", "AUTOMATIC", "EXPLICIT", "MIN", "STRING", "BEGIN", "EXPORTS", "MINUS-INFINITY",
        "SYNTAX", "BIT", "EXTENSIBILITY", "NULL", "T61String", "BMPString", "EXTERNAL",
        "NumericString", "TAGS", "BOOLEAN", "FALSE", "OBJECT", "TeletexString", "BY", "FROM",
        "ObjectDescriptor", "TRUE", "CHARACTER", "GeneralizedTime", "OCTET", "TYPE-IDENTIFIER",
        "CHOICE", "GeneralString", "OF", "UNION", "CLASS", "GraphicString", "OPTIONAL", "UNIQUE",
        "COMPONENT", "IA5String", "PATTERN", "UNIVERSAL", "COMPONENTS", "IDENTIFIER", "PDV", "UniversalString",
        "PLUS-INFINITY", "UTCTime", "CONTAINING", "IMPLIED", "PRESENT", "UTF8String", "DEFAULT", "IMPORTS",
        "PrintableString", "VideotexString", "DEFINITIONS", "INCLUDES", "PRIVATE", "VisibleString",
        "EMBEDDED", "INSTANCE", "REAL", "WITH", "ANY", "DEFINED", "IMPLICIT", "CONSTRAINED",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn is_reserved(text: &str) -> bool {
    RESERVED_WORDS.contains(text)
}

/// The builtin type keywords that introduce a `BuiltinType` production
/// rather than a referenced type; kept separate from [`RESERVED_WORDS`]
/// because the grammar dispatches on this exact set when deciding whether
/// an uppercase token starts a builtin type.
pub(crate) const BUILTIN_TYPE_KEYWORDS: &[&str] = &[
    "BOOLEAN",
    "INTEGER",
    "BIT",
    "OCTET",
    "NULL",
    "SEQUENCE",
    "SET",
    "CHOICE",
    "ENUMERATED",
    "REAL",
    "EXTERNAL",
    "EMBEDDED",
    "OBJECT",
    "RELATIVE-OID",
    "CHARACTER",
    "ANY",
    "UTF8String",
    "ISO646String",
    "NumericString",
    "PrintableString",
    "TeletexString",
    "T61String",
    "VideotexString",
    "IA5String",
    "GraphicString",
    "VisibleString",
    "GeneralString",
    "UniversalString",
    "BMPString",
    "ObjectDescriptor",
    "GeneralizedTime",
    "UTCTime",
];
