//! Integration tests exercising the crate's two public entry points against
//! representative end-to-end module sources and the corner-case behaviors
//! the Transformer is responsible for.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::{parse_string, CollectingReporter, ParseError, Parser};

fn tree_json(source: &str) -> Value {
    let tree = parse_string(source).unwrap_or_else(|e| panic!("expected a successful parse of {source:?}, got {e}"));
    serde_json::to_value(&tree).unwrap()
}

#[test]
fn s1_minimal_module() {
    let got = tree_json("M DEFINITIONS ::= BEGIN A ::= INTEGER END");
    assert_eq!(
        got,
        json!({
            "M": {
                "extensibility-implied": false,
                "imports": {},
                "types": {"A": {"type": "INTEGER"}},
                "values": {},
                "object-classes": {},
                "object-sets": {},
            }
        })
    );
}

#[test]
fn s2_sized_sequence_of() {
    let got = tree_json("M DEFINITIONS ::= BEGIN T ::= SEQUENCE (SIZE(1..4)) OF INTEGER END");
    let ty = &got["M"]["types"]["T"];
    assert_eq!(ty["type"], "SEQUENCE OF");
    assert_eq!(ty["size"], json!([[1, 4]]));
    assert_eq!(ty["element"], json!({"type": "INTEGER"}));
}

#[test]
fn s3_enumerated_with_gap_and_extension() {
    let got = tree_json("M DEFINITIONS ::= BEGIN E ::= ENUMERATED {a, b(5), c, ..., d} END");
    let values = &got["M"]["types"]["E"]["values"];
    assert_eq!(
        values,
        &json!([["a", 0], ["b", 5], ["c", 1], "...", ["d", 2]])
    );
}

#[test]
fn s4_tagged_choice_member() {
    let got = tree_json("M DEFINITIONS IMPLICIT TAGS ::= BEGIN C ::= CHOICE { x [0] INTEGER, y UTF8String } END");
    let member = &got["M"]["types"]["C"]["members"][0];
    assert_eq!(member["type"], "INTEGER");
    assert_eq!(member["name"], "x");
    assert_eq!(member["tag"], json!({"number": 0}));
    assert!(member["tag"].get("class").is_none());
    assert!(member["tag"].get("kind").is_none());
}

#[test]
fn s5_bit_string_canonicalization() {
    let got = tree_json("M DEFINITIONS ::= BEGIN v INTEGER ::= 17 b BIT STRING ::= 'DE AD'H END");
    assert_eq!(got["M"]["values"]["v"], json!({"type": "INTEGER", "value": 17}));
    assert_eq!(got["M"]["values"]["b"]["value"], "0xdead");
}

#[test]
fn s6_imports() {
    let got = tree_json("M DEFINITIONS ::= BEGIN IMPORTS X, Y FROM N; END");
    assert_eq!(got["M"]["imports"], json!({"N": ["X", "Y"]}));
}

#[test]
fn enumerated_numbers_are_unique_within_a_type() {
    // A duplicated explicit number is a hard error, not a silently-accepted
    // collision, per the Transformer's ENUMERATED pass.
    let err = parse_string("M DEFINITIONS ::= BEGIN E ::= ENUMERATED {a(0), b(0)} END").unwrap_err();
    assert!(matches!(err, ParseError::Semantic { .. }), "expected a semantic error, got {err:?}");
}

#[test]
fn enumerated_auto_numbering_skips_explicit_values() {
    // b claims 0 explicitly; a and c must skip it when auto-assigned.
    let got = tree_json("M DEFINITIONS ::= BEGIN E ::= ENUMERATED {a, b(0), c} END");
    assert_eq!(got["M"]["types"]["E"]["values"], json!([["a", 1], ["b", 0], ["c", 2]]));
}

#[test]
fn enumerated_item_accepts_a_defined_value_as_its_number() {
    // `NamedNumber`'s parenthesized value is `signed-number | definedValue`;
    // an unresolved reference still parses rather than dead-ending back to
    // the bare-identifier alternative and failing on the trailing `(...)`.
    let got = tree_json("M DEFINITIONS ::= BEGIN E ::= ENUMERATED {a(someConstant), b} END");
    assert_eq!(got["M"]["types"]["E"]["values"], json!([["a", 0], ["b", 1]]));
}

#[test]
fn sequence_member_names_must_be_unique() {
    // Duplicated member names are reported as a warning rather than
    // aborting the parse.
    let mut reporter = CollectingReporter::new();
    let tree = Parser::new("M DEFINITIONS ::= BEGIN S ::= SEQUENCE { a INTEGER, a BOOLEAN } END")
        .parse_with(&mut reporter)
        .expect("duplicate member names are a warning, not a parse failure");
    assert_eq!(tree.modules["M"].types["S"].members.len(), 2);
    assert!(reporter.warnings().iter().any(|w| w.message.contains("duplicate member name")));
}

#[test]
fn integer_value_range_endpoints_are_numeric() {
    // Plain numeric range endpoints compare min <= max; MIN/MAX sentinels
    // are preserved rather than coerced to a number.
    let got = tree_json("M DEFINITIONS ::= BEGIN T ::= INTEGER (1..100) END");
    assert_eq!(got["M"]["types"]["T"]["restricted-to"], json!([[1, 100]]));

    let got = tree_json("M DEFINITIONS ::= BEGIN T ::= INTEGER (MIN..0) END");
    assert_eq!(got["M"]["types"]["T"]["restricted-to"], json!([["MIN", 0]]));
}

#[test]
fn with_component_lifts_its_nested_constraint() {
    // `WITH COMPONENT`'s payload is a real nested Constraint, not an opaque
    // marker — it must lift into a real inner-type-constraint descriptor.
    let got = tree_json("M DEFINITIONS ::= BEGIN T ::= INTEGER (WITH COMPONENT (1..10)) END");
    let with_components = &got["M"]["types"]["T"]["with-components"];
    assert_eq!(with_components["type"], "WITH COMPONENT");
    assert_eq!(with_components["restricted-to"], json!([[1, 10]]));
}

#[test]
fn with_components_preserves_its_captured_text() {
    let got = tree_json("M DEFINITIONS ::= BEGIN T ::= SEQUENCE { a INTEGER, b BOOLEAN } (WITH COMPONENTS {a (1..10)}) END");
    let with_components = &got["M"]["types"]["T"]["with-components"];
    assert_eq!(with_components["type"], "WITH COMPONENTS");
    let captured = with_components["restricted-to"][0].as_str().unwrap();
    assert!(captured.contains('a') && captured.contains("10"));
}

#[test]
fn extension_marker_round_trips_in_a_component_list() {
    let got = tree_json("M DEFINITIONS ::= BEGIN S ::= SEQUENCE { a INTEGER, ..., b BOOLEAN } END");
    let members = got["M"]["types"]["S"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[1], "...");
}

#[test]
fn extension_addition_group_nests_its_members() {
    let got = tree_json("M DEFINITIONS ::= BEGIN S ::= SEQUENCE { a INTEGER, ..., [[ b BOOLEAN ]] } END");
    let members = got["M"]["types"]["S"]["members"].as_array().unwrap();
    let group = members.last().unwrap().as_array().expect("extension addition group is a nested list");
    assert_eq!(group[0]["name"], "b");
}

#[test]
fn components_of_becomes_a_synthetic_member() {
    let got = tree_json("M DEFINITIONS ::= BEGIN S ::= SEQUENCE { COMPONENTS OF T, a INTEGER } END");
    assert_eq!(got["M"]["types"]["S"]["members"][0], json!({"components-of": "T"}));
}

#[test]
fn optional_and_default_members() {
    let got = tree_json("M DEFINITIONS ::= BEGIN S ::= SEQUENCE { a INTEGER OPTIONAL, b BOOLEAN DEFAULT TRUE } END");
    let members = &got["M"]["types"]["S"]["members"];
    assert_eq!(members[0]["optional"], true);
    assert_eq!(members[1]["default"], json!({"type": "BOOLEAN", "value": true}));
}

#[test]
fn object_identifier_value_mixes_name_and_number_forms() {
    let got = tree_json("M DEFINITIONS ::= BEGIN id OBJECT IDENTIFIER ::= { iso(1) member-body(2) 3 } END");
    assert_eq!(got["M"]["values"]["id"]["value"], json!([["iso", 1], ["member-body", 2], 3]));
}

#[test]
fn duplicate_type_assignment_warns_and_overwrites() {
    // Duplicate type assignments resolve to "warn, last wins".
    let mut reporter = CollectingReporter::new();
    let tree = Parser::new("M DEFINITIONS ::= BEGIN A ::= INTEGER A ::= BOOLEAN END")
        .parse_with(&mut reporter)
        .unwrap();
    assert_eq!(tree.modules["M"].types["A"].type_name, "BOOLEAN");
    assert!(reporter.warnings().iter().any(|w| w.message.contains("duplicate type assignment")));
}

#[test]
fn malformed_syntax_reports_line_and_column() {
    let err = parse_string("M DEFINITIONS ::= BEGIN A ::= END").unwrap_err();
    match err {
        ParseError::Syntax { line, column, .. } => {
            assert_eq!(line, 1);
            assert!(column > 0);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn unsupported_encoding_is_rejected_before_any_file_is_opened() {
    let err = crate::parse_files(&["/does/not/exist.asn1"], "latin-1").unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedEncoding(_)));
}

#[test]
fn recursion_limit_override_aborts_with_a_limit_error() {
    // Each `SEQUENCE OF` nesting level re-enters `type_`, which wraps its
    // body in `Engine::recurse` — a deterministic way to exceed a tight
    // recursion limit without depending on constraint-nesting recursion.
    let nested = "SEQUENCE OF ".repeat(64) + "INTEGER";
    let source = format!("M DEFINITIONS ::= BEGIN T ::= {nested} END");
    let err = Parser::new(&source).recursion_limit(16).parse().unwrap_err();
    assert!(matches!(err, ParseError::Limit { .. }), "expected a limit error, got {err:?}");
}

#[test]
fn tag_default_is_captured_per_module() {
    let got = tree_json("M DEFINITIONS AUTOMATIC TAGS ::= BEGIN A ::= INTEGER END");
    assert_eq!(got["M"]["tags"], "AUTOMATIC");
}

#[test]
fn extensibility_implied_defaults_to_false() {
    let got = tree_json("M DEFINITIONS EXTENSIBILITY IMPLIED ::= BEGIN A ::= INTEGER END");
    assert_eq!(got["M"]["extensibility-implied"], true);

    let got = tree_json("M DEFINITIONS ::= BEGIN A ::= INTEGER END");
    assert_eq!(got["M"]["extensibility-implied"], false);
}

#[test]
fn concatenated_modules_parse_independently() {
    let got = tree_json(
        "M1 DEFINITIONS ::= BEGIN A ::= INTEGER END\nM2 DEFINITIONS ::= BEGIN B ::= BOOLEAN END",
    );
    assert_eq!(got["M1"]["types"]["A"]["type"], "INTEGER");
    assert_eq!(got["M2"]["types"]["B"]["type"], "BOOLEAN");
}

#[test]
fn information_object_class_skeleton_is_captured() {
    let got = tree_json(
        "M DEFINITIONS ::= BEGIN \
         MY-CLASS ::= CLASS { &Type, &id INTEGER UNIQUE } \
         END",
    );
    let fields = got["M"]["object-classes"]["MY-CLASS"]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["kind"], "type");
    assert_eq!(fields[1]["kind"], "fixed-type-value");
}

#[test]
fn parameterized_type_assignment_keeps_the_underlying_type() {
    let got = tree_json("M DEFINITIONS ::= BEGIN Wrapped{T} ::= SEQUENCE { value T } END");
    assert_eq!(got["M"]["types"]["Wrapped"]["type"], "SEQUENCE");
    assert_eq!(got["M"]["types"]["Wrapped"]["members"][0]["name"], "value");
}

#[test]
fn parameterized_value_assignment_keeps_the_underlying_value() {
    let got = tree_json("M DEFINITIONS ::= BEGIN v {INTEGER} INTEGER ::= 5 END");
    assert_eq!(got["M"]["values"]["v"], json!({"type": "INTEGER", "value": 5}));
}
