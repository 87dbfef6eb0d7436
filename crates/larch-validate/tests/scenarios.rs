//! End-to-end validation scenarios over hand-built registries.
//!
//! Each test registers a small grammar slice, closes the registry, and
//! checks the validation report against the expected violations.

use larch_schema::{
    ChildDescriptor, NodeCategory, NodeDescriptor, NodeRef, RegistryBuilder, TokenChoice,
    TokenKind, TraitTag,
};
use larch_validate::{validate, InvariantKind};

fn token(name: &str, kind: TokenKind) -> ChildDescriptor {
    ChildDescriptor::token(name, vec![TokenChoice::bare(kind)]).unwrap()
}

/// SimpleTypeIdentifier + the generic-argument productions it needs:
/// a mutually recursive slice that closes and validates clean.
#[test]
fn scenario_a_generic_identifier_slice_is_clean() {
    let mut builder = RegistryBuilder::new();

    builder
        .register(
            NodeDescriptor::new(
                "SimpleTypeIdentifier",
                NodeCategory::Type,
                vec![
                    token("name", TokenKind::Identifier),
                    ChildDescriptor::node(
                        "generic_argument_clause",
                        NodeRef::kind("GenericArgumentClause"),
                    )
                    .optional(),
                ],
            )
            .unwrap()
            .with_diagnostic_label("type"),
        )
        .unwrap();
    builder
        .register(
            NodeDescriptor::new(
                "GenericArgumentClause",
                NodeCategory::Syntax,
                vec![
                    token("left_angle_bracket", TokenKind::LeftAngle),
                    ChildDescriptor::collection("arguments", "GenericArgumentList", "argument"),
                    token("right_angle_bracket", TokenKind::RightAngle),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    builder
        .register(NodeDescriptor::collection(
            "GenericArgumentList",
            "GenericArgument",
        ))
        .unwrap();
    builder
        .register(
            NodeDescriptor::new(
                "GenericArgument",
                NodeCategory::Syntax,
                vec![
                    ChildDescriptor::node("argument_type", NodeRef::AnyType),
                    token("trailing_comma", TokenKind::Comma).optional(),
                ],
            )
            .unwrap()
            .with_trait(TraitTag::WithTrailingComma),
        )
        .unwrap();

    let registry = builder.close().expect("slice must close");
    let report = validate(&registry);
    assert!(report.is_valid(), "unexpected violations:\n{report}");
}

/// A single required child referencing its own kind with no indirection
/// is unbounded recursion.
#[test]
fn scenario_b_direct_required_self_reference() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "Recursive",
                NodeCategory::Type,
                vec![ChildDescriptor::node("inner", NodeRef::kind("Recursive"))],
            )
            .unwrap(),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let report = validate(&registry);
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.invariant, InvariantKind::UnboundedRecursion);
    assert_eq!(violation.kind_name, "Recursive");
    assert_eq!(violation.child_name.as_deref(), Some("inner"));
}

/// The same recursion broken by an optional slot is legal.
#[test]
fn scenario_b_optional_self_reference_is_legal() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "Recursive",
                NodeCategory::Type,
                vec![
                    token("name", TokenKind::Identifier),
                    ChildDescriptor::node("inner", NodeRef::kind("Recursive")).optional(),
                ],
            )
            .unwrap(),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    assert!(validate(&registry).is_valid());
}

/// A required chain A -> B -> A is reported for every kind on the cycle.
#[test]
fn required_chain_cycle_reported_for_each_kind() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "MetatypeType",
                NodeCategory::Type,
                vec![ChildDescriptor::node("base", NodeRef::kind("ReturnClause"))],
            )
            .unwrap(),
        )
        .unwrap();
    builder
        .register(
            NodeDescriptor::new(
                "ReturnClause",
                NodeCategory::Syntax,
                vec![ChildDescriptor::node(
                    "return_type",
                    NodeRef::kind("MetatypeType"),
                )],
            )
            .unwrap(),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let report = validate(&registry);
    let recursion: Vec<_> = report
        .violations()
        .iter()
        .filter(|v| v.invariant == InvariantKind::UnboundedRecursion)
        .collect();
    assert_eq!(recursion.len(), 2);
    assert!(recursion
        .iter()
        .any(|v| v.kind_name == "MetatypeType" && v.child_name.as_deref() == Some("base")));
    assert!(recursion
        .iter()
        .any(|v| v.kind_name == "ReturnClause" && v.child_name.as_deref() == Some("return_type")));
}

/// Two comma-accepting children under WithTrailingComma: both named.
#[test]
fn scenario_c_ambiguous_trailing_comma() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "TupleTypeElement",
                NodeCategory::Syntax,
                vec![
                    ChildDescriptor::node("type", NodeRef::AnyType),
                    token("separator", TokenKind::Comma).optional(),
                    token("trailing_comma", TokenKind::Comma).optional(),
                ],
            )
            .unwrap()
            .with_trait(TraitTag::WithTrailingComma),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let report = validate(&registry);
    let offenders: Vec<&str> = report
        .violations()
        .iter()
        .filter(|v| v.invariant == InvariantKind::TrailingComma)
        .filter_map(|v| v.child_name.as_deref())
        .collect();
    assert_eq!(offenders, vec!["separator", "trailing_comma"]);
}

/// Duplicate kind registration fails and the registry keeps the first.
#[test]
fn scenario_d_duplicate_kind_keeps_first() {
    let mut builder = RegistryBuilder::new();
    let first = NodeDescriptor::new(
        "ArrayType",
        NodeCategory::Type,
        vec![token("left_square_bracket", TokenKind::LeftSquareBracket)],
    )
    .unwrap();
    let second = NodeDescriptor::new("ArrayType", NodeCategory::Type, vec![]).unwrap();

    builder.register(first).unwrap();
    let err = builder.register(second).unwrap_err();
    assert_eq!(err.kind_name, "ArrayType");

    let registry = builder.close().unwrap();
    assert_eq!(registry.len(), 1);
    let kept = registry.resolve("ArrayType").unwrap();
    assert_eq!(kept.children().len(), 1);
}

/// Duplicate child names are a validation finding, not a build abort.
#[test]
fn duplicate_child_names_reported() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "DictionaryType",
                NodeCategory::Type,
                vec![
                    ChildDescriptor::node("key_type", NodeRef::AnyType),
                    ChildDescriptor::node("key_type", NodeRef::AnyType),
                ],
            )
            .unwrap(),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let report = validate(&registry);
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations()[0].invariant, InvariantKind::DuplicateChildName);
    assert_eq!(report.violations()[0].child_name.as_deref(), Some("key_type"));
}

/// A required spelling on a category that cannot carry one.
#[test]
fn spelled_identifier_reported() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "ClassRestrictionType",
                NodeCategory::Type,
                vec![ChildDescriptor::token(
                    "class_keyword",
                    vec![TokenChoice::spelled(TokenKind::Identifier, "class")],
                )
                .unwrap()],
            )
            .unwrap(),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let report = validate(&registry);
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.invariant, InvariantKind::TokenSpelling);
    insta::assert_snapshot!(
        violation.to_string(),
        @"ClassRestrictionType.class_keyword: category identifier cannot carry the required spelling `class` [token-spelling]"
    );
}

/// Running the engine twice on the same registry yields identical reports.
#[test]
fn validation_is_idempotent() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "Recursive",
                NodeCategory::Type,
                vec![ChildDescriptor::node("inner", NodeRef::kind("Recursive"))],
            )
            .unwrap(),
        )
        .unwrap();
    builder
        .register(
            NodeDescriptor::new(
                "TupleType",
                NodeCategory::Type,
                vec![
                    token("left_paren", TokenKind::LeftParen).optional(),
                    token("right_paren", TokenKind::RightParen),
                ],
            )
            .unwrap()
            .with_trait(TraitTag::Parenthesized),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let first = validate(&registry);
    let second = validate(&registry);
    assert!(!first.is_valid());
    assert_eq!(first, second);
}

/// Violations serialize as the structured records downstream tooling
/// consumes: kind, optional child, invariant, message.
#[test]
fn violations_serialize_to_json() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            NodeDescriptor::new(
                "Recursive",
                NodeCategory::Type,
                vec![ChildDescriptor::node("inner", NodeRef::kind("Recursive"))],
            )
            .unwrap(),
        )
        .unwrap();

    let registry = builder.close().unwrap();
    let report = validate(&registry);
    let json = serde_json::to_value(report.violations()).unwrap();
    assert_eq!(json[0]["kind_name"], "Recursive");
    assert_eq!(json[0]["child_name"], "inner");
    assert_eq!(json[0]["invariant"], "UnboundedRecursion");
}
