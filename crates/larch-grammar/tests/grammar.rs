//! The shipped Larch type grammar must close and validate clean, and its
//! structure must match the grammar it encodes.

use larch_grammar::registry;
use larch_schema::{ChildShape, NodeCategory, NodeRef, TokenKind, TraitTag};
use larch_validate::validate;

#[test]
fn grammar_closes_and_validates_clean() {
    let registry = registry().expect("grammar must close");
    let report = validate(&registry);
    assert!(report.is_valid(), "unexpected violations:\n{report}");
}

#[test]
fn declaration_order_starts_with_type_nodes() {
    let registry = registry().unwrap();
    assert_eq!(registry.len(), 31);
    let first = registry.iter().next().unwrap();
    assert_eq!(first.kind_name(), "SimpleTypeIdentifier");
}

#[test]
fn tuple_type_element_shape() {
    let registry = registry().unwrap();
    let node = registry.resolve("TupleTypeElement").unwrap();
    assert_eq!(node.category(), NodeCategory::Syntax);
    assert_eq!(node.children().len(), 8);
    assert!(node.has_trait(TraitTag::WithTrailingComma));

    let comma = node.child("trailing_comma").unwrap();
    assert!(comma.is_optional());
    assert!(comma.accepts_token(TokenKind::Comma, None));

    // The element's type slot is required and abstract.
    let ty = node.child("type").unwrap();
    assert!(!ty.is_optional());
    assert_eq!(ty.node_ref(), Some(&NodeRef::AnyType));
}

#[test]
fn tuple_type_is_parenthesized() {
    let registry = registry().unwrap();
    let node = registry.resolve("TupleType").unwrap();
    assert!(node.has_trait(TraitTag::Parenthesized));
    assert_eq!(node.children().first().unwrap().name(), "left_paren");
    assert_eq!(node.children().last().unwrap().name(), "right_paren");
}

#[test]
fn function_type_keeps_positional_parens() {
    let registry = registry().unwrap();
    let node = registry.resolve("FunctionType").unwrap();
    // The return clause follows the closing paren, so the delimiter
    // obligation cannot hold here.
    assert!(!node.has_trait(TraitTag::Parenthesized));
    assert_eq!(node.children().last().unwrap().name(), "output");

    let arguments = node.child("arguments").unwrap();
    assert!(arguments.is_collection());
    assert_eq!(arguments.element_name(), Some("argument"));
}

#[test]
fn filtered_views_cover_the_grammar() {
    let registry = registry().unwrap();
    let with_comma: Vec<&str> = registry
        .kinds_with_trait(TraitTag::WithTrailingComma)
        .map(|n| n.kind_name())
        .collect();
    assert_eq!(
        with_comma,
        vec!["TupleTypeElement", "GenericArgument", "GenericParameter"]
    );
    assert_eq!(registry.kinds_in_category(NodeCategory::Collection).count(), 5);
    assert_eq!(registry.kinds_in_category(NodeCategory::Type).count(), 16);
}

#[test]
fn collections_declare_their_element_kinds() {
    let registry = registry().unwrap();
    for (list, element) in [
        ("CompositionTypeElementList", "CompositionTypeElement"),
        ("TupleTypeElementList", "TupleTypeElement"),
        ("GenericArgumentList", "GenericArgument"),
        ("AttributeList", "Attribute"),
        ("GenericParameterList", "GenericParameter"),
    ] {
        let node = registry.resolve(list).unwrap();
        assert!(node.is_collection(), "{list} must be a collection");
        assert_eq!(node.element_kind(), Some(&NodeRef::kind(element)));
        assert!(node.children().is_empty());
    }
}

#[test]
fn keyword_constraints_are_spelled() {
    let registry = registry().unwrap();

    let node = registry.resolve("MetatypeType").unwrap();
    let slot = node.child("type_or_protocol").unwrap();
    assert!(slot.accepts_token(TokenKind::Keyword, Some("Type")));
    assert!(slot.accepts_token(TokenKind::Keyword, Some("Protocol")));
    assert!(!slot.accepts_token(TokenKind::Keyword, Some("Other")));

    let node = registry.resolve("PackReferenceType").unwrap();
    let slot = node.child("each_keyword").unwrap();
    assert!(slot.accepts_token(TokenKind::Keyword, Some("each")));
    assert!(!slot.is_optional());
}

#[test]
fn attributed_type_carries_attribute_machinery() {
    let registry = registry().unwrap();
    let node = registry.resolve("AttributedType").unwrap();
    assert!(node.has_trait(TraitTag::Attributed));

    let specifier = node.child("specifier").unwrap();
    assert!(specifier.is_optional());
    assert!(specifier.accepts_token(TokenKind::Keyword, Some("inout")));
    assert!(specifier.accepts_token(TokenKind::Keyword, Some("__owned")));

    let attributes = node.child("attributes").unwrap();
    assert!(matches!(
        attributes.shape(),
        ChildShape::Collection(NodeRef::Kind(kind)) if kind == "AttributeList"
    ));
}

#[test]
fn diagnostic_labels_present_where_meaningful() {
    let registry = registry().unwrap();
    assert_eq!(
        registry.resolve("DictionaryType").unwrap().diagnostic_label(),
        Some("dictionary type")
    );
    // Synthetic list nodes carry no production name.
    assert_eq!(
        registry.resolve("TupleTypeElementList").unwrap().diagnostic_label(),
        None
    );
    let dict = registry.resolve("DictionaryType").unwrap();
    assert_eq!(
        dict.child("key_type").unwrap().diagnostic_label(),
        Some("key type")
    );
}
