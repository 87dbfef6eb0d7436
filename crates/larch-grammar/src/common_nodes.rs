//! Auxiliary productions referenced by the type grammar.
//!
//! These are not themselves type-producing but appear as child kinds of
//! type nodes: return clauses, effect specifiers, attributes,
//! initializer clauses, and generic parameter clauses.

use larch_schema::{ChildDescriptor, NodeCategory, NodeDescriptor, NodeRef, TokenKind, TraitTag};

use crate::{kw, t, token, GrammarError};

/// Declare the shared productions the type nodes reference.
pub fn common_nodes() -> Result<Vec<NodeDescriptor>, GrammarError> {
    let mut nodes = Vec::new();

    // return-clause -> '->' type
    nodes.push(
        NodeDescriptor::new(
            "ReturnClause",
            NodeCategory::Syntax,
            vec![
                token("arrow", TokenKind::Arrow)?,
                ChildDescriptor::node("return_type", NodeRef::AnyType)
                    .with_diagnostic_label("return type"),
            ],
        )?
        .with_diagnostic_label("return clause"),
    );

    // type-effect-specifiers -> 'async'? 'throws'?
    nodes.push(
        NodeDescriptor::new(
            "TypeEffectSpecifiers",
            NodeCategory::Syntax,
            vec![
                ChildDescriptor::token("async_specifier", vec![kw("async")])?.optional(),
                ChildDescriptor::token("throws_specifier", vec![kw("throws")])?.optional(),
            ],
        )?
        .with_diagnostic_label("effect specifiers"),
    );

    // attribute-list -> attribute ...
    nodes.push(NodeDescriptor::collection("AttributeList", "Attribute"));

    // attribute -> '@' type
    nodes.push(
        NodeDescriptor::new(
            "Attribute",
            NodeCategory::Syntax,
            vec![
                token("at_sign", TokenKind::AtSign)?,
                ChildDescriptor::node("attribute_name", NodeRef::AnyType)
                    .with_diagnostic_label("name"),
            ],
        )?
        .with_diagnostic_label("attribute"),
    );

    // initializer-clause -> '=' type
    //
    // The initializer's value grammar is outside the type slice, so the
    // value slot accepts the abstract type category.
    nodes.push(
        NodeDescriptor::new(
            "InitializerClause",
            NodeCategory::Syntax,
            vec![
                token("equal", TokenKind::Equal)?,
                ChildDescriptor::node("value", NodeRef::AnyType).with_diagnostic_label("value"),
            ],
        )?
        .with_diagnostic_label("initializer clause"),
    );

    // generic-parameter-list -> generic-parameter ...
    nodes.push(NodeDescriptor::collection(
        "GenericParameterList",
        "GenericParameter",
    ));

    // generic-parameter -> identifier ','?
    nodes.push(
        NodeDescriptor::new(
            "GenericParameter",
            NodeCategory::Syntax,
            vec![
                ChildDescriptor::token("name", vec![t(TokenKind::Identifier)])?,
                token("trailing_comma", TokenKind::Comma)?.optional(),
            ],
        )?
        .with_diagnostic_label("generic parameter")
        .with_trait(TraitTag::WithTrailingComma),
    );

    // generic-parameter-clause -> '<' generic-parameter-list '>'
    nodes.push(
        NodeDescriptor::new(
            "GenericParameterClause",
            NodeCategory::Syntax,
            vec![
                token("left_angle_bracket", TokenKind::LeftAngle)?,
                ChildDescriptor::collection("parameters", "GenericParameterList", "parameter"),
                token("right_angle_bracket", TokenKind::RightAngle)?,
            ],
        )?
        .with_diagnostic_label("generic parameter clause"),
    );

    Ok(nodes)
}
