//! The type-producing productions of the Larch grammar.

use larch_schema::{
    ChildDescriptor, NodeCategory, NodeDescriptor, NodeRef, TokenKind, TraitTag,
};

use crate::{kw, t, token, GrammarError};

/// Declare every type-grammar production, in source order.
pub fn type_nodes() -> Result<Vec<NodeDescriptor>, GrammarError> {
    let mut nodes = Vec::new();

    // simple-type-identifier -> identifier generic-argument-clause?
    nodes.push(
        NodeDescriptor::new(
            "SimpleTypeIdentifier",
            NodeCategory::Type,
            vec![
                ChildDescriptor::token(
                    "name",
                    vec![
                        t(TokenKind::Identifier),
                        t(TokenKind::Keyword),
                        t(TokenKind::Wildcard),
                    ],
                )?,
                ChildDescriptor::node(
                    "generic_argument_clause",
                    NodeRef::kind("GenericArgumentClause"),
                )
                .optional(),
            ],
        )?
        .with_diagnostic_label("type"),
    );

    // member-type-identifier -> type '.' identifier generic-argument-clause?
    nodes.push(
        NodeDescriptor::new(
            "MemberTypeIdentifier",
            NodeCategory::Type,
            vec![
                ChildDescriptor::node("base_type", NodeRef::AnyType)
                    .with_diagnostic_label("base type"),
                token("period", TokenKind::Period)?,
                ChildDescriptor::token(
                    "name",
                    vec![t(TokenKind::Identifier), t(TokenKind::Keyword)],
                )?
                .with_diagnostic_label("name"),
                ChildDescriptor::node(
                    "generic_argument_clause",
                    NodeRef::kind("GenericArgumentClause"),
                )
                .optional(),
            ],
        )?
        .with_diagnostic_label("member type"),
    );

    // class-restriction-type -> 'class'
    nodes.push(NodeDescriptor::new(
        "ClassRestrictionType",
        NodeCategory::Type,
        vec![ChildDescriptor::token("class_keyword", vec![kw("class")])?],
    )?);

    // array-type -> '[' type ']'
    nodes.push(
        NodeDescriptor::new(
            "ArrayType",
            NodeCategory::Type,
            vec![
                token("left_square_bracket", TokenKind::LeftSquareBracket)?,
                ChildDescriptor::node("element_type", NodeRef::AnyType),
                token("right_square_bracket", TokenKind::RightSquareBracket)?,
            ],
        )?
        .with_diagnostic_label("array type"),
    );

    // dictionary-type -> '[' type ':' type ']'
    nodes.push(
        NodeDescriptor::new(
            "DictionaryType",
            NodeCategory::Type,
            vec![
                token("left_square_bracket", TokenKind::LeftSquareBracket)?,
                ChildDescriptor::node("key_type", NodeRef::AnyType)
                    .with_diagnostic_label("key type"),
                token("colon", TokenKind::Colon)?,
                ChildDescriptor::node("value_type", NodeRef::AnyType)
                    .with_diagnostic_label("value type"),
                token("right_square_bracket", TokenKind::RightSquareBracket)?,
            ],
        )?
        .with_diagnostic_label("dictionary type"),
    );

    // metatype-type -> type '.' 'Type'
    //                | type '.' 'Protocol'
    nodes.push(
        NodeDescriptor::new(
            "MetatypeType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::node("base_type", NodeRef::AnyType)
                    .with_diagnostic_label("base type"),
                token("period", TokenKind::Period)?,
                ChildDescriptor::token(
                    "type_or_protocol",
                    vec![kw("Type"), kw("Protocol")],
                )?,
            ],
        )?
        .with_diagnostic_label("metatype"),
    );

    // optional-type -> type '?'
    nodes.push(
        NodeDescriptor::new(
            "OptionalType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::node("wrapped_type", NodeRef::AnyType),
                token("question_mark", TokenKind::PostfixQuestionMark)?,
            ],
        )?
        .with_diagnostic_label("optional type"),
    );

    // constrained-sugar-type -> ('some'|'any') type
    nodes.push(
        NodeDescriptor::new(
            "ConstrainedSugarType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::token(
                    "some_or_any_specifier",
                    vec![kw("some"), kw("any")],
                )?,
                ChildDescriptor::node("base_type", NodeRef::AnyType),
            ],
        )?
        .with_diagnostic_label("type"),
    );

    // implicitly-unwrapped-optional-type -> type '!'
    nodes.push(
        NodeDescriptor::new(
            "ImplicitlyUnwrappedOptionalType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::node("wrapped_type", NodeRef::AnyType),
                token("exclamation_mark", TokenKind::ExclamationMark)?,
            ],
        )?
        .with_diagnostic_label("implicitly unwrapped optional type"),
    );

    // composition-type-element -> type '&'?
    nodes.push(NodeDescriptor::new(
        "CompositionTypeElement",
        NodeCategory::Syntax,
        vec![
            ChildDescriptor::node("type", NodeRef::AnyType),
            token("ampersand", TokenKind::Ampersand)?.optional(),
        ],
    )?);

    // composition-type-element-list -> composition-type-element ...
    nodes.push(NodeDescriptor::collection(
        "CompositionTypeElementList",
        "CompositionTypeElement",
    ));

    // composition-type -> composition-type-element-list
    nodes.push(
        NodeDescriptor::new(
            "CompositionType",
            NodeCategory::Type,
            vec![ChildDescriptor::collection(
                "elements",
                "CompositionTypeElementList",
                "element",
            )],
        )?
        .with_diagnostic_label("type composition"),
    );

    // pack-expansion-type -> 'repeat' type
    nodes.push(
        NodeDescriptor::new(
            "PackExpansionType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::token("repeat_keyword", vec![kw("repeat")])?,
                ChildDescriptor::node("pattern_type", NodeRef::AnyType),
            ],
        )?
        .with_diagnostic_label("variadic expansion"),
    );

    // pack-reference-type -> 'each' type
    nodes.push(
        NodeDescriptor::new(
            "PackReferenceType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::token("each_keyword", vec![kw("each")])?,
                ChildDescriptor::node("pack_type", NodeRef::AnyType),
            ],
        )?
        .with_diagnostic_label("pack reference"),
    );

    // tuple-type-element -> 'inout'? identifier? identifier? ':'? type
    //   '...'? initializer-clause? ','?
    nodes.push(
        NodeDescriptor::new(
            "TupleTypeElement",
            NodeCategory::Syntax,
            vec![
                token("in_out", TokenKind::Inout)?.optional(),
                ChildDescriptor::token(
                    "name",
                    vec![t(TokenKind::Identifier), t(TokenKind::Wildcard)],
                )?
                .optional()
                .with_diagnostic_label("name"),
                ChildDescriptor::token(
                    "second_name",
                    vec![t(TokenKind::Identifier), t(TokenKind::Wildcard)],
                )?
                .optional()
                .with_diagnostic_label("internal name"),
                token("colon", TokenKind::Colon)?.optional(),
                ChildDescriptor::node("type", NodeRef::AnyType),
                token("ellipsis", TokenKind::Ellipsis)?.optional(),
                ChildDescriptor::node("initializer", NodeRef::kind("InitializerClause"))
                    .optional(),
                token("trailing_comma", TokenKind::Comma)?.optional(),
            ],
        )?
        .with_trait(TraitTag::WithTrailingComma),
    );

    // tuple-type-element-list -> tuple-type-element ...
    nodes.push(NodeDescriptor::collection(
        "TupleTypeElementList",
        "TupleTypeElement",
    ));

    // tuple-type -> '(' tuple-type-element-list ')'
    nodes.push(
        NodeDescriptor::new(
            "TupleType",
            NodeCategory::Type,
            vec![
                token("left_paren", TokenKind::LeftParen)?,
                ChildDescriptor::collection("elements", "TupleTypeElementList", "element")
                    .indented(),
                token("right_paren", TokenKind::RightParen)?,
            ],
        )?
        .with_diagnostic_label("tuple type")
        .with_trait(TraitTag::Parenthesized),
    );

    // function-type -> '(' tuple-type-element-list ')'
    //   type-effect-specifiers? return-clause
    //
    // The paren pair is positional here (the return clause follows the
    // closing paren), so the node does not satisfy the delimiter trait.
    nodes.push(
        NodeDescriptor::new(
            "FunctionType",
            NodeCategory::Type,
            vec![
                token("left_paren", TokenKind::LeftParen)?,
                ChildDescriptor::collection("arguments", "TupleTypeElementList", "argument")
                    .indented(),
                token("right_paren", TokenKind::RightParen)?,
                ChildDescriptor::node(
                    "effect_specifiers",
                    NodeRef::kind("TypeEffectSpecifiers"),
                )
                .optional(),
                ChildDescriptor::node("output", NodeRef::kind("ReturnClause")),
            ],
        )?
        .with_diagnostic_label("function type"),
    );

    // attributed-type -> type-specifier? attribute-list? type
    // type-specifier -> 'inout' | '__shared' | '__owned' | 'isolated' | '_const'
    nodes.push(
        NodeDescriptor::new(
            "AttributedType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::token(
                    "specifier",
                    vec![
                        kw("inout"),
                        kw("__shared"),
                        kw("__owned"),
                        kw("isolated"),
                        kw("_const"),
                    ],
                )?
                .optional(),
                ChildDescriptor::collection("attributes", "AttributeList", "attribute"),
                ChildDescriptor::node("base_type", NodeRef::AnyType),
            ],
        )?
        .with_diagnostic_label("type")
        .with_trait(TraitTag::Attributed),
    );

    // generic-argument-list -> generic-argument ...
    nodes.push(NodeDescriptor::collection(
        "GenericArgumentList",
        "GenericArgument",
    ));

    // generic-argument -> type ','?
    nodes.push(
        NodeDescriptor::new(
            "GenericArgument",
            NodeCategory::Syntax,
            vec![
                ChildDescriptor::node("argument_type", NodeRef::AnyType),
                token("trailing_comma", TokenKind::Comma)?.optional(),
            ],
        )?
        .with_diagnostic_label("generic argument")
        .with_trait(TraitTag::WithTrailingComma),
    );

    // generic-argument-clause -> '<' generic-argument-list '>'
    nodes.push(
        NodeDescriptor::new(
            "GenericArgumentClause",
            NodeCategory::Syntax,
            vec![
                token("left_angle_bracket", TokenKind::LeftAngle)?,
                ChildDescriptor::collection("arguments", "GenericArgumentList", "argument"),
                token("right_angle_bracket", TokenKind::RightAngle)?,
            ],
        )?
        .with_diagnostic_label("generic argument clause"),
    );

    // named-opaque-return-type -> generic-parameter-clause type
    nodes.push(
        NodeDescriptor::new(
            "NamedOpaqueReturnType",
            NodeCategory::Type,
            vec![
                ChildDescriptor::node(
                    "generic_parameters",
                    NodeRef::kind("GenericParameterClause"),
                ),
                ChildDescriptor::node("base_type", NodeRef::AnyType),
            ],
        )?
        .with_diagnostic_label("named opaque return type"),
    );

    Ok(nodes)
}
