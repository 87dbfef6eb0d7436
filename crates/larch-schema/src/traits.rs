//! Cross-cutting structural obligations a node may opt into.
//!
//! A trait is a named predicate over a node's child list. Traits never
//! mutate the node; [`TraitTag::check`] only reports which slots break
//! the obligation, so callers get precise diagnostics. Consumers that
//! perform generic tree operations (trailing-comma insertion, delimiter
//! matching, attribute handling) rely on these obligations holding
//! uniformly across every declaring node.

use std::fmt;

use serde::Serialize;

use crate::child::ChildDescriptor;
use crate::node::NodeDescriptor;
use crate::token::TokenKind;

/// The trait tags of the Larch type grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TraitTag {
    /// The node carries exactly one optional comma slot for trailing-comma
    /// handling in element lists.
    WithTrailingComma,
    /// The node is enclosed by a matching delimiter pair: its first child
    /// is a required open-delimiter token and its last child the matching
    /// required close-delimiter token.
    Parenthesized,
    /// The node carries an attribute-list collection slot and an optional
    /// specifier token slot.
    Attributed,
}

impl TraitTag {
    /// The canonical name of the trait, as used in reports.
    pub fn name(self) -> &'static str {
        match self {
            TraitTag::WithTrailingComma => "WithTrailingComma",
            TraitTag::Parenthesized => "Parenthesized",
            TraitTag::Attributed => "Attributed",
        }
    }

    /// Check the trait's predicate against `node`.
    ///
    /// Returns an empty list when satisfied, otherwise one violation per
    /// implicated child slot (or one with no slot when the node lacks a
    /// required slot entirely).
    pub fn check(self, node: &NodeDescriptor) -> Vec<TraitViolation> {
        match self {
            TraitTag::WithTrailingComma => check_trailing_comma(node),
            TraitTag::Parenthesized => check_parenthesized(node),
            TraitTag::Attributed => check_attributed(node),
        }
    }
}

impl fmt::Display for TraitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single failed obligation, naming the implicated slot when there is one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitViolation {
    pub trait_tag: TraitTag,
    /// The child slot at fault, or `None` when the node is missing a slot.
    pub child: Option<String>,
    pub message: String,
}

impl TraitViolation {
    fn at(trait_tag: TraitTag, child: &ChildDescriptor, message: impl Into<String>) -> Self {
        Self {
            trait_tag,
            child: Some(child.name().to_string()),
            message: message.into(),
        }
    }

    fn whole_node(trait_tag: TraitTag, message: impl Into<String>) -> Self {
        Self {
            trait_tag,
            child: None,
            message: message.into(),
        }
    }
}

/// Exactly one child accepts a comma token, and that child is optional.
fn check_trailing_comma(node: &NodeDescriptor) -> Vec<TraitViolation> {
    let tag = TraitTag::WithTrailingComma;
    let candidates: Vec<&ChildDescriptor> = node
        .children()
        .iter()
        .filter(|c| c.accepts_token(TokenKind::Comma, None) || c.accepts_token(TokenKind::Comma, Some(",")))
        .collect();

    match candidates.as_slice() {
        [] => vec![TraitViolation::whole_node(
            tag,
            "declares WithTrailingComma but has no comma-accepting slot",
        )],
        [only] => {
            if only.is_optional() {
                Vec::new()
            } else {
                vec![TraitViolation::at(
                    tag,
                    only,
                    "trailing-comma slot must be optional",
                )]
            }
        }
        many => many
            .iter()
            .map(|c| {
                TraitViolation::at(
                    tag,
                    c,
                    format!(
                        "ambiguous trailing-comma slot: {} children accept a comma",
                        many.len()
                    ),
                )
            })
            .collect(),
    }
}

/// First child is a required open-delimiter token; last child is the
/// matching required close-delimiter token.
fn check_parenthesized(node: &NodeDescriptor) -> Vec<TraitViolation> {
    let tag = TraitTag::Parenthesized;
    let children = node.children();
    let (Some(first), Some(last)) = (children.first(), children.last()) else {
        return vec![TraitViolation::whole_node(
            tag,
            "declares Parenthesized but has no children",
        )];
    };
    if children.len() < 2 {
        return vec![TraitViolation::whole_node(
            tag,
            "declares Parenthesized but has fewer than two children",
        )];
    }

    let mut violations = Vec::new();

    let open_kind = delimiter_kind(first, |k| k.is_open_delimiter());
    match open_kind {
        None => violations.push(TraitViolation::at(
            tag,
            first,
            "first child must be a required open-delimiter token",
        )),
        Some(_) if first.is_optional() => violations.push(TraitViolation::at(
            tag,
            first,
            "open-delimiter slot must be required",
        )),
        Some(_) => {}
    }

    // The close side is only meaningful relative to a well-formed open side.
    if let Some(open) = open_kind {
        let expected = open.matching_close();
        let close_kind = delimiter_kind(last, |k| Some(k) == expected);
        match close_kind {
            None => violations.push(TraitViolation::at(
                tag,
                last,
                format!(
                    "last child must be the {} closing token matching the opening {}",
                    expected.map(|k| k.to_string()).unwrap_or_default(),
                    open
                ),
            )),
            Some(_) if last.is_optional() => violations.push(TraitViolation::at(
                tag,
                last,
                "close-delimiter slot must be required",
            )),
            Some(_) => {}
        }
    }

    violations
}

/// The single delimiter kind of a token slot whose every alternative
/// satisfies `pred`, or `None` for any other slot.
fn delimiter_kind(
    child: &ChildDescriptor,
    pred: impl Fn(TokenKind) -> bool,
) -> Option<TokenKind> {
    let choices = child.token_choices()?;
    let first = choices.first()?;
    if choices.iter().all(|c| c.kind() == first.kind()) && pred(first.kind()) {
        Some(first.kind())
    } else {
        None
    }
}

/// The node carries an `attributes` collection slot and an optional
/// `specifier` token slot.
fn check_attributed(node: &NodeDescriptor) -> Vec<TraitViolation> {
    let tag = TraitTag::Attributed;
    let mut violations = Vec::new();

    match node.child("attributes") {
        Ok(attrs) if attrs.is_collection() => {}
        Ok(attrs) => violations.push(TraitViolation::at(
            tag,
            attrs,
            "`attributes` slot must be a collection",
        )),
        Err(_) => violations.push(TraitViolation::whole_node(
            tag,
            "declares Attributed but has no `attributes` slot",
        )),
    }

    match node.child("specifier") {
        Ok(spec) if spec.is_token() && spec.is_optional() => {}
        Ok(spec) => violations.push(TraitViolation::at(
            tag,
            spec,
            "`specifier` slot must be an optional token",
        )),
        Err(_) => violations.push(TraitViolation::whole_node(
            tag,
            "declares Attributed but has no `specifier` slot",
        )),
    }

    violations
}
