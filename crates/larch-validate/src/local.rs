//! Pass 1: per-node checks.
//!
//! Every node descriptor is checked independently: child-name uniqueness,
//! token-spelling compatibility, direct required self-reference, and the
//! node's declared trait obligations. Violations are collected rather
//! than aborting, so one run reports every problem.

use rustc_hash::FxHashSet;

use larch_schema::{ChildShape, NodeDescriptor, NodeRef, TraitTag, TraitViolation};

use crate::report::{InvariantKind, Violation};

pub(crate) fn check_node(node: &NodeDescriptor, out: &mut Vec<Violation>) {
    check_name_uniqueness(node, out);
    check_token_spellings(node, out);
    check_direct_self_reference(node, out);
    for &tag in node.traits() {
        for tv in tag.check(node) {
            out.push(from_trait_violation(node, tag, tv));
        }
    }
}

/// No two slots share a name, and no two collection slots share an
/// element name.
fn check_name_uniqueness(node: &NodeDescriptor, out: &mut Vec<Violation>) {
    let mut names = FxHashSet::default();
    let mut element_names = FxHashSet::default();
    for child in node.children() {
        if !names.insert(child.name()) {
            out.push(Violation {
                kind_name: node.kind_name().to_string(),
                child_name: Some(child.name().to_string()),
                invariant: InvariantKind::DuplicateChildName,
                message: format!("child name `{}` is declared more than once", child.name()),
            });
        }
        if let Some(element) = child.element_name() {
            if !element_names.insert(element) {
                out.push(Violation {
                    kind_name: node.kind_name().to_string(),
                    child_name: Some(child.name().to_string()),
                    invariant: InvariantKind::DuplicateElementName,
                    message: format!("element name `{element}` is declared more than once"),
                });
            }
        }
    }
}

/// A spelled token alternative must use a category that can carry text.
fn check_token_spellings(node: &NodeDescriptor, out: &mut Vec<Violation>) {
    for child in node.children() {
        let Some(choices) = child.token_choices() else {
            continue;
        };
        for choice in choices {
            if let Some(text) = choice.text() {
                if !choice.kind().admits_text() {
                    out.push(Violation {
                        kind_name: node.kind_name().to_string(),
                        child_name: Some(child.name().to_string()),
                        invariant: InvariantKind::TokenSpelling,
                        message: format!(
                            "category {} cannot carry the required spelling `{text}`",
                            choice.kind()
                        ),
                    });
                }
            }
        }
    }
}

/// A required, non-collection slot referencing the node's own kind makes
/// every instance infinite. Chains are caught by the graph pass.
fn check_direct_self_reference(node: &NodeDescriptor, out: &mut Vec<Violation>) {
    for child in node.children() {
        if child.is_optional() {
            continue;
        }
        let ChildShape::Node(NodeRef::Kind(referenced)) = child.shape() else {
            continue;
        };
        if referenced == node.kind_name() {
            out.push(Violation {
                kind_name: node.kind_name().to_string(),
                child_name: Some(child.name().to_string()),
                invariant: InvariantKind::UnboundedRecursion,
                message: format!(
                    "required slot references its own kind `{referenced}` with no optional or collection indirection"
                ),
            });
        }
    }
}

fn from_trait_violation(node: &NodeDescriptor, tag: TraitTag, tv: TraitViolation) -> Violation {
    let invariant = match tag {
        TraitTag::WithTrailingComma => InvariantKind::TrailingComma,
        TraitTag::Parenthesized => InvariantKind::Delimited,
        TraitTag::Attributed => InvariantKind::Attributed,
    };
    Violation {
        kind_name: node.kind_name().to_string(),
        child_name: tv.child,
        invariant,
        message: tv.message,
    }
}
