//! Node (grammar production) descriptors.

use serde::Serialize;

use crate::child::{ChildDescriptor, NodeRef};
use crate::error::{MalformedNodeError, UnknownChildError};
use crate::traits::TraitTag;

/// The structural category of a grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeCategory {
    /// A concrete type-producing node.
    Type,
    /// A generic structural node that is not itself a type.
    Syntax,
    /// A homogeneous sequence of one element kind.
    Collection,
}

/// A named grammar production: category, ordered child slots (or a single
/// element kind for collections), diagnostic label, and trait tags.
///
/// Child ordering is semantically significant -- it is source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    kind_name: String,
    category: NodeCategory,
    diagnostic_label: Option<String>,
    children: Vec<ChildDescriptor>,
    element_kind: Option<NodeRef>,
    traits: Vec<TraitTag>,
}

impl NodeDescriptor {
    /// Construct a descriptor from raw parts, checking that the category
    /// and payload agree: collections carry an element kind and no child
    /// slots, everything else carries child slots and no element kind.
    pub fn from_parts(
        kind_name: impl Into<String>,
        category: NodeCategory,
        children: Vec<ChildDescriptor>,
        element_kind: Option<NodeRef>,
    ) -> Result<Self, MalformedNodeError> {
        let kind_name = kind_name.into();
        match category {
            NodeCategory::Collection => {
                if !children.is_empty() {
                    return Err(MalformedNodeError::CollectionWithChildren { kind: kind_name });
                }
                if element_kind.is_none() {
                    return Err(MalformedNodeError::MissingElementKind { kind: kind_name });
                }
            }
            NodeCategory::Type | NodeCategory::Syntax => {
                if element_kind.is_some() {
                    return Err(MalformedNodeError::ElementKindOnNonCollection {
                        kind: kind_name,
                    });
                }
            }
        }
        Ok(Self {
            kind_name,
            category,
            diagnostic_label: None,
            children,
            element_kind,
            traits: Vec::new(),
        })
    }

    /// A type-producing or generic structural node with ordered child slots.
    pub fn new(
        kind_name: impl Into<String>,
        category: NodeCategory,
        children: Vec<ChildDescriptor>,
    ) -> Result<Self, MalformedNodeError> {
        Self::from_parts(kind_name, category, children, None)
    }

    /// A collection node holding elements of `element_kind`.
    pub fn collection(
        kind_name: impl Into<String>,
        element_kind: impl Into<String>,
    ) -> Self {
        Self {
            kind_name: kind_name.into(),
            category: NodeCategory::Collection,
            diagnostic_label: None,
            children: Vec::new(),
            element_kind: Some(NodeRef::Kind(element_kind.into())),
            traits: Vec::new(),
        }
    }

    /// Attach a human-readable production name for diagnostics.
    pub fn with_diagnostic_label(mut self, label: impl Into<String>) -> Self {
        self.diagnostic_label = Some(label.into());
        self
    }

    /// Declare that this node satisfies `tag`.
    pub fn with_trait(mut self, tag: TraitTag) -> Self {
        if !self.traits.contains(&tag) {
            self.traits.push(tag);
        }
        self
    }

    pub fn kind_name(&self) -> &str {
        &self.kind_name
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }

    pub fn is_collection(&self) -> bool {
        self.category == NodeCategory::Collection
    }

    pub fn diagnostic_label(&self) -> Option<&str> {
        self.diagnostic_label.as_deref()
    }

    /// The ordered child slots. Empty for collection nodes and leaf
    /// token-wrapping nodes.
    pub fn children(&self) -> &[ChildDescriptor] {
        &self.children
    }

    /// Look up a child slot by name.
    pub fn child(&self, name: &str) -> Result<&ChildDescriptor, UnknownChildError> {
        self.children
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| UnknownChildError {
                kind_name: self.kind_name.clone(),
                child_name: name.to_string(),
            })
    }

    /// The element kind of a collection node.
    pub fn element_kind(&self) -> Option<&NodeRef> {
        self.element_kind.as_ref()
    }

    pub fn traits(&self) -> &[TraitTag] {
        &self.traits
    }

    pub fn has_trait(&self, tag: TraitTag) -> bool {
        self.traits.contains(&tag)
    }
}
