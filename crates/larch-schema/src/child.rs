//! Child slot descriptors.
//!
//! A [`ChildDescriptor`] describes one ordered slot within a node: its
//! name, the shape of what may occupy it, whether it may be absent, and
//! presentation hints. Fields are private and constructors are fallible,
//! so a descriptor that exists is internally consistent.

use serde::Serialize;

use crate::error::MalformedChildError;
use crate::token::{TokenChoice, TokenKind};

/// A reference to a node kind from inside a child slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeRef {
    /// A specific node kind, resolved against the registry at close time.
    Kind(String),
    /// The abstract category "any type-producing node".
    AnyType,
}

impl NodeRef {
    /// Reference a concrete node kind by name.
    pub fn kind(name: impl Into<String>) -> Self {
        NodeRef::Kind(name.into())
    }

    /// The referenced kind name, or `None` for the abstract category.
    pub fn kind_name(&self) -> Option<&str> {
        match self {
            NodeRef::Kind(name) => Some(name),
            NodeRef::AnyType => None,
        }
    }
}

/// The accepted shape of a child slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChildShape {
    /// A single token drawn from a non-empty set of alternatives.
    Token(Vec<TokenChoice>),
    /// A single sub-node of the referenced kind or category.
    Node(NodeRef),
    /// A homogeneous collection node of the referenced kind.
    Collection(NodeRef),
}

/// Presentation-only layout metadata. Never affects structural validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LayoutHint {
    #[default]
    Default,
    /// Render the slot's contents indented one level.
    Indented,
}

/// One ordered slot within a node descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildDescriptor {
    name: String,
    shape: ChildShape,
    optional: bool,
    /// Singular name used when addressing one element of a collection slot.
    element_name: Option<String>,
    diagnostic_label: Option<String>,
    layout: LayoutHint,
}

impl ChildDescriptor {
    /// Construct a slot from raw parts, checking the shape contract:
    /// token shapes need at least one alternative, and an element name is
    /// present exactly when the shape is a collection.
    pub fn new(
        name: impl Into<String>,
        shape: ChildShape,
        element_name: Option<String>,
    ) -> Result<Self, MalformedChildError> {
        let name = name.into();
        match &shape {
            ChildShape::Token(choices) if choices.is_empty() => {
                return Err(MalformedChildError::EmptyTokenChoices { child: name });
            }
            ChildShape::Collection(_) if element_name.is_none() => {
                return Err(MalformedChildError::MissingElementName { child: name });
            }
            ChildShape::Token(_) | ChildShape::Node(_) if element_name.is_some() => {
                return Err(MalformedChildError::UnexpectedElementName { child: name });
            }
            _ => {}
        }
        Ok(Self {
            name,
            shape,
            optional: false,
            element_name,
            diagnostic_label: None,
            layout: LayoutHint::Default,
        })
    }

    /// A token slot accepting one of `choices`.
    pub fn token(
        name: impl Into<String>,
        choices: Vec<TokenChoice>,
    ) -> Result<Self, MalformedChildError> {
        Self::new(name, ChildShape::Token(choices), None)
    }

    /// A sub-node slot referencing `reference`.
    pub fn node(name: impl Into<String>, reference: NodeRef) -> Self {
        Self {
            name: name.into(),
            shape: ChildShape::Node(reference),
            optional: false,
            element_name: None,
            diagnostic_label: None,
            layout: LayoutHint::Default,
        }
    }

    /// A collection slot holding a collection node of kind `collection_kind`,
    /// with `element_name` as the singular name for one element.
    ///
    /// Collection slots are implicitly zero-or-more: the slot itself is
    /// always present, but the collection may be empty. They are therefore
    /// never optional.
    pub fn collection(
        name: impl Into<String>,
        collection_kind: impl Into<String>,
        element_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            shape: ChildShape::Collection(NodeRef::Kind(collection_kind.into())),
            optional: false,
            element_name: Some(element_name.into()),
            diagnostic_label: None,
            layout: LayoutHint::Default,
        }
    }

    /// Mark the slot as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attach a human-readable name used in diagnostics when this slot is
    /// the cause of a failure.
    pub fn with_diagnostic_label(mut self, label: impl Into<String>) -> Self {
        self.diagnostic_label = Some(label.into());
        self
    }

    /// Render this slot's contents indented.
    pub fn indented(mut self) -> Self {
        self.layout = LayoutHint::Indented;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &ChildShape {
        &self.shape
    }

    /// Whether the slot may be absent. Collection slots are never
    /// optional; they may only be empty.
    pub fn is_optional(&self) -> bool {
        self.optional && !matches!(self.shape, ChildShape::Collection(_))
    }

    pub fn element_name(&self) -> Option<&str> {
        self.element_name.as_deref()
    }

    pub fn diagnostic_label(&self) -> Option<&str> {
        self.diagnostic_label.as_deref()
    }

    pub fn layout(&self) -> LayoutHint {
        self.layout
    }

    pub fn is_token(&self) -> bool {
        matches!(self.shape, ChildShape::Token(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.shape, ChildShape::Collection(_))
    }

    /// The token alternatives of a token slot, or `None` for other shapes.
    pub fn token_choices(&self) -> Option<&[TokenChoice]> {
        match &self.shape {
            ChildShape::Token(choices) => Some(choices),
            _ => None,
        }
    }

    /// The node reference of a node or collection slot.
    pub fn node_ref(&self) -> Option<&NodeRef> {
        match &self.shape {
            ChildShape::Node(r) | ChildShape::Collection(r) => Some(r),
            ChildShape::Token(_) => None,
        }
    }

    /// Whether a token of `kind` with spelling `text` may occupy this
    /// slot. Always `false` for non-token shapes.
    pub fn accepts_token(&self, kind: TokenKind, text: Option<&str>) -> bool {
        match &self.shape {
            ChildShape::Token(choices) => choices.iter().any(|c| c.accepts(kind, text)),
            _ => false,
        }
    }
}
