use std::fmt;

use serde::Serialize;

/// A child descriptor that is structurally inconsistent with itself.
///
/// These indicate an authoring mistake in the schema definition, not a
/// recoverable runtime condition, so constructors fail fast with them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MalformedChildError {
    /// A token-shaped slot declared zero acceptable alternatives.
    EmptyTokenChoices { child: String },
    /// A collection-shaped slot has no singular element name.
    MissingElementName { child: String },
    /// A non-collection slot carries a collection element name.
    UnexpectedElementName { child: String },
}

impl fmt::Display for MalformedChildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTokenChoices { child } => {
                write!(f, "token slot `{child}` declares no token alternatives")
            }
            Self::MissingElementName { child } => {
                write!(f, "collection slot `{child}` has no element name")
            }
            Self::UnexpectedElementName { child } => {
                write!(f, "non-collection slot `{child}` carries an element name")
            }
        }
    }
}

impl std::error::Error for MalformedChildError {}

/// A node descriptor whose category and payload disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MalformedNodeError {
    /// A collection node declared child slots instead of an element kind.
    CollectionWithChildren { kind: String },
    /// A collection node declared no element kind.
    MissingElementKind { kind: String },
    /// A non-collection node declared an element kind.
    ElementKindOnNonCollection { kind: String },
}

impl fmt::Display for MalformedNodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CollectionWithChildren { kind } => {
                write!(f, "collection node `{kind}` declares child slots")
            }
            Self::MissingElementKind { kind } => {
                write!(f, "collection node `{kind}` declares no element kind")
            }
            Self::ElementKindOnNonCollection { kind } => {
                write!(f, "non-collection node `{kind}` declares an element kind")
            }
        }
    }
}

impl std::error::Error for MalformedNodeError {}

/// A second registration attempted under an already-taken kind name.
///
/// The registry keeps the first registration; the duplicate is rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateKindError {
    pub kind_name: String,
}

impl fmt::Display for DuplicateKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node kind `{}` is already registered", self.kind_name)
    }
}

impl std::error::Error for DuplicateKindError {}

/// A kind-name lookup that matched nothing in the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownKindError {
    pub kind_name: String,
}

impl fmt::Display for UnknownKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind `{}`", self.kind_name)
    }
}

impl std::error::Error for UnknownKindError {}

/// A child-name lookup that matched no slot of the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownChildError {
    pub kind_name: String,
    pub child_name: String,
}

impl fmt::Display for UnknownChildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node kind `{}` has no child slot `{}`",
            self.kind_name, self.child_name
        )
    }
}

impl std::error::Error for UnknownChildError {}
