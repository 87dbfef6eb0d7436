//! The Larch type grammar, expressed as syntax-node schema data.
//!
//! [`type_nodes`] declares the type-producing productions (identifiers,
//! arrays, dictionaries, tuples, functions, optionals, compositions,
//! packs, attributed and metatypes); [`common_nodes`] declares the
//! auxiliary productions they reference (return clause, effect
//! specifiers, attributes, initializers, generic parameters).
//! [`registry`] wires both sets into a closed registry ready for
//! validation and generation.

mod common_nodes;
mod type_nodes;

use std::fmt;

pub use common_nodes::common_nodes;
pub use type_nodes::type_nodes;

use larch_schema::{
    ChildDescriptor, CloseError, DuplicateKindError, MalformedChildError, MalformedNodeError,
    Registry, RegistryBuilder, TokenChoice, TokenKind,
};

/// An error while assembling the grammar registry.
///
/// These all indicate an authoring mistake in the grammar data and are
/// fatal to the build.
#[derive(Debug)]
pub enum GrammarError {
    MalformedChild(MalformedChildError),
    MalformedNode(MalformedNodeError),
    DuplicateKind(DuplicateKindError),
    Close(CloseError),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::MalformedChild(e) => write!(f, "malformed child slot: {e}"),
            GrammarError::MalformedNode(e) => write!(f, "malformed node: {e}"),
            GrammarError::DuplicateKind(e) => write!(f, "duplicate node kind: {e}"),
            GrammarError::Close(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GrammarError {}

impl From<MalformedChildError> for GrammarError {
    fn from(e: MalformedChildError) -> Self {
        GrammarError::MalformedChild(e)
    }
}

impl From<MalformedNodeError> for GrammarError {
    fn from(e: MalformedNodeError) -> Self {
        GrammarError::MalformedNode(e)
    }
}

impl From<DuplicateKindError> for GrammarError {
    fn from(e: DuplicateKindError) -> Self {
        GrammarError::DuplicateKind(e)
    }
}

impl From<CloseError> for GrammarError {
    fn from(e: CloseError) -> Self {
        GrammarError::Close(e)
    }
}

/// Build and close the full Larch type-grammar registry.
pub fn registry() -> Result<Registry, GrammarError> {
    let mut builder = RegistryBuilder::new();
    for node in type_nodes()? {
        builder.register(node)?;
    }
    for node in common_nodes()? {
        builder.register(node)?;
    }
    Ok(builder.close()?)
}

/// A bare token alternative.
pub(crate) fn t(kind: TokenKind) -> TokenChoice {
    TokenChoice::bare(kind)
}

/// A spelled keyword alternative.
pub(crate) fn kw(text: &str) -> TokenChoice {
    TokenChoice::keyword(text)
}

/// A required token slot accepting a single bare kind.
pub(crate) fn token(
    name: &str,
    kind: TokenKind,
) -> Result<ChildDescriptor, MalformedChildError> {
    ChildDescriptor::token(name, vec![t(kind)])
}
