//! Declarative schema for the shape of Larch syntax-tree nodes.
//!
//! Each grammar production of the Larch type grammar is described by a
//! [`NodeDescriptor`]: its structural category, its ordered child slots
//! ([`ChildDescriptor`]), and the cross-cutting obligations it opts into
//! ([`TraitTag`]). Descriptors are collected into a [`RegistryBuilder`]
//! and frozen by `close()` into an immutable [`Registry`], the only form
//! downstream consumers (validation, code generation) ever see.
//!
//! Construction-time self-consistency is enforced by the descriptors'
//! constructors; registry-wide invariants are checked by the companion
//! `larch-validate` crate.

pub mod child;
pub mod error;
pub mod node;
pub mod registry;
pub mod token;
pub mod traits;

pub use child::{ChildDescriptor, ChildShape, LayoutHint, NodeRef};
pub use error::{
    DuplicateKindError, MalformedChildError, MalformedNodeError, UnknownChildError,
    UnknownKindError,
};
pub use node::{NodeCategory, NodeDescriptor};
pub use registry::{CloseError, DanglingReference, Registry, RegistryBuilder};
pub use token::{TokenChoice, TokenKind};
pub use traits::{TraitTag, TraitViolation};
