//! The schema registry: build-then-freeze.
//!
//! Node descriptors are appended to a [`RegistryBuilder`] in declaration
//! order; forward references between kinds are legal during building
//! because the grammar is mutually recursive. [`RegistryBuilder::close`]
//! is the single point where referential integrity is enforced and the
//! builder is converted into an immutable [`Registry`], shareable by any
//! number of readers without synchronization.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::child::{ChildShape, NodeRef};
use crate::error::{DuplicateKindError, UnknownKindError};
use crate::node::{NodeCategory, NodeDescriptor};
use crate::traits::TraitTag;

/// A node-kind reference that resolved to nothing at close time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DanglingReference {
    /// The kind whose descriptor holds the reference.
    pub kind_name: String,
    /// The child slot holding the reference, or `None` for a collection
    /// node's element kind.
    pub child_name: Option<String>,
    /// The kind name that failed to resolve.
    pub referenced: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.child_name {
            Some(child) => write!(
                f,
                "{}.{} references unknown kind `{}`",
                self.kind_name, child, self.referenced
            ),
            None => write!(
                f,
                "{} holds elements of unknown kind `{}`",
                self.kind_name, self.referenced
            ),
        }
    }
}

/// Close failed: one or more kind references do not resolve.
///
/// Every dangling reference found is reported, not just the first.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseError {
    pub dangling: Vec<DanglingReference>,
}

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry failed to close: ")?;
        for (i, d) in self.dangling.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CloseError {}

/// Append-only builder for a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    nodes: Vec<NodeDescriptor>,
    index: FxHashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node descriptor under its kind name.
    ///
    /// On a duplicate name the first registration wins and the duplicate
    /// is rejected; the registry is not corrupted.
    pub fn register(&mut self, node: NodeDescriptor) -> Result<(), DuplicateKindError> {
        if self.index.contains_key(node.kind_name()) {
            return Err(DuplicateKindError {
                kind_name: node.kind_name().to_string(),
            });
        }
        self.index.insert(node.kind_name().to_string(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Look up a registered descriptor before the registry is closed.
    /// Dangling forward references are still legal at this point.
    pub fn resolve(&self, kind_name: &str) -> Option<&NodeDescriptor> {
        self.index.get(kind_name).map(|&i| &self.nodes[i])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finalize the registry.
    ///
    /// This is the only point at which referential integrity runs: every
    /// concrete kind reference in every child shape and element kind must
    /// resolve. All dangling references are collected into the error.
    pub fn close(self) -> Result<Registry, CloseError> {
        let mut dangling = Vec::new();
        for node in &self.nodes {
            for child in node.children() {
                let reference = match child.shape() {
                    ChildShape::Node(r) | ChildShape::Collection(r) => r,
                    ChildShape::Token(_) => continue,
                };
                if let Some(name) = unresolved(reference, &self.index) {
                    dangling.push(DanglingReference {
                        kind_name: node.kind_name().to_string(),
                        child_name: Some(child.name().to_string()),
                        referenced: name.to_string(),
                    });
                }
            }
            if let Some(element) = node.element_kind() {
                if let Some(name) = unresolved(element, &self.index) {
                    dangling.push(DanglingReference {
                        kind_name: node.kind_name().to_string(),
                        child_name: None,
                        referenced: name.to_string(),
                    });
                }
            }
        }
        if dangling.is_empty() {
            Ok(Registry {
                nodes: self.nodes,
                index: self.index,
            })
        } else {
            Err(CloseError { dangling })
        }
    }
}

/// The referenced kind name when `reference` is concrete and absent from
/// `index`. Abstract references always resolve.
fn unresolved<'a>(reference: &'a NodeRef, index: &FxHashMap<String, usize>) -> Option<&'a str> {
    match reference.kind_name() {
        Some(name) if !index.contains_key(name) => Some(name),
        _ => None,
    }
}

/// The closed, immutable set of all node descriptors for one grammar.
///
/// Owns every descriptor; iteration follows declaration order. Contains
/// no interior mutability, so a closed registry is freely shared across
/// threads by any number of concurrent consumers.
#[derive(Debug)]
pub struct Registry {
    nodes: Vec<NodeDescriptor>,
    index: FxHashMap<String, usize>,
}

impl Registry {
    /// Resolve a kind name to its descriptor.
    pub fn resolve(&self, kind_name: &str) -> Result<&NodeDescriptor, UnknownKindError> {
        self.index
            .get(kind_name)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| UnknownKindError {
                kind_name: kind_name.to_string(),
            })
    }

    pub fn contains(&self, kind_name: &str) -> bool {
        self.index.contains_key(kind_name)
    }

    /// Iterate descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.nodes.iter()
    }

    /// All descriptors in declaration order.
    pub fn descriptors(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    /// Descriptors declaring `tag`, in declaration order.
    pub fn kinds_with_trait(&self, tag: TraitTag) -> impl Iterator<Item = &NodeDescriptor> {
        self.nodes.iter().filter(move |n| n.has_trait(tag))
    }

    /// Descriptors of `category`, in declaration order.
    pub fn kinds_in_category(
        &self,
        category: NodeCategory,
    ) -> impl Iterator<Item = &NodeDescriptor> {
        self.nodes.iter().filter(move |n| n.category() == category)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
