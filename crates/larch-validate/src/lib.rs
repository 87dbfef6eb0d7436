//! Batch validation engine for Larch syntax-node schemas.
//!
//! [`validate`] runs two passes over a closed registry: a local pass
//! checking every node descriptor independently (name uniqueness, token
//! spellings, direct self-reference, trait obligations) and a global
//! pass over the kind-reference graph (referential integrity, collection
//! nesting, unbounded recursion). All violations are collected into a
//! single ordered [`ValidationReport`]; nothing fails fast, so one run
//! reports every problem.
//!
//! Validation is a pure function of the registry: running it twice
//! yields identical reports, and a registry with a non-empty report must
//! not be handed to any generator.

mod graph;
mod local;
mod report;

pub use report::{InvariantKind, ValidationReport, Violation};

use larch_schema::Registry;

/// Check every registry-wide invariant and collect all violations.
pub fn validate(registry: &Registry) -> ValidationReport {
    let mut violations = Vec::new();
    for node in registry.iter() {
        local::check_node(node, &mut violations);
    }
    graph::check_graph(registry, &mut violations);
    ValidationReport::new(violations)
}
