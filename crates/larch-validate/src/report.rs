//! Structured violation records and the ordered validation report.

use std::fmt;

use serde::Serialize;

/// Which registry-wide invariant a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvariantKind {
    /// A concrete kind reference resolves to nothing.
    DanglingReference,
    /// A collection node's elements are themselves a collection node.
    NestedCollection,
    /// Two child slots of one node share a name.
    DuplicateChildName,
    /// Two collection slots of one node share an element name.
    DuplicateElementName,
    /// A token alternative requires a spelling its category cannot carry.
    TokenSpelling,
    /// The trailing-comma obligation is broken.
    TrailingComma,
    /// The delimiter-pair obligation is broken.
    Delimited,
    /// The attributed obligation is broken.
    Attributed,
    /// A kind requires itself, directly or through a chain of required
    /// slots, making every instance infinite.
    UnboundedRecursion,
}

impl InvariantKind {
    /// Stable kebab-case name used in rendered reports and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            InvariantKind::DanglingReference => "dangling-reference",
            InvariantKind::NestedCollection => "nested-collection",
            InvariantKind::DuplicateChildName => "duplicate-child-name",
            InvariantKind::DuplicateElementName => "duplicate-element-name",
            InvariantKind::TokenSpelling => "token-spelling",
            InvariantKind::TrailingComma => "trailing-comma",
            InvariantKind::Delimited => "delimited",
            InvariantKind::Attributed => "attributed",
            InvariantKind::UnboundedRecursion => "unbounded-recursion",
        }
    }
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One violation found by the validation engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The offending node kind.
    pub kind_name: String,
    /// The implicated child slot, when one is.
    pub child_name: Option<String>,
    /// The invariant that failed.
    pub invariant: InvariantKind,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.child_name {
            Some(child) => write!(
                f,
                "{}.{}: {} [{}]",
                self.kind_name, child, self.message, self.invariant
            ),
            None => write!(f, "{}: {} [{}]", self.kind_name, self.message, self.invariant),
        }
    }
}

/// The ordered result of one validation run.
///
/// An empty report is the only condition under which a registry may be
/// handed to a generator; any violation makes the registry unusable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Whether the registry passed every check.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations, in deterministic order: declaration order by node,
    /// then child order, with graph-wide findings after the local ones.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            writeln!(f, "{violation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_display_with_and_without_child() {
        let with_child = Violation {
            kind_name: "TupleTypeElement".into(),
            child_name: Some("trailing_comma".into()),
            invariant: InvariantKind::TrailingComma,
            message: "trailing-comma slot must be optional".into(),
        };
        insta::assert_snapshot!(
            with_child.to_string(),
            @"TupleTypeElement.trailing_comma: trailing-comma slot must be optional [trailing-comma]"
        );

        let whole_node = Violation {
            kind_name: "RecursiveType".into(),
            child_name: None,
            invariant: InvariantKind::UnboundedRecursion,
            message: "required cycle RecursiveType -> RecursiveType".into(),
        };
        insta::assert_snapshot!(
            whole_node.to_string(),
            @"RecursiveType: required cycle RecursiveType -> RecursiveType [unbounded-recursion]"
        );
    }

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::default();
        assert!(report.is_valid());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }
}
