//! Pass 2: registry-wide reference graph checks.
//!
//! Builds the kind-reference graph from every child shape and collection
//! element kind, then checks referential integrity, collection nesting,
//! and unbounded recursion. An edge is *hard* when the slot is required
//! and non-collection; a cycle made entirely of hard edges has no finite
//! instance, so every kind on it is reported.

use rustc_hash::FxHashMap;

use larch_schema::{ChildShape, NodeCategory, NodeRef, Registry};

use crate::report::{InvariantKind, Violation};

/// One kind-to-kind reference.
struct Edge {
    target: usize,
    /// The child slot providing the reference; `None` for a collection
    /// node's element kind.
    child: Option<String>,
    /// Required, single, non-collection. Only hard edges can make a
    /// cycle mandatory.
    hard: bool,
}

pub(crate) fn check_graph(registry: &Registry, out: &mut Vec<Violation>) {
    let kinds: Vec<&str> = registry.iter().map(|n| n.kind_name()).collect();
    let index: FxHashMap<&str, usize> = kinds.iter().enumerate().map(|(i, &k)| (k, i)).collect();

    // Build edges, reporting dangling references and nested collections
    // along the way, in declaration order.
    let mut edges: Vec<Vec<Edge>> = (0..kinds.len()).map(|_| Vec::new()).collect();
    for (i, node) in registry.iter().enumerate() {
        for child in node.children() {
            let (reference, hard) = match child.shape() {
                ChildShape::Node(r) => (r, !child.is_optional()),
                ChildShape::Collection(r) => (r, false),
                ChildShape::Token(_) => continue,
            };
            let NodeRef::Kind(name) = reference else {
                // Abstract any-type references are choice points, not
                // edges: they can always bottom out at a leaf production.
                continue;
            };
            match index.get(name.as_str()) {
                Some(&target) => edges[i].push(Edge {
                    target,
                    child: Some(child.name().to_string()),
                    hard,
                }),
                None => out.push(Violation {
                    kind_name: node.kind_name().to_string(),
                    child_name: Some(child.name().to_string()),
                    invariant: InvariantKind::DanglingReference,
                    message: format!("references unknown kind `{name}`"),
                }),
            }
        }

        if let Some(NodeRef::Kind(element)) = node.element_kind() {
            match index.get(element.as_str()) {
                Some(&target) => {
                    if registry.descriptors()[target].category() == NodeCategory::Collection {
                        let message = if element == node.kind_name() {
                            "collection node holds elements of its own kind".to_string()
                        } else {
                            format!("collection node holds elements of collection kind `{element}`")
                        };
                        out.push(Violation {
                            kind_name: node.kind_name().to_string(),
                            child_name: None,
                            invariant: InvariantKind::NestedCollection,
                            message,
                        });
                    }
                    // Elements are zero-or-more: always a soft edge.
                    edges[i].push(Edge {
                        target,
                        child: None,
                        hard: false,
                    });
                }
                None => out.push(Violation {
                    kind_name: node.kind_name().to_string(),
                    child_name: None,
                    invariant: InvariantKind::DanglingReference,
                    message: format!("holds elements of unknown kind `{element}`"),
                }),
            }
        }
    }

    check_hard_cycles(&kinds, &edges, out);
}

/// Report every cycle composed entirely of hard edges.
///
/// Elimination works outward-in: a kind with no hard edge into the
/// remaining set has a finite instance, so it is removed; kinds that
/// survive lie on (or feed into) a mandatory cycle. The survivors are
/// then grouped into strongly connected components of the hard-edge
/// subgraph, and every component of two or more kinds is reported with
/// one witness cycle.
fn check_hard_cycles(kinds: &[&str], edges: &[Vec<Edge>], out: &mut Vec<Violation>) {
    let n = kinds.len();

    // hard_out[i] = hard edges from i into the remaining set.
    let mut hard_out: Vec<usize> = edges
        .iter()
        .map(|es| es.iter().filter(|e| e.hard).count())
        .collect();
    let mut removed = vec![false; n];

    // Fixpoint: repeatedly remove kinds with no remaining hard edge.
    let mut queue: Vec<usize> = (0..n).filter(|&i| hard_out[i] == 0).collect();
    while let Some(i) = queue.pop() {
        if removed[i] {
            continue;
        }
        removed[i] = true;
        for (j, es) in edges.iter().enumerate() {
            if removed[j] {
                continue;
            }
            for e in es {
                if e.hard && e.target == i {
                    hard_out[j] -= 1;
                    if hard_out[j] == 0 {
                        queue.push(j);
                    }
                }
            }
        }
    }

    // Group the survivors into strongly connected components of the
    // hard-edge subgraph. Singleton components are direct
    // self-references, already reported by the local pass.
    let mut scc = SccState::new(n);
    for v in 0..n {
        if !removed[v] && scc.index[v] == UNVISITED {
            scc.connect(v, edges, &removed);
        }
    }

    let mut components: Vec<Vec<usize>> = scc
        .components
        .into_iter()
        .filter(|c| c.len() >= 2)
        .collect();
    for component in &mut components {
        component.sort_unstable();
    }
    components.sort_unstable_by_key(|c| c[0]);
    for component in &components {
        report_component(component, kinds, edges, out);
    }
}

const UNVISITED: u32 = u32::MAX;

/// Tarjan's strongly-connected-components state over hard edges.
struct SccState {
    index: Vec<u32>,
    lowlink: Vec<u32>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: u32,
    components: Vec<Vec<usize>>,
}

impl SccState {
    fn new(n: usize) -> Self {
        Self {
            index: vec![UNVISITED; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn connect(&mut self, v: usize, edges: &[Vec<Edge>], removed: &[bool]) {
        self.index[v] = self.next_index;
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        for e in &edges[v] {
            if !e.hard || removed[e.target] {
                continue;
            }
            let w = e.target;
            if self.index[w] == UNVISITED {
                self.connect(w, edges, removed);
                self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
            } else if self.on_stack[w] {
                self.lowlink[v] = self.lowlink[v].min(self.index[w]);
            }
        }

        if self.lowlink[v] == self.index[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

/// Report every kind of one nontrivial component. Strong connectivity
/// means each of them lies on a mandatory cycle; one witness cycle is
/// extracted for the message.
fn report_component(
    component: &[usize],
    kinds: &[&str],
    edges: &[Vec<Edge>],
    out: &mut Vec<Violation>,
) {
    // Witness: walk first in-component hard edges from the earliest
    // declared kind until a node repeats.
    let mut path: Vec<usize> = Vec::new();
    let mut current = component[0];
    let cycle: Vec<usize> = loop {
        if let Some(pos) = path.iter().position(|&p| p == current) {
            break path[pos..].to_vec();
        }
        path.push(current);
        match in_component_edge(current, edges, component) {
            Some(e) => current = e.target,
            None => return,
        }
    };

    let mut names: Vec<&str> = cycle.iter().map(|&i| kinds[i]).collect();
    names.push(kinds[cycle[0]]);
    let witness = names.join(" -> ");

    for &i in component {
        // Name the slot on the witness where the kind lies on it, its
        // first in-component hard slot otherwise.
        let via = match cycle.iter().position(|&c| c == i) {
            Some(pos) => {
                let successor = cycle[(pos + 1) % cycle.len()];
                edges[i].iter().find(|e| e.hard && e.target == successor)
            }
            None => in_component_edge(i, edges, component),
        };
        out.push(Violation {
            kind_name: kinds[i].to_string(),
            child_name: via.and_then(|e| e.child.clone()),
            invariant: InvariantKind::UnboundedRecursion,
            message: format!("required cycle {witness}"),
        });
    }
}

/// The first hard edge from `v` whose target stays in `component`.
fn in_component_edge<'a>(v: usize, edges: &'a [Vec<Edge>], component: &[usize]) -> Option<&'a Edge> {
    edges[v]
        .iter()
        .find(|e| e.hard && component.contains(&e.target))
}
