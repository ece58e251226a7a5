//! Scope-tree and registry fixtures

use std::rc::Rc;

use changelog_params::{Contexts, Labels, ParameterRegistry, ScopeNode};

/// Build a parent-wired chain of scope nodes, root first.
///
/// `scope_chain(&["root", "mid", "leaf"])` returns three nodes where `leaf`'s
/// ancestor walk visits `leaf`, `mid`, `root` in that order.
pub fn scope_chain(paths: &[&str]) -> Vec<Rc<ScopeNode>> {
    let mut nodes: Vec<Rc<ScopeNode>> = Vec::with_capacity(paths.len());
    for path in paths {
        let node = ScopeNode::new(*path);
        if let Some(parent) = nodes.last() {
            node.set_parent(Rc::clone(parent));
        }
        nodes.push(node);
    }
    nodes
}

/// Registry configured the way the regression scenarios run: platform `h2`,
/// active context `junit`, active label `junitLabel`.
///
/// Definitions filtered on `"baddb, h2"` / `"junit"` / `"junitLabel"` are
/// accepted by this registry.
pub fn h2_registry() -> ParameterRegistry {
    let mut registry = ParameterRegistry::for_platform("h2");
    registry.set_contexts(Contexts::parse("junit"));
    registry.set_labels(Labels::parse("junitLabel"));
    registry
}
