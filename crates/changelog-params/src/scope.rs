//! Scope tree nodes for hierarchically-included changelog documents
//!
//! Each node stands for one document instance in the inclusion tree. Nodes
//! are identified by their path, not by instance: re-parsing a document into
//! a fresh node yields a node that the engine treats as the *same scope*, so
//! local parameters registered against the old node stay visible.
//!
//! The document loader creates and owns nodes; the registry only keeps
//! back-references for ownership matching.

use std::cell::RefCell;
use std::rc::Rc;

/// Upper bound on ancestor-chain walks. Inclusion trees are shallow in
/// practice; the cap turns an accidentally cyclic parent wiring into a
/// terminating walk instead of a hang.
const ANCESTOR_DEPTH_LIMIT: usize = 1024;

/// One document instance in the inclusion tree.
#[derive(Debug)]
pub struct ScopeNode {
    path: Option<String>,
    parent: RefCell<Option<Rc<ScopeNode>>>,
}

impl ScopeNode {
    /// Create a node identified by `path`.
    ///
    /// A blank path produces an anonymous node, equal only to itself.
    pub fn new(path: impl Into<String>) -> Rc<Self> {
        let path = path.into();
        let path = if path.trim().is_empty() { None } else { Some(path) };
        Rc::new(Self {
            path,
            parent: RefCell::new(None),
        })
    }

    /// Create a node with no identity path.
    pub fn anonymous() -> Rc<Self> {
        Rc::new(Self {
            path: None,
            parent: RefCell::new(None),
        })
    }

    /// The identity path, if the node has one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The enclosing document's node, if any.
    pub fn parent(&self) -> Option<Rc<ScopeNode>> {
        self.parent.borrow().clone()
    }

    /// Wire the node into the tree.
    ///
    /// Must happen before the node is used in a `set` call; re-wiring a node
    /// that already registered local parameters is unsupported.
    pub fn set_parent(&self, parent: Rc<ScopeNode>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Identity comparison: non-empty paths compare by string equality,
    /// anonymous nodes only by pointer identity. A node with a path is never
    /// the same scope as an anonymous one.
    pub fn is_same_scope_as(&self, other: &ScopeNode) -> bool {
        match (&self.path, &other.path) {
            (Some(a), Some(b)) => a == b,
            _ => std::ptr::eq(self, other),
        }
    }

    /// Iterate `[self, parent, ..., root]`.
    ///
    /// The walk is bounded by [`ANCESTOR_DEPTH_LIMIT`] and restartable (each
    /// call produces a fresh iterator).
    pub fn ancestors(self: &Rc<Self>) -> Ancestors {
        Ancestors {
            next: Some(Rc::clone(self)),
            remaining: ANCESTOR_DEPTH_LIMIT,
        }
    }
}

/// Lazy ancestor-chain iterator produced by [`ScopeNode::ancestors`].
#[derive(Debug)]
pub struct Ancestors {
    next: Option<Rc<ScopeNode>>,
    remaining: usize,
}

impl Iterator for Ancestors {
    type Item = Rc<ScopeNode>;

    fn next(&mut self) -> Option<Rc<ScopeNode>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
