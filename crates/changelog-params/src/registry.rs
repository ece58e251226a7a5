//! The ordered parameter store
//!
//! [`ParameterRegistry`] holds every accepted parameter definition for one
//! document-load-and-resolve run, in insertion order. Precedence:
//!
//! 1. The first accepted *global* definition for a key is authoritative for
//!    the rest of the registry's life — later definitions for that key
//!    (global or local, any scope) are silently discarded.
//! 2. A *local* definition is visible to its owning scope and that scope's
//!    descendants; the definition owned by the scope nearest the requester
//!    wins, earliest-inserted first within one scope.
//! 3. Unresolved keys fall back to process environment variables, then to a
//!    host-provided [`PropertySource`].
//!
//! Filter predicates run once at `set` time against the registry's
//! configured platform/context/label state; a rejected `set` is a logged
//! no-op, never an error.

use std::collections::HashMap;
use std::rc::Rc;

use crate::filter::{ContextExpression, Contexts, Labels, PlatformList};
use crate::scope::ScopeNode;

/// Host-provided key/value fallback, consulted after environment variables.
///
/// Implementations must be read-only and side-effect free.
pub trait PropertySource {
    /// Look up an external property by name.
    fn property(&self, key: &str) -> Option<String>;
}

/// A [`PropertySource`] with no properties. The registry default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProperties;

impl PropertySource for NoProperties {
    fn property(&self, _key: &str) -> Option<String> {
        None
    }
}

impl PropertySource for HashMap<String, String> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// One stored parameter definition. Immutable once accepted.
#[derive(Debug, Clone)]
pub struct Assignment {
    key: String,
    value: String,
    contexts: ContextExpression,
    labels: Labels,
    global: bool,
    owning_scope: Option<Rc<ScopeNode>>,
}

impl Assignment {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn contexts(&self) -> &ContextExpression {
        &self.contexts
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    /// The scope the definition was declared in, if any.
    pub fn owning_scope(&self) -> Option<&Rc<ScopeNode>> {
        self.owning_scope.as_ref()
    }
}

/// The ordered store of parameter definitions for one run.
///
/// Platform identity is fixed at construction; active contexts and labels
/// may be adjusted through the setters before resolution begins. Hosts that
/// need isolation between runs construct independent registries.
pub struct ParameterRegistry {
    assignments: Vec<Assignment>,
    /// key -> index of the first accepted global assignment for that key
    authoritative_globals: HashMap<String, usize>,
    platform: Option<String>,
    contexts: Contexts,
    labels: Labels,
    properties: Box<dyn PropertySource>,
}

impl ParameterRegistry {
    /// Create a registry with no target platform and no active
    /// contexts/labels.
    pub fn new() -> Self {
        Self {
            assignments: Vec::new(),
            authoritative_globals: HashMap::new(),
            platform: None,
            contexts: Contexts::default(),
            labels: Labels::default(),
            properties: Box::new(NoProperties),
        }
    }

    /// Create a registry targeting the platform with the given short
    /// identifier (e.g. `"h2"`, `"oracle"`).
    pub fn for_platform(platform: impl Into<String>) -> Self {
        let mut registry = Self::new();
        registry.platform = Some(platform.into().trim().to_ascii_lowercase());
        registry
    }

    /// The targeted platform's short identifier, if one was configured.
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Replace the active context set. Call before resolution begins.
    pub fn set_contexts(&mut self, contexts: Contexts) {
        self.contexts = contexts;
    }

    pub fn contexts(&self) -> &Contexts {
        &self.contexts
    }

    /// Replace the active label set. Call before resolution begins.
    pub fn set_labels(&mut self, labels: Labels) {
        self.labels = labels;
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Install the external property fallback consulted by [`get`].
    ///
    /// [`get`]: ParameterRegistry::get
    pub fn set_property_source(&mut self, source: Box<dyn PropertySource>) {
        self.properties = source;
    }

    /// Register an unfiltered global parameter declared outside any
    /// document. First-wins: once a key has a global value, later calls for
    /// it are no-ops.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set_filtered(
            key,
            value,
            ContextExpression::default(),
            Labels::default(),
            PlatformList::default(),
            true,
            None,
        );
    }

    /// Register a parameter definition discovered in a document.
    ///
    /// The three filters are evaluated here, once, against the registry's
    /// configured state; a definition that does not apply is silently
    /// discarded. So is any definition for a key that already has an
    /// authoritative global value.
    #[allow(clippy::too_many_arguments)]
    pub fn set_filtered(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        contexts: ContextExpression,
        labels: Labels,
        platforms: PlatformList,
        global: bool,
        scope: Option<&Rc<ScopeNode>>,
    ) {
        let key = key.into();

        if !platforms.matches(self.platform.as_deref()) {
            tracing::debug!(%key, platform = ?self.platform, "definition skipped: platform filter");
            return;
        }
        if !contexts.matches(&self.contexts) {
            tracing::debug!(%key, "definition skipped: context filter");
            return;
        }
        if !labels.matches(&self.labels) {
            tracing::debug!(%key, "definition skipped: label filter");
            return;
        }
        if self.authoritative_globals.contains_key(&key) {
            tracing::debug!(%key, "definition skipped: key already has a global value");
            return;
        }

        if global {
            self.authoritative_globals
                .insert(key.clone(), self.assignments.len());
        }
        tracing::debug!(
            %key,
            global,
            scope = scope.and_then(|node| node.path()),
            "definition stored"
        );
        self.assignments.push(Assignment {
            key,
            value: value.into(),
            contexts,
            labels,
            global,
            owning_scope: scope.map(Rc::clone),
        });
    }

    /// Resolve `key` for the given requesting scope.
    ///
    /// Precedence: authoritative global, then nearest-ancestor local (for a
    /// scoped request) or scope-independent definitions (for a scope-less
    /// request), then environment variables, then the external property
    /// source. Returns `None` when nothing matches; absence is a normal
    /// outcome, not an error.
    pub fn get(&self, key: &str, scope: Option<&Rc<ScopeNode>>) -> Option<String> {
        if let Some(&index) = self.authoritative_globals.get(key) {
            return Some(self.assignments[index].value.clone());
        }

        match scope {
            Some(scope) => {
                // Nearest visited node owning any matching local definition
                // decides; within one node, earliest-inserted wins.
                for node in scope.ancestors() {
                    let owned = self.assignments.iter().find(|assignment| {
                        !assignment.global
                            && assignment.key == key
                            && assignment
                                .owning_scope
                                .as_deref()
                                .is_some_and(|owner| owner.is_same_scope_as(&node))
                    });
                    if let Some(assignment) = owned {
                        return Some(assignment.value.clone());
                    }
                }
            }
            None => {
                let bare = self.assignments.iter().find(|assignment| {
                    !assignment.global && assignment.key == key && assignment.owning_scope.is_none()
                });
                if let Some(assignment) = bare {
                    return Some(assignment.value.clone());
                }
            }
        }

        if let Ok(value) = std::env::var(key) {
            tracing::debug!(%key, "resolved from process environment");
            return Some(value);
        }
        if let Some(value) = self.properties.property(key) {
            tracing::debug!(%key, "resolved from external property source");
            return Some(value);
        }
        None
    }

    /// Check whether [`get`] would return a value for `key`.
    ///
    /// [`get`]: ParameterRegistry::get
    pub fn has_value(&self, key: &str, scope: Option<&Rc<ScopeNode>>) -> bool {
        self.get(key, scope).is_some()
    }

    /// All accepted definitions, in insertion order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl Default for ParameterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
