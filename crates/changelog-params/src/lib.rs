//! Scoped parameter resolution for hierarchically-included changelogs
//!
//! This crate is the parameter-resolution engine of a structured,
//! multi-document migration tool. The document loader builds a tree of
//! [`ScopeNode`]s while parsing, feeds every discovered parameter definition
//! to a [`ParameterRegistry`], and asks an [`ExpressionExpander`] to
//! materialize template strings containing `${name}` placeholders:
//!
//! ```text
//!       document loader
//!        |           |
//!   ScopeNode   set / get
//!        |           |
//!        +--> ParameterRegistry <-- ExpressionExpander
//!                    |
//!          filters (platform, context, label)
//! ```
//!
//! Definitions are conditional (platform tag list, context expression, label
//! set — evaluated once, at registration) and scoped: a *global* definition
//! is visible everywhere with first-wins precedence, a *local* one only to
//! its owning document and that document's includes, nearest owner first.
//! Unresolved keys fall back to process environment variables and a
//! host-provided [`PropertySource`].
//!
//! # Example
//!
//! ```
//! use changelog_params::{
//!     EngineSettings, ExpressionExpander, ParameterRegistry, ScopeNode,
//! };
//!
//! let master = ScopeNode::new("db/changelog-master.xml");
//! let mut registry = ParameterRegistry::for_platform("h2");
//! registry.set("schema", "public");
//!
//! let expander = ExpressionExpander::new(&registry, &EngineSettings::default());
//! let sql = expander.expand("create table ${schema}.users", Some(&master)).unwrap();
//! assert_eq!(sql, "create table public.users");
//! ```

pub mod error;
pub mod expand;
pub mod filter;
pub mod registry;
pub mod scope;
pub mod settings;

pub use error::{Error, Result};
pub use expand::ExpressionExpander;
pub use filter::{ContextExpression, Contexts, Labels, PlatformList};
pub use registry::{Assignment, NoProperties, ParameterRegistry, PropertySource};
pub use scope::{Ancestors, ScopeNode};
pub use settings::{EngineSettings, MissingPropertyMode};
