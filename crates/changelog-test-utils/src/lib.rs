//! Shared test utilities for the changelog-params workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication across
//! crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`tree`] — scope-tree builders and pre-configured registries

pub mod tree;

pub use tree::{h2_registry, scope_chain};
