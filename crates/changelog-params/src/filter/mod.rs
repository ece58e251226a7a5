//! Filter predicates for conditional parameter definitions
//!
//! Every parameter definition may carry three applicability filters: a
//! platform tag list, a context expression, and a label set. The predicates
//! here decide whether a definition applies to the state a registry was
//! configured with. They are pure, and they are evaluated exactly once — at
//! `set` time — so a definition that was filtered out never enters the store.

pub mod context;
pub mod label;
pub mod platform;

pub use context::{ContextExpression, Contexts};
pub use label::Labels;
pub use platform::PlatformList;
