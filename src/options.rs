//! Duplicate-handling policy.
//!
//! When an item is added to a container that already holds a matching child —
//! same name for a group, structurally equal value for a list — the active
//! [`OnDuplicate`] policy decides the outcome. The policy applies both to
//! direct tree mutation and to every insertion the parser performs.
//!
//! ## Examples
//!
//! ```rust
//! use tycon::{Config, Node, OnDuplicate, Value};
//!
//! let mut config = Config::with_policy(OnDuplicate::Keep);
//! config.insert(Node::named("retries", 3)).unwrap();
//! config.insert(Node::named("retries", 5)).unwrap();
//!
//! // Keep leaves the first value in place.
//! assert_eq!(config.lookup("retries").unwrap().as_integer(), Some(3));
//! ```

/// Behavior when an insertion collides with an existing child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnDuplicate {
    /// Leave the existing child untouched; the insertion returns it.
    Keep,
    /// Remove the existing child, then append the incoming one.
    Overwrite,
    /// Fail the insertion with an already-exists error.
    #[default]
    Reject,
}
