//! Tag-based scenario selection
//!
//! Scenarios carry a [`TagSet`] read from `meta.tags`. Collections can be
//! narrowed with the primitive operators in [`filter`] or with a parsed
//! [`TagExpression`] such as `(smoke or regression) and not slow`.
//!
//! Filtering never touches the scenarios themselves; it only selects
//! references to them.

pub mod filter;

mod expression;
mod tag_set;

pub use expression::{Expr, MAX_NESTING, TagExpression};
pub use filter::Tagged;
pub use tag_set::{TAGS_KEY, TagSet};
