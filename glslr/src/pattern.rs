//! Structural matchers and templates compiled from GLSL fragments with placeholders.
//!
//! A placeholder is an identifier spelled with a configurable prefix (`__` by
//! default) followed by a name. Matchers test a candidate subtree against the
//! pattern and capture what the placeholders stand for; templates produce fresh
//! subtrees by cloning the pattern into a target root with the holes filled in.

/// Default placeholder prefix
pub const PLACEHOLDER_PREFIX: &str = "__";

mod matcher;
pub use matcher::*;

mod template;
pub use template::*;
