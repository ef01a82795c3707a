//! Outfit matching: static pairing rules and the matcher that applies them.

pub mod matcher;
pub mod rules;

pub use matcher::StyleMatcher;
