//! Property-based tests for the resolution pipeline.
//!
//! Generates random forests with skins anchored in random subtrees and
//! checks that the verifier agrees with expansion, that merging is
//! repeatable, and that the result does not depend on skin order.

mod consistency;
mod merge;
mod ordering;
mod strategies;
mod types;
