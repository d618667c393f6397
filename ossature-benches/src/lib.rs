//! Benchmark support crate for ossature.
//!
//! Builds synthetic scene documents shaped to stress each resolution stage:
//! wide sibling skins for the skeleton merge, deep gapped chains for joint
//! expansion, overlapping skins for the union pass, and seeded random scenes
//! for a mixed workload.

pub mod error;
pub mod params;
pub mod scenes;
