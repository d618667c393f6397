//! Benchmark parameter types.

use std::fmt;

/// Shape of a synthetic scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    /// Many short limbs under one parent, one skin per limb.
    Wide,
    /// One long chain with a skin that declares every other node.
    Deep,
    /// A chain covered by skins that overlap their neighbours.
    Overlapping,
    /// Seeded random forest with subtree-anchored skins.
    Random,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wide => "wide",
            Self::Deep => "deep",
            Self::Overlapping => "overlapping",
            Self::Random => "random",
        })
    }
}

/// Parameters for one resolution benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ResolveBenchParams {
    /// Scene shape.
    pub kind: SceneKind,
    /// Approximate number of nodes in the scene.
    pub node_count: usize,
}

impl fmt::Display for ResolveBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.kind, self.node_count)
    }
}
