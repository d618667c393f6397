//! Fixture types for resolver property tests.

use ossature_test_support::scene::{SceneFixture, SceneShape};

/// Overall shape of a generated scene.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum SceneKind {
    /// A handful of nodes and skins.
    Small,
    /// Many shallow trees with short skins.
    Wide,
    /// Few trees, long skins reaching deep into them.
    Deep,
    /// Many skins over a small forest, so most of them overlap.
    Crowded,
}

impl SceneKind {
    pub(super) const fn shape(self) -> SceneShape {
        match self {
            Self::Small => SceneShape {
                nodes: 12,
                max_trees: 2,
                skins: 3,
                max_joints: 4,
            },
            Self::Wide => SceneShape {
                nodes: 64,
                max_trees: 8,
                skins: 6,
                max_joints: 3,
            },
            Self::Deep => SceneShape {
                nodes: 48,
                max_trees: 1,
                skins: 4,
                max_joints: 12,
            },
            Self::Crowded => SceneShape {
                nodes: 20,
                max_trees: 2,
                skins: 12,
                max_joints: 5,
            },
        }
    }
}

/// Generated scene plus the context needed to report a failure.
#[derive(Clone, Debug)]
pub(super) struct ResolveFixture {
    pub(super) kind: SceneKind,
    pub(super) seed: u64,
    pub(super) scene: SceneFixture,
}
