//! Strategy builders for resolver property tests.

use ossature_test_support::scene::SceneFixture;
use proptest::prelude::*;

use super::types::{ResolveFixture, SceneKind};

/// Samples a scene kind and a seed, then generates the scene.
pub(super) fn resolve_fixture_strategy() -> impl Strategy<Value = ResolveFixture> {
    (scene_kind_strategy(), any::<u64>()).prop_map(|(kind, seed)| generate_fixture(kind, seed))
}

/// Generates the fixture for a specific kind and seed.
pub(super) fn generate_fixture(kind: SceneKind, seed: u64) -> ResolveFixture {
    ResolveFixture {
        kind,
        seed,
        scene: SceneFixture::generate(seed, &kind.shape()),
    }
}

fn scene_kind_strategy() -> impl Strategy<Value = SceneKind> {
    prop_oneof![
        2 => Just(SceneKind::Small),
        1 => Just(SceneKind::Wide),
        1 => Just(SceneKind::Deep),
        2 => Just(SceneKind::Crowded),
    ]
}
