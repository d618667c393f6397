//! Skin-order independence of the resolved skeletons.

use std::collections::BTreeSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{NodeId, Resolution, ResolverBuilder, test_utils::scene_from_fixture};

use super::types::ResolveFixture;

type SkeletonShape = (BTreeSet<NodeId>, Vec<NodeId>, Vec<NodeId>);

pub(super) fn run_skin_order_independence_property(fixture: &ResolveFixture) -> TestCaseResult {
    let resolver = ResolverBuilder::new()
        .build()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let forward = resolver
        .resolve(&scene_from_fixture(&fixture.scene))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let backward = resolver
        .resolve(&scene_from_fixture(&fixture.scene.with_reversed_skins()))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    let forward_shapes = shapes(&forward);
    let backward_shapes = shapes(&backward);
    if forward_shapes != backward_shapes {
        return Err(TestCaseError::fail(format!(
            "skeletons depend on skin order ({:?}, seed {}): {forward_shapes:?} vs {backward_shapes:?}",
            fixture.kind, fixture.seed
        )));
    }

    let count = forward.skins().len();
    for (index, skin) in forward.skins().iter().enumerate() {
        let mirror = &backward.skins()[count - 1 - index];
        if skin.nodes() != mirror.nodes() || skin.roots() != mirror.roots() {
            return Err(TestCaseError::fail(format!(
                "skin {index} expands differently when skins are reversed ({:?}, seed {})",
                fixture.kind, fixture.seed
            )));
        }
    }
    Ok(())
}

/// Members, roots, and bone order of every skeleton.
fn shapes(resolution: &Resolution) -> Vec<SkeletonShape> {
    resolution
        .skeletons()
        .iter()
        .map(|skeleton| {
            (
                skeleton.members(),
                skeleton.roots().to_vec(),
                skeleton.bones().iter().map(|bone| bone.node()).collect(),
            )
        })
        .collect()
}
