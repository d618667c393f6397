//! Verifier self-consistency.
//!
//! Every skin that expands successfully must pass verification, and
//! dropping one of its cached roots must be caught as an internal failure.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    NodeForest,
    skin::{expand_skin, parse_skins, verify_skin},
    test_utils::scene_from_fixture,
};

use super::types::ResolveFixture;

pub(super) fn run_verifier_consistency_property(fixture: &ResolveFixture) -> TestCaseResult {
    let scene = scene_from_fixture(&fixture.scene);
    let mut forest = NodeForest::from_descs(&scene.nodes).map_err(|err| fail(fixture, &err))?;
    let mut skins = parse_skins(&mut forest, &scene.skins).map_err(|err| fail(fixture, &err))?;

    for skin in &mut skins {
        let expansion =
            expand_skin(&forest, skin.index, &skin.joints).map_err(|err| fail(fixture, &err))?;
        skin.apply(expansion);

        for joint in &skin.joints {
            if !skin.expanded_joints.contains(joint) {
                return Err(TestCaseError::fail(format!(
                    "skin {} lost declared joint {joint} ({:?}, seed {})",
                    skin.index, fixture.kind, fixture.seed
                )));
            }
        }
        if !skin.roots.is_sorted() || skin.roots.is_empty() {
            return Err(TestCaseError::fail(format!(
                "skin {} roots {:?} are empty or unsorted",
                skin.index, skin.roots
            )));
        }
        verify_skin(&forest, skin).map_err(|err| fail(fixture, &err))?;

        let mut corrupted = skin.clone();
        corrupted.roots.remove(0);
        match verify_skin(&forest, &corrupted) {
            Err(err) if err.is_internal() => {}
            other => {
                return Err(TestCaseError::fail(format!(
                    "dropping a root of skin {} was not rejected: {other:?}",
                    skin.index
                )));
            }
        }
    }
    Ok(())
}

fn fail(fixture: &ResolveFixture, err: &crate::ResolveError) -> TestCaseError {
    TestCaseError::fail(format!(
        "{err} ({:?}, seed {}, parents {:?}, skins {:?})",
        fixture.kind, fixture.seed, fixture.scene.parents, fixture.scene.skins
    ))
}
