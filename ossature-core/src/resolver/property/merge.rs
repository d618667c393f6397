//! Skeleton merge idempotence.
//!
//! Two independent merges over the same verified skins must produce the same
//! partitions, and every partition must satisfy the root invariant.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    NodeForest,
    skeleton::partition,
    skin::{expand_skin, parse_skins},
    test_utils::scene_from_fixture,
};

use super::types::ResolveFixture;

pub(super) fn run_merge_idempotence_property(fixture: &ResolveFixture) -> TestCaseResult {
    let scene = scene_from_fixture(&fixture.scene);
    let mut forest = NodeForest::from_descs(&scene.nodes)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let mut skins = parse_skins(&mut forest, &scene.skins)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    for skin in &mut skins {
        let expansion = expand_skin(&forest, skin.index, &skin.joints)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        skin.apply(expansion);
    }

    let first = partition(&forest, &skins);
    let second = partition(&forest, &skins);
    if first != second {
        return Err(TestCaseError::fail(format!(
            "merge is not repeatable ({:?}, seed {}): {first:?} vs {second:?}",
            fixture.kind, fixture.seed
        )));
    }

    for group in &first {
        let roots = forest.subtree_roots(group);
        if roots.is_empty() || !forest.share_parent(&roots) {
            return Err(TestCaseError::fail(format!(
                "partition {group:?} has invalid roots {roots:?} ({:?}, seed {})",
                fixture.kind, fixture.seed
            )));
        }
    }

    for skin in &skins {
        let nodes = skin.nodes();
        let owners = first
            .iter()
            .filter(|group| nodes.iter().any(|node| group.contains(node)))
            .count();
        if owners != 1 {
            return Err(TestCaseError::fail(format!(
                "skin {} spans {owners} partitions ({:?}, seed {})",
                skin.index, fixture.kind, fixture.seed
            )));
        }
    }
    Ok(())
}
