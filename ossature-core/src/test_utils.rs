//! Shared test utilities for `ossature-core`.

use std::collections::BTreeSet;

use ossature_test_support::{property::PropertyProfile, scene::SceneFixture};
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    NodeDesc, NodeId, SceneDesc, SkinDesc,
    forest::NodeForest,
    skin::{Skin, expand_skin, parse_skins},
};

/// Builds a standard proptest configuration from the shared profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::from_env(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Wraps raw indices as node ids, keeping their order.
pub(crate) fn ids(raw: &[usize]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::new).collect()
}

/// Wraps raw indices as a sorted node id set.
pub(crate) fn id_set(raw: &[usize]) -> BTreeSet<NodeId> {
    raw.iter().copied().map(NodeId::new).collect()
}

/// Converts a generated fixture into a scene description.
pub(crate) fn scene_from_fixture(fixture: &SceneFixture) -> SceneDesc {
    SceneDesc::new(
        SceneDesc::nodes_from_parents(&fixture.parents),
        fixture
            .skins
            .iter()
            .map(|joints| SkinDesc::new(joints.iter().copied()))
            .collect(),
    )
}

/// Builds a forest from `parents` and expands one skin per joint list,
/// stopping before the merge.
pub(crate) fn expanded(parents: &[Option<usize>], joints: &[&[usize]]) -> (NodeForest, Vec<Skin>) {
    expanded_from(&SceneDesc::nodes_from_parents(parents), joints)
}

/// Like [`expanded`], from a full node table.
pub(crate) fn expanded_from(nodes: &[NodeDesc], joints: &[&[usize]]) -> (NodeForest, Vec<Skin>) {
    let mut forest = NodeForest::from_descs(nodes).expect("valid forest");
    let descs: Vec<SkinDesc> = joints
        .iter()
        .map(|joints| SkinDesc::new(joints.iter().copied()))
        .collect();
    let mut skins = parse_skins(&mut forest, &descs).expect("valid skins");
    for skin in &mut skins {
        let expansion = expand_skin(&forest, skin.index, &skin.joints).expect("expands");
        skin.apply(expansion);
    }
    (forest, skins)
}
