//! Synthetic scene generators.
//!
//! Every generator works on a parent list and raw joint lists and converts
//! the result into a [`SceneDesc`] at the end.

use ossature_core::{SceneDesc, SkinDesc};
use ossature_test_support::scene::{SceneFixture, SceneShape};

use crate::{
    error::BenchSetupError,
    params::{ResolveBenchParams, SceneKind},
};

/// Nodes per limb in [`wide`] scenes built by [`generate`].
pub const LIMB_DEPTH: usize = 8;

/// Joints per skin in [`overlapping`] scenes built by [`generate`].
pub const OVERLAP_WINDOW: usize = 6;

/// Builds the scene described by `params`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when the node count is too small
/// for the requested shape.
pub fn generate(params: &ResolveBenchParams, seed: u64) -> Result<SceneDesc, BenchSetupError> {
    match params.kind {
        SceneKind::Wide => wide(params.node_count >> 3, LIMB_DEPTH),
        SceneKind::Deep => deep(params.node_count),
        SceneKind::Overlapping => overlapping(params.node_count, OVERLAP_WINDOW),
        SceneKind::Random => random(params.node_count, seed),
    }
}

/// `limbs` chains of `depth` nodes hanging from one parentless node, with
/// one skin per chain. Every limb is its own skin root, so the merge must
/// stitch all of them into one skeleton.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `limbs` or `depth` is zero.
pub fn wide(limbs: usize, depth: usize) -> Result<SceneDesc, BenchSetupError> {
    non_zero(limbs, "limbs")?;
    non_zero(depth, "depth")?;
    let mut parents = vec![None];
    let mut skins = Vec::with_capacity(limbs);
    for _ in 0..limbs {
        let mut joints = Vec::with_capacity(depth);
        let mut parent = 0;
        for _ in 0..depth {
            let node = parents.len();
            parents.push(Some(parent));
            joints.push(node);
            parent = node;
        }
        skins.push(joints);
    }
    Ok(to_scene(&parents, &skins))
}

/// A single chain of `len` nodes with one skin declaring every other node,
/// so expansion has to absorb the gaps.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `len` is below two.
pub fn deep(len: usize) -> Result<SceneDesc, BenchSetupError> {
    non_zero(len.saturating_sub(1), "chain length beyond the root")?;
    let parents = chain(len);
    let joints: Vec<usize> = (1..len).step_by(2).collect();
    Ok(to_scene(&parents, &[joints]))
}

/// A chain of `len` nodes covered by skins of `window` consecutive joints,
/// each sharing its first joint with the previous skin's last.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `len` is below two or
/// `window` is zero.
pub fn overlapping(len: usize, window: usize) -> Result<SceneDesc, BenchSetupError> {
    non_zero(len.saturating_sub(1), "chain length beyond the root")?;
    non_zero(window, "window")?;
    let parents = chain(len);
    let step = window.saturating_sub(1).max(1);
    let skins: Vec<Vec<usize>> = (1..len)
        .step_by(step)
        .map(|start| (start..start.saturating_add(window).min(len)).collect())
        .collect();
    Ok(to_scene(&parents, &skins))
}

/// A seeded random forest of `node_count` nodes with one subtree-anchored
/// skin per eight nodes.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `node_count` is zero.
pub fn random(node_count: usize, seed: u64) -> Result<SceneDesc, BenchSetupError> {
    non_zero(node_count, "node_count")?;
    let fixture = SceneFixture::generate(
        seed,
        &SceneShape {
            nodes: node_count,
            max_trees: 4,
            skins: (node_count >> 3).max(1),
            max_joints: 8,
        },
    );
    Ok(to_scene(&fixture.parents, &fixture.skins))
}

fn chain(len: usize) -> Vec<Option<usize>> {
    (0..len).map(|node| node.checked_sub(1)).collect()
}

const fn non_zero(value: usize, context: &'static str) -> Result<(), BenchSetupError> {
    if value == 0 {
        return Err(BenchSetupError::ZeroValue { context });
    }
    Ok(())
}

fn to_scene(parents: &[Option<usize>], skins: &[Vec<usize>]) -> SceneDesc {
    SceneDesc::new(
        SceneDesc::nodes_from_parents(parents),
        skins
            .iter()
            .map(|joints| SkinDesc::new(joints.iter().copied()))
            .collect(),
    )
}
