//! Convergence of a multi-rooted skin onto sibling roots.
//!
//! Deeper candidates first climb to the height of the shallowest one. All
//! candidates then climb one level per round until they share a parent.
//! Every node passed on the way is absorbed into the skin. Parentless nodes
//! count as siblings, so candidates in separate trees converge once they
//! reach the top level; a climb past a parentless node is an error.

use tracing::debug;

use super::expand::SkinNodes;
use crate::{
    error::{ResolveError, Result},
    forest::NodeForest,
    node::NodeId,
};

/// Climbs `candidates` until they are one node or siblings, returning the
/// sorted roots.
pub(crate) fn converge(
    forest: &NodeForest,
    skin: usize,
    mut candidates: Vec<NodeId>,
    nodes: &mut SkinNodes,
) -> Result<Vec<NodeId>> {
    let Some(shallowest) = candidates.iter().map(|&id| forest.height(id)).min() else {
        return Ok(candidates);
    };

    for candidate in &mut candidates {
        while forest.height(*candidate) > shallowest {
            *candidate = climb(forest, skin, *candidate, nodes)?;
        }
    }
    settle(&mut candidates);

    let mut rounds = 0_usize;
    while candidates.len() > 1 && !forest.share_parent(&candidates) {
        for candidate in &mut candidates {
            *candidate = climb(forest, skin, *candidate, nodes)?;
        }
        settle(&mut candidates);
        rounds += 1;
        debug!(
            skin,
            rounds,
            candidates = candidates.len(),
            "climbed skin roots one level"
        );
    }
    Ok(candidates)
}

fn climb(
    forest: &NodeForest,
    skin: usize,
    node: NodeId,
    nodes: &mut SkinNodes,
) -> Result<NodeId> {
    let parent = forest
        .parent(node)
        .ok_or(ResolveError::DisconnectedRoots { skin, node })?;
    nodes.absorb(forest, parent);
    Ok(parent)
}

fn settle(candidates: &mut Vec<NodeId>) {
    candidates.sort_unstable();
    candidates.dedup();
}
