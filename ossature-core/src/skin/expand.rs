//! Expansion of a declared joint list into connected subtrees.
//!
//! Declared joints are grouped by direct parent links. A single group is
//! already connected; several groups are handed to the reconciler, which
//! climbs them onto a common parent. A final downward pass from the roots
//! captures every node that sits between a root and a declared joint.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument};

use super::reconcile::converge;
use crate::{
    DisjointSet,
    error::{ResolveError, Result},
    forest::NodeForest,
    node::NodeId,
};

/// Node set of one skin while it is being expanded.
#[derive(Clone, Debug, Default)]
pub(crate) struct SkinNodes {
    joints: BTreeSet<NodeId>,
    non_joints: BTreeSet<NodeId>,
}

impl SkinNodes {
    fn from_declared(declared: &[NodeId]) -> Self {
        Self {
            joints: declared.iter().copied().collect(),
            non_joints: BTreeSet::new(),
        }
    }

    /// Adds `id`, classified by its document-wide joint flag. Returns `true`
    /// when the node was not yet part of the skin.
    pub(crate) fn absorb(&mut self, forest: &NodeForest, id: NodeId) -> bool {
        if self.contains(id) {
            return false;
        }
        if forest.is_joint(id) {
            self.joints.insert(id)
        } else {
            self.non_joints.insert(id)
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.joints.contains(&id) || self.non_joints.contains(&id)
    }
}

/// Result of expanding one skin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Expansion {
    pub(crate) joints: BTreeSet<NodeId>,
    pub(crate) non_joints: BTreeSet<NodeId>,
    pub(crate) roots: Vec<NodeId>,
}

/// Expands the declared joints of skin `skin`.
///
/// Expects every declared joint to be marked on `forest` already.
#[instrument(
    name = "skin.expand",
    err,
    skip(forest, declared),
    fields(skin = skin, joints = declared.len()),
)]
pub(crate) fn expand_skin(
    forest: &NodeForest,
    skin: usize,
    declared: &[NodeId],
) -> Result<Expansion> {
    let mut groups = DisjointSet::with_capacity(declared.len());
    for &joint in declared {
        groups.insert(joint);
    }
    for &joint in declared {
        if let Some(parent) = forest.parent(joint).filter(|&parent| groups.contains(parent)) {
            groups.union(parent, joint);
        }
    }

    let mut candidates: Vec<NodeId> = groups
        .groups()
        .into_iter()
        .filter_map(|group| forest.highest(group))
        .collect();
    candidates.sort_unstable();

    let mut nodes = SkinNodes::from_declared(declared);
    let roots = match candidates.len() {
        0 => return Err(ResolveError::EmptySkin { skin }),
        1 => candidates,
        _ => converge(forest, skin, candidates, &mut nodes)?,
    };

    let captured = capture_between(forest, &roots, declared, &mut nodes);
    debug!(
        roots = roots.len(),
        joints = nodes.joints.len(),
        non_joints = nodes.non_joints.len(),
        captured,
        "skin expanded"
    );

    Ok(Expansion {
        joints: nodes.joints,
        non_joints: nodes.non_joints,
        roots,
    })
}

/// Absorbs every node below `roots` that has a declared joint among its
/// strict descendants. Returns the number of nodes added.
///
/// Iterative post-order walk; subtrees without a declared joint are visited
/// but nothing in them is absorbed.
fn capture_between(
    forest: &NodeForest,
    roots: &[NodeId],
    declared: &[NodeId],
    nodes: &mut SkinNodes,
) -> usize {
    let targets: HashSet<NodeId> = declared.iter().copied().collect();
    let mut leads_to_joint: HashSet<NodeId> = HashSet::new();
    let mut added = 0;

    for &root in roots {
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if !expanded {
                stack.push((id, true));
                stack.extend(forest.children(id).iter().map(|&child| (child, false)));
                continue;
            }
            let below = forest
                .children(id)
                .iter()
                .any(|child| targets.contains(child) || leads_to_joint.contains(child));
            if below {
                leads_to_joint.insert(id);
                if nodes.absorb(forest, id) {
                    added += 1;
                }
            }
        }
    }
    added
}
