//! Deterministic bone enumeration and naming.

use std::collections::{BTreeSet, HashSet};

use super::Bone;
use crate::{forest::NodeForest, node::NodeId};

/// Replaces characters that are not allowed in bone names.
pub(crate) fn sanitise_bone_name(raw: &str) -> String {
    raw.replace([':', '/'], "_")
}

#[derive(Debug, Default)]
struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    fn claim(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        let mut suffix = 2_usize;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Lists the bones of a skeleton depth-first.
///
/// Roots are visited in the given (sorted) order and children in ascending
/// node order, skipping nodes outside `members`.
pub(super) fn enumerate(
    forest: &NodeForest,
    roots: &[NodeId],
    members: &BTreeSet<NodeId>,
    default_name: &str,
) -> Vec<Bone> {
    let mut bones = Vec::with_capacity(members.len());
    let mut names = UniqueNames::default();
    let mut stack: Vec<(NodeId, Option<usize>)> =
        roots.iter().rev().map(|&root| (root, None)).collect();

    while let Some((node, parent)) = stack.pop() {
        let index = bones.len();
        let name = forest
            .node(node)
            .and_then(|record| record.name())
            .map(sanitise_bone_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| default_name.to_owned());
        bones.push(Bone {
            node,
            parent,
            is_joint: forest.is_joint(node),
            name: names.claim(name),
        });

        let mut children: Vec<NodeId> = forest
            .children(node)
            .iter()
            .copied()
            .filter(|child| members.contains(child))
            .collect();
        children.sort_unstable();
        stack.extend(children.into_iter().rev().map(|child| (child, Some(index))));
    }
    bones
}
