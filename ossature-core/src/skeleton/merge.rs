//! Cross-skin merge into skeleton partitions.
//!
//! Every skin contributes its node set, linked by parent edges inside that
//! skin and by its sibling roots. Groups are then stitched together while
//! any two of them touch: their top nodes are siblings (parentless tops count
//! as siblings under the scene root), or the top of one hangs directly below
//! a member of the other. The loop runs until a full
//! pass makes no merge.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{DisjointSet, forest::NodeForest, node::NodeId, skin::Skin};

struct Group {
    top: NodeId,
    members: BTreeSet<NodeId>,
}

impl Group {
    fn touches(&self, other: &Self, forest: &NodeForest) -> bool {
        let parent = forest.parent(self.top);
        let other_parent = forest.parent(other.top);
        parent == other_parent
            || parent.is_some_and(|node| other.members.contains(&node))
            || other_parent.is_some_and(|node| self.members.contains(&node))
    }
}

/// Partitions the nodes of all `skins` into skeletons.
///
/// Each partition is sorted, and partitions are ordered by their smallest
/// node.
#[instrument(
    name = "skeleton.merge",
    skip(forest, skins),
    fields(skins = skins.len()),
)]
pub(crate) fn partition(forest: &NodeForest, skins: &[Skin]) -> Vec<BTreeSet<NodeId>> {
    let mut set = DisjointSet::new();
    for skin in skins {
        let nodes = skin.nodes();
        for &node in &nodes {
            set.insert(node);
        }
        for &node in &nodes {
            if let Some(parent) = forest.parent(node).filter(|parent| nodes.contains(parent)) {
                set.union(parent, node);
            }
        }
        if let Some((&first, rest)) = skin.roots.split_first() {
            for &root in rest {
                set.union(first, root);
            }
        }
    }

    let mut passes = 0_usize;
    loop {
        let groups = collect_groups(forest, &mut set);
        let mut merged = 0_usize;
        for (index, group) in groups.iter().enumerate() {
            for other in groups.iter().skip(index + 1) {
                if group.touches(other, forest) && !set.same_group(group.top, other.top) {
                    set.union(group.top, other.top);
                    merged += 1;
                }
            }
        }
        passes += 1;
        debug!(passes, groups = groups.len(), merged, "stitched skeleton groups");
        if merged == 0 {
            return groups.into_iter().map(|group| group.members).collect();
        }
    }
}

fn collect_groups(forest: &NodeForest, set: &mut DisjointSet<NodeId>) -> Vec<Group> {
    let mut groups: Vec<Group> = set
        .groups()
        .into_iter()
        .filter_map(|members| {
            let top = forest.highest(members.iter().copied())?;
            Some(Group {
                top,
                members: members.into_iter().collect(),
            })
        })
        .collect();
    groups.sort_unstable_by_key(|group| group.members.first().copied());
    groups
}
