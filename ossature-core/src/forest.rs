//! The scene node forest.
//!
//! Built once per document from the node table. Parent links are derived from
//! child lists, heights are assigned top-down from the parentless nodes, and
//! the structure is validated so every later pass can walk parent chains
//! without bounds or cycle checks. After construction only the joint flag and
//! skeleton assignment of a node change.

use std::collections::BTreeSet;

use crate::{
    DisjointSet, NodeDesc,
    error::{ResolveError, Result},
    node::{Node, NodeId},
    skeleton::SkeletonId,
};

/// Nodes of one document with parent, child, and height information.
///
/// # Examples
/// ```
/// use ossature_core::{NodeDesc, NodeForest, NodeId};
///
/// let forest = NodeForest::from_descs(&[
///     NodeDesc::new().with_children([1]),
///     NodeDesc::new().with_children([2]),
///     NodeDesc::new(),
/// ])?;
/// assert_eq!(forest.roots(), &[NodeId::new(0)]);
/// assert_eq!(forest.height(NodeId::new(2)), 2);
/// # Ok::<(), ossature_core::ResolveError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeForest {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl NodeForest {
    /// Builds and validates the forest described by `descs`.
    ///
    /// # Errors
    /// Returns [`ResolveError::ChildOutOfBounds`] for child indices outside the
    /// table, [`ResolveError::DuplicateChild`] when a child is listed twice by
    /// one parent, [`ResolveError::MultipleParents`] when two parents claim one
    /// node, and [`ResolveError::ParentCycle`] when a node cannot be reached
    /// from any parentless node.
    pub fn from_descs(descs: &[NodeDesc]) -> Result<Self> {
        let node_count = descs.len();
        let mut nodes: Vec<Node> = descs
            .iter()
            .map(|desc| Node::new(desc.name.clone()))
            .collect();

        for (index, desc) in descs.iter().enumerate() {
            let parent = NodeId::new(index);
            for &raw in &desc.children {
                if raw >= node_count {
                    return Err(ResolveError::ChildOutOfBounds {
                        parent,
                        child: raw,
                        node_count,
                    });
                }
                let child = NodeId::new(raw);
                match nodes[raw].parent {
                    Some(existing) if existing == parent => {
                        return Err(ResolveError::DuplicateChild { parent, child });
                    }
                    Some(existing) => {
                        return Err(ResolveError::MultipleParents {
                            node: child,
                            first: existing,
                            second: parent,
                        });
                    }
                    None => nodes[raw].parent = Some(parent),
                }
                nodes[index].children.push(child);
            }
        }

        let roots: Vec<NodeId> = (0..node_count)
            .filter(|&index| nodes[index].parent.is_none())
            .map(NodeId::new)
            .collect();

        Self::assign_heights(&mut nodes, &roots)?;
        Ok(Self { nodes, roots })
    }

    fn assign_heights(nodes: &mut [Node], roots: &[NodeId]) -> Result<()> {
        let mut reached = vec![false; nodes.len()];
        let mut stack: Vec<(NodeId, usize)> = roots.iter().map(|&root| (root, 0)).collect();
        while let Some((id, height)) = stack.pop() {
            let index = id.index();
            reached[index] = true;
            nodes[index].height = height;
            stack.extend(
                nodes[index]
                    .children
                    .iter()
                    .map(|&child| (child, height + 1)),
            );
        }

        match reached.iter().position(|&seen| !seen) {
            Some(index) => Err(ResolveError::ParentCycle {
                node: NodeId::new(index),
            }),
            None => Ok(()),
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` for a scene without nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parentless nodes in ascending order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the node record for `id`, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Iterates node ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Parent of `id`.
    ///
    /// # Panics
    /// Panics when `id` is not a node of this forest; use [`Self::node`] for
    /// ids of unknown origin.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.at(id).parent
    }

    /// Children of `id` in declaration order.
    ///
    /// # Panics
    /// Panics when `id` is not a node of this forest; use [`Self::node`] for
    /// ids of unknown origin.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.at(id).children
    }

    /// Height of `id`: the number of edges to its parentless ancestor.
    ///
    /// # Panics
    /// Panics when `id` is not a node of this forest; use [`Self::node`] for
    /// ids of unknown origin.
    #[must_use]
    pub fn height(&self, id: NodeId) -> usize {
        self.at(id).height
    }

    /// Returns `true` once any skin has declared `id` as a joint.
    ///
    /// # Panics
    /// Panics when `id` is not a node of this forest; use [`Self::node`] for
    /// ids of unknown origin.
    #[must_use]
    pub fn is_joint(&self, id: NodeId) -> bool {
        self.at(id).is_joint()
    }

    /// Skeleton `id` was merged into, if any.
    ///
    /// # Panics
    /// Panics when `id` is not a node of this forest; use [`Self::node`] for
    /// ids of unknown origin.
    #[must_use]
    pub fn skeleton(&self, id: NodeId) -> Option<SkeletonId> {
        self.at(id).skeleton
    }

    pub(crate) fn mark_joint(&mut self, id: NodeId) {
        self.nodes[id.index()].joint.mark();
    }

    /// Records `skeleton` as the owner of `id`; a node is assigned once.
    pub(crate) fn assign_skeleton(&mut self, id: NodeId, skeleton: SkeletonId) -> Result<()> {
        let node = &mut self.nodes[id.index()];
        if let Some(existing) = node.skeleton {
            return Err(ResolveError::NodeInTwoSkeletons {
                node: id,
                existing,
                skeleton,
            });
        }
        node.skeleton = Some(skeleton);
        Ok(())
    }

    /// The shallowest node of `nodes`; ties go to the smallest id.
    pub(crate) fn highest(&self, nodes: impl IntoIterator<Item = NodeId>) -> Option<NodeId> {
        nodes
            .into_iter()
            .min_by_key(|&id| (self.height(id), id))
    }

    /// Returns `true` for a single node, or when every node has the same
    /// parent. Parentless nodes are siblings under the scene root.
    pub(crate) fn share_parent(&self, nodes: &[NodeId]) -> bool {
        match nodes {
            [] => false,
            [first, rest @ ..] => {
                let parent = self.parent(*first);
                rest.iter().all(|&id| self.parent(id) == parent)
            }
        }
    }

    /// Roots of the subgraph induced by `members`, sorted ascending.
    ///
    /// Each member is joined with its parent when the parent is also a
    /// member; the shallowest node of every resulting group is a root.
    pub(crate) fn subtree_roots(&self, members: &BTreeSet<NodeId>) -> Vec<NodeId> {
        let mut groups = DisjointSet::with_capacity(members.len());
        for &id in members {
            groups.insert(id);
        }
        for &id in members {
            if let Some(parent) = self.parent(id).filter(|parent| members.contains(parent)) {
                groups.union(parent, id);
            }
        }

        let mut roots: Vec<NodeId> = groups
            .groups()
            .into_iter()
            .filter_map(|group| self.highest(group))
            .collect();
        roots.sort_unstable();
        roots
    }

    fn at(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
