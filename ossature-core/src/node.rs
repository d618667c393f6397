//! Scene node identifiers and per-node records.

use std::fmt;

use crate::skeleton::SkeletonId;

/// Dense, zero-based identifier of a scene node.
///
/// # Examples
/// ```
/// use ossature_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw node index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw node index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Joint status of a node.
///
/// The flag can only move from unset to set. Once any skin declares a node
/// as a joint it stays a joint for the rest of the document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JointFlag(bool);

impl JointFlag {
    /// Sets the flag. Setting it again has no effect.
    pub const fn mark(&mut self) {
        self.0 = true;
    }

    /// Returns `true` once the flag has been set.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0
    }
}

/// A node of the scene forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) height: usize,
    pub(crate) joint: JointFlag,
    pub(crate) skeleton: Option<SkeletonId>,
}

impl Node {
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            height: 0,
            joint: JointFlag::default(),
            skeleton: None,
        }
    }

    /// Name declared for the node, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent node, or `None` for a top-level node.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in declaration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of parent edges between the node and its top-level ancestor.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` when at least one skin declares the node as a joint.
    #[must_use]
    pub const fn is_joint(&self) -> bool {
        self.joint.is_set()
    }

    /// Skeleton the node was merged into, if any.
    #[must_use]
    pub const fn skeleton(&self) -> Option<SkeletonId> {
        self.skeleton
    }
}
