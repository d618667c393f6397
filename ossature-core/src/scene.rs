//! Input records handed over by the interchange-file parser.
//!
//! The node table only carries what skeleton resolution needs: an optional
//! name and the ordered child list. Parents are derived from the child lists.
//! Skin bind matrices are opaque and carried through unchanged.

/// Column-major 4x4 inverse bind matrix, opaque to the resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindMatrix(pub [f32; 16]);

impl BindMatrix {
    /// The identity matrix, used for skins that supply no bind matrices.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);
}

impl Default for BindMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One entry of the node table.
///
/// # Examples
/// ```
/// use ossature_core::NodeDesc;
///
/// let node = NodeDesc::named("hips").with_children([1, 2]);
/// assert_eq!(node.children, vec![1, 2]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeDesc {
    /// Optional display name; used to name bones.
    pub name: Option<String>,
    /// Raw indices of the node's children, in declaration order.
    pub children: Vec<usize>,
}

impl NodeDesc {
    /// Creates an unnamed node without children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a named node without children.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    /// Replaces the child list.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = usize>) -> Self {
        self.children = children.into_iter().collect();
        self
    }
}

/// One skin definition: the joints that deform a mesh.
///
/// # Examples
/// ```
/// use ossature_core::{BindMatrix, SkinDesc};
///
/// let skin = SkinDesc::new([3, 4]).with_inverse_binds(vec![BindMatrix::IDENTITY; 2]);
/// assert_eq!(skin.joints, vec![3, 4]);
/// assert!(skin.name.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkinDesc {
    /// Optional skin name; defaults to `skin_{index}`.
    pub name: Option<String>,
    /// Raw node indices of the declared joints, in declaration order.
    pub joints: Vec<usize>,
    /// One inverse bind matrix per joint, when the skin provides them.
    pub inverse_binds: Option<Vec<BindMatrix>>,
}

impl SkinDesc {
    /// Creates an unnamed skin over `joints`.
    #[must_use]
    pub fn new(joints: impl IntoIterator<Item = usize>) -> Self {
        Self {
            name: None,
            joints: joints.into_iter().collect(),
            inverse_binds: None,
        }
    }

    /// Sets the skin name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the inverse bind matrices.
    #[must_use]
    pub fn with_inverse_binds(mut self, binds: Vec<BindMatrix>) -> Self {
        self.inverse_binds = Some(binds);
        self
    }
}

/// The parsed document: its node table and skins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDesc {
    /// Flat node table indexed by node id.
    pub nodes: Vec<NodeDesc>,
    /// Skins in declaration order.
    pub skins: Vec<SkinDesc>,
}

impl SceneDesc {
    /// Creates a scene from its node table and skins.
    #[must_use]
    pub const fn new(nodes: Vec<NodeDesc>, skins: Vec<SkinDesc>) -> Self {
        Self { nodes, skins }
    }

    /// Builds a node table from a parent list, where `parents[i]` is the
    /// parent of node `i`. Children are listed in ascending order.
    ///
    /// # Examples
    /// ```
    /// use ossature_core::SceneDesc;
    ///
    /// let nodes = SceneDesc::nodes_from_parents(&[None, Some(0), Some(0)]);
    /// assert_eq!(nodes[0].children, vec![1, 2]);
    /// assert!(nodes[1].children.is_empty());
    /// ```
    #[must_use]
    pub fn nodes_from_parents(parents: &[Option<usize>]) -> Vec<NodeDesc> {
        let mut nodes = vec![NodeDesc::new(); parents.len()];
        for (child, parent) in parents.iter().enumerate() {
            if let Some(node) = parent.and_then(|parent| nodes.get_mut(parent)) {
                node.children.push(child);
            }
        }
        nodes
    }
}
