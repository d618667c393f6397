//! Skeletons: the merged, connected bone hierarchies shared by skins.
//!
//! Skins are merged into skeleton partitions first, then each partition is
//! assigned an id, checked for a valid root list, and enumerated into bones.
//! Skeleton ids follow the smallest node of each partition, so they are
//! stable across runs and skin orderings.

mod bones;
mod merge;

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use crate::{
    error::{ResolveError, Result},
    forest::NodeForest,
    node::NodeId,
    skin::Skin,
};

pub(crate) use self::{bones::sanitise_bone_name, merge::partition};

/// Dense, zero-based identifier of a skeleton.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SkeletonId(usize);

impl SkeletonId {
    /// Wraps a raw skeleton index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw skeleton index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SkeletonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a bone inside a skeleton.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BoneRef {
    /// Skeleton owning the bone.
    pub skeleton: SkeletonId,
    /// Index into [`Skeleton::bones`].
    pub bone: usize,
}

/// One bone of a skeleton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bone {
    pub(crate) node: NodeId,
    pub(crate) parent: Option<usize>,
    pub(crate) is_joint: bool,
    pub(crate) name: String,
}

impl Bone {
    /// Scene node backing the bone.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Index of the parent bone; `None` for skeleton roots.
    #[must_use]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns `true` when a skin declared the node as a joint.
    #[must_use]
    pub const fn is_joint(&self) -> bool {
        self.is_joint
    }

    /// Name unique within the skeleton.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A resolved skeleton.
///
/// # Examples
/// ```
/// use ossature_core::{NodeId, ResolverBuilder, SceneDesc, SkinDesc};
///
/// // 0 -> {1 -> 2, 3 -> 4}
/// let nodes = SceneDesc::nodes_from_parents(&[None, Some(0), Some(1), Some(0), Some(3)]);
/// let scene = SceneDesc::new(nodes, vec![SkinDesc::new([1, 2]), SkinDesc::new([3, 4])]);
/// let resolution = ResolverBuilder::new().build()?.resolve(&scene)?;
///
/// let [skeleton] = resolution.skeletons() else { panic!("expected one skeleton") };
/// assert_eq!(skeleton.roots(), &[NodeId::new(1), NodeId::new(3)]);
/// assert_eq!(skeleton.skins(), &[0, 1]);
/// # Ok::<(), ossature_core::ResolveError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skeleton {
    id: SkeletonId,
    roots: Vec<NodeId>,
    joints: BTreeSet<NodeId>,
    non_joints: BTreeSet<NodeId>,
    bones: Vec<Bone>,
    bone_index: HashMap<NodeId, usize>,
    skins: Vec<usize>,
}

impl Skeleton {
    /// Identifier of the skeleton.
    #[must_use]
    pub const fn id(&self) -> SkeletonId {
        self.id
    }

    /// Sorted roots.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Members declared as joints by at least one skin.
    #[must_use]
    pub const fn joints(&self) -> &BTreeSet<NodeId> {
        &self.joints
    }

    /// Members absorbed because they connect joints.
    #[must_use]
    pub const fn non_joints(&self) -> &BTreeSet<NodeId> {
        &self.non_joints
    }

    /// Every member node, sorted.
    #[must_use]
    pub fn members(&self) -> BTreeSet<NodeId> {
        self.joints.union(&self.non_joints).copied().collect()
    }

    /// Bones in depth-first order; parents precede children.
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Bone index of `node`, if the node belongs to the skeleton.
    #[must_use]
    pub fn bone_of(&self, node: NodeId) -> Option<usize> {
        self.bone_index.get(&node).copied()
    }

    /// Indices of the skins bound to the skeleton, ascending.
    #[must_use]
    pub fn skins(&self) -> &[usize] {
        &self.skins
    }
}

/// Merges verified skins into skeletons, assigns every skin node to its
/// skeleton, and maps each declared joint to its bone.
pub(crate) fn build_skeletons(
    forest: &mut NodeForest,
    skins: &mut [Skin],
    default_bone_name: &str,
) -> Result<Vec<Skeleton>> {
    let groups = partition(forest, skins);
    let mut skeletons = Vec::with_capacity(groups.len());
    for (index, members) in groups.into_iter().enumerate() {
        skeletons.push(assemble(forest, SkeletonId::new(index), members, default_bone_name)?);
    }

    for skin in skins.iter_mut() {
        let id = skeleton_of(forest, skin)?;
        let Some(skeleton) = skeletons.get_mut(id.index()) else {
            return Err(ResolveError::SkinUnassigned { skin: skin.index });
        };
        skin.joint_bones = skin
            .joints
            .iter()
            .map(|&joint| {
                skeleton
                    .bone_of(joint)
                    .map(|bone| BoneRef { skeleton: id, bone })
                    .ok_or(ResolveError::UnmappedJoint {
                        skin: skin.index,
                        node: joint,
                    })
            })
            .collect::<Result<_>>()?;
        skin.skeleton = Some(id);
        skeleton.skins.push(skin.index);
    }
    Ok(skeletons)
}

fn assemble(
    forest: &mut NodeForest,
    id: SkeletonId,
    members: BTreeSet<NodeId>,
    default_bone_name: &str,
) -> Result<Skeleton> {
    for &node in &members {
        forest.assign_skeleton(node, id)?;
    }

    let roots = forest.subtree_roots(&members);
    if roots.is_empty() {
        return Err(ResolveError::SkeletonWithoutRoots { skeleton: id });
    }
    if !forest.share_parent(&roots) {
        return Err(ResolveError::SkeletonRootsNotSiblings {
            skeleton: id,
            roots,
        });
    }

    let (joints, non_joints): (BTreeSet<NodeId>, BTreeSet<NodeId>) =
        members.iter().partition(|&&node| forest.is_joint(node));
    let bones = bones::enumerate(forest, &roots, &members, default_bone_name);
    let bone_index = bones
        .iter()
        .enumerate()
        .map(|(index, bone)| (bone.node, index))
        .collect();

    Ok(Skeleton {
        id,
        roots,
        joints,
        non_joints,
        bones,
        bone_index,
        skins: Vec::new(),
    })
}

/// Skeleton holding every node of `skin`.
fn skeleton_of(forest: &NodeForest, skin: &Skin) -> Result<SkeletonId> {
    let mut found: Option<SkeletonId> = None;
    for node in skin.nodes() {
        let Some(owner) = forest.skeleton(node) else {
            return Err(ResolveError::SkinUnassigned { skin: skin.index });
        };
        match found {
            None => found = Some(owner),
            Some(first) if first != owner => {
                return Err(ResolveError::SkinSpansSkeletons {
                    skin: skin.index,
                    first,
                    second: owner,
                });
            }
            Some(_) => {}
        }
    }
    found.ok_or(ResolveError::SkinUnassigned { skin: skin.index })
}
