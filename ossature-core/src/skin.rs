//! Skin records and the per-skin resolution passes.
//!
//! A skin starts as the declared joint list from the document. Expansion adds
//! the intermediate nodes needed to connect those joints, reconciliation
//! climbs disjoint roots until they become siblings, and verification
//! recomputes the roots from scratch before the skin is handed to the merger.

mod expand;
mod reconcile;
mod verify;

use std::collections::BTreeSet;

use crate::{
    error::{ResolveError, Result},
    forest::NodeForest,
    node::NodeId,
    scene::{BindMatrix, SkinDesc},
    skeleton::{BoneRef, SkeletonId},
};

pub(crate) use self::{
    expand::{Expansion, expand_skin},
    verify::verify_skin,
};

/// A skin after resolution.
///
/// # Examples
/// ```
/// use ossature_core::{NodeId, ResolverBuilder, SceneDesc, SkinDesc};
///
/// let nodes = SceneDesc::nodes_from_parents(&[None, Some(0), Some(1)]);
/// let scene = SceneDesc::new(nodes, vec![SkinDesc::new([0, 2])]);
/// let resolution = ResolverBuilder::new().build()?.resolve(&scene)?;
///
/// let skin = &resolution.skins()[0];
/// assert_eq!(skin.name(), "skin_0");
/// assert_eq!(skin.roots(), &[NodeId::new(0)]);
/// assert!(skin.non_joints().contains(&NodeId::new(1)));
/// # Ok::<(), ossature_core::ResolveError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Skin {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) joints: Vec<NodeId>,
    pub(crate) expanded_joints: BTreeSet<NodeId>,
    pub(crate) non_joints: BTreeSet<NodeId>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) skeleton: Option<SkeletonId>,
    pub(crate) joint_bones: Vec<BoneRef>,
    pub(crate) inverse_binds: Option<Vec<BindMatrix>>,
}

impl Skin {
    /// Position of the skin in the document.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Declared name, or `skin_{index}` when the document left it out.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared joints in document order.
    #[must_use]
    pub fn joints(&self) -> &[NodeId] {
        &self.joints
    }

    /// Declared joints plus every joint node absorbed while connecting them.
    #[must_use]
    pub const fn expanded_joints(&self) -> &BTreeSet<NodeId> {
        &self.expanded_joints
    }

    /// Non-joint nodes absorbed because they connect two joints.
    #[must_use]
    pub const fn non_joints(&self) -> &BTreeSet<NodeId> {
        &self.non_joints
    }

    /// Sorted roots of the skin's node set.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Skeleton the skin was merged into.
    #[must_use]
    pub const fn skeleton(&self) -> Option<SkeletonId> {
        self.skeleton
    }

    /// Bone of every declared joint, in declaration order.
    #[must_use]
    pub fn joint_bones(&self) -> &[BoneRef] {
        &self.joint_bones
    }

    /// Inverse bind matrices, when the document supplied them.
    #[must_use]
    pub fn inverse_binds(&self) -> Option<&[BindMatrix]> {
        self.inverse_binds.as_deref()
    }

    /// Every node the skin touches: expanded joints and non-joints.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.expanded_joints
            .union(&self.non_joints)
            .copied()
            .collect()
    }

    pub(crate) fn apply(&mut self, expansion: Expansion) {
        self.expanded_joints = expansion.joints;
        self.non_joints = expansion.non_joints;
        self.roots = expansion.roots;
    }
}

/// Validates the skin table and marks every declared joint on the forest.
///
/// All joints are marked before any skin is expanded, so every expansion sees
/// the joint flags of the whole document.
pub(crate) fn parse_skins(forest: &mut NodeForest, descs: &[SkinDesc]) -> Result<Vec<Skin>> {
    let node_count = forest.len();
    let mut skins = Vec::with_capacity(descs.len());
    for (index, desc) in descs.iter().enumerate() {
        if desc.joints.is_empty() {
            return Err(ResolveError::EmptySkin { skin: index });
        }
        if let Some(binds) = &desc.inverse_binds
            && binds.len() != desc.joints.len()
        {
            return Err(ResolveError::BindCountMismatch {
                skin: index,
                binds: binds.len(),
                joints: desc.joints.len(),
            });
        }

        let mut joints = Vec::with_capacity(desc.joints.len());
        for (position, &raw) in desc.joints.iter().enumerate() {
            if raw >= node_count {
                return Err(ResolveError::JointOutOfBounds {
                    skin: index,
                    joint: position,
                    node: raw,
                    node_count,
                });
            }
            joints.push(NodeId::new(raw));
        }

        let name = desc
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("skin_{index}"), str::to_owned);

        skins.push(Skin {
            index,
            name,
            expanded_joints: joints.iter().copied().collect(),
            joints,
            non_joints: BTreeSet::new(),
            roots: Vec::new(),
            skeleton: None,
            joint_bones: Vec::new(),
            inverse_binds: desc.inverse_binds.clone(),
        });
    }

    for skin in &skins {
        for &joint in &skin.joints {
            forest.mark_joint(joint);
        }
    }
    Ok(skins)
}
