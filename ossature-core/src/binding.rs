//! Skin bindings: what the scene builder attaches to each skinned mesh.
//!
//! Every declared joint becomes one bind carrying its bone target and its
//! inverse bind matrix, in the skin's original joint order. Skins whose
//! binds are identical can share a single binding.

use tracing::warn;

use crate::{
    error::{ResolveError, Result},
    node::NodeId,
    scene::BindMatrix,
    skeleton::{Skeleton, SkeletonId},
    skin::Skin,
};

/// How binds refer to their bone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BindMode {
    /// Bind by bone index within the skeleton.
    #[default]
    BoneIndex,
    /// Bind by the bone's unique name.
    BoneName,
}

/// Bone referenced by a bind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindTarget {
    /// Index into [`Skeleton::bones`].
    Index(usize),
    /// Unique bone name within the skeleton.
    Name(String),
}

/// One joint of a skin bound to a bone.
#[derive(Clone, Debug, PartialEq)]
pub struct Bind {
    joint: NodeId,
    target: BindTarget,
    inverse: BindMatrix,
}

impl Bind {
    /// Declared joint node.
    #[must_use]
    pub const fn joint(&self) -> NodeId {
        self.joint
    }

    /// Bone the joint is bound to.
    #[must_use]
    pub const fn target(&self) -> &BindTarget {
        &self.target
    }

    /// Inverse bind matrix; identity when the skin supplied none.
    #[must_use]
    pub const fn inverse(&self) -> BindMatrix {
        self.inverse
    }
}

/// Binds of one skin against its skeleton.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinBinding {
    skin: usize,
    skeleton: SkeletonId,
    binds: Vec<Bind>,
    canonical: usize,
}

impl SkinBinding {
    /// Index of the bound skin.
    #[must_use]
    pub const fn skin(&self) -> usize {
        self.skin
    }

    /// Skeleton the skin deforms.
    #[must_use]
    pub const fn skeleton(&self) -> SkeletonId {
        self.skeleton
    }

    /// Binds in the skin's joint order.
    #[must_use]
    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    /// Skin whose binding this one shares; the skin itself when unique.
    #[must_use]
    pub const fn canonical(&self) -> usize {
        self.canonical
    }

    /// Returns `true` when the binding was collapsed onto an earlier skin.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        self.canonical != self.skin
    }
}

/// Builds one binding per skin. With `collapse`, a skin whose skeleton and
/// binds equal those of an earlier unique skin points at that skin.
pub(crate) fn bind_skins(
    skins: &[Skin],
    skeletons: &[Skeleton],
    mode: BindMode,
    collapse: bool,
) -> Result<Vec<SkinBinding>> {
    let mut bindings: Vec<SkinBinding> = Vec::with_capacity(skins.len());
    for skin in skins {
        let mut binding = bind_skin(skin, skeletons, mode)?;
        if collapse
            && let Some(original) = bindings.iter().find(|earlier| {
                !earlier.is_duplicate()
                    && earlier.skeleton == binding.skeleton
                    && earlier.binds == binding.binds
            })
        {
            warn!(
                skin = skin.index,
                canonical = original.skin,
                "skin duplicates an earlier skin, sharing its binding"
            );
            binding.canonical = original.skin;
        }
        bindings.push(binding);
    }
    Ok(bindings)
}

fn bind_skin(skin: &Skin, skeletons: &[Skeleton], mode: BindMode) -> Result<SkinBinding> {
    let skeleton = skin
        .skeleton
        .ok_or(ResolveError::SkinUnassigned { skin: skin.index })?;

    let mut binds = Vec::with_capacity(skin.joints.len());
    for (position, (&joint, bone)) in skin.joints.iter().zip(&skin.joint_bones).enumerate() {
        let record = skeletons
            .get(bone.skeleton.index())
            .and_then(|owner| owner.bones().get(bone.bone))
            .ok_or(ResolveError::UnmappedJoint {
                skin: skin.index,
                node: joint,
            })?;
        let target = match mode {
            BindMode::BoneIndex => BindTarget::Index(bone.bone),
            BindMode::BoneName => BindTarget::Name(record.name().to_owned()),
        };
        let inverse = skin
            .inverse_binds
            .as_ref()
            .and_then(|binds| binds.get(position).copied())
            .unwrap_or_default();
        binds.push(Bind {
            joint,
            target,
            inverse,
        });
    }

    Ok(SkinBinding {
        skin: skin.index,
        skeleton,
        binds,
        canonical: skin.index,
    })
}
