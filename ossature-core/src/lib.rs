//! Ossature core library.
//!
//! Turns the skins of a scene document into well-formed skeletons. Each skin's
//! declared joints are expanded with the intermediate nodes that connect them,
//! multi-rooted skins are climbed onto sibling roots, and overlapping or
//! adjacent skins are merged into shared skeletons with deterministic roots
//! and bone order.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod binding;
mod disjoint_set;
mod error;
mod forest;
mod node;
mod resolver;
mod scene;
mod skeleton;
mod skin;

#[cfg(test)]
mod test_utils;

pub use crate::{
    binding::{Bind, BindMode, BindTarget, SkinBinding},
    disjoint_set::DisjointSet,
    error::{ResolveError, ResolveErrorCode, Result},
    forest::NodeForest,
    node::{JointFlag, Node, NodeId},
    resolver::{Resolution, Resolver, ResolverBuilder},
    scene::{BindMatrix, NodeDesc, SceneDesc, SkinDesc},
    skeleton::{Bone, BoneRef, Skeleton, SkeletonId},
    skin::Skin,
};
