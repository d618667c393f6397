//! Error types for the ossature core library.
//!
//! Every failure aborts resolution of the whole document. Variants carry the
//! skin, skeleton, or node that triggered them, and each maps to a stable
//! [`ResolveErrorCode`] for logs and diagnostics.

use std::fmt;

use thiserror::Error;

use crate::{node::NodeId, skeleton::SkeletonId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while resolving skins into skeletons.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ResolveError {
    /// A node listed a child index outside the node table.
    #[error("node {parent} lists child {child}, but the scene only has {node_count} nodes")]
    ChildOutOfBounds {
        /// Node whose child list is invalid.
        parent: NodeId,
        /// Offending raw child index.
        child: usize,
        /// Number of nodes in the scene.
        node_count: usize,
    },
    /// A node appeared in the child lists of two different parents.
    #[error("node {node} is a child of both {first} and {second}")]
    MultipleParents {
        /// Node claimed by two parents.
        node: NodeId,
        /// Parent that claimed the node first.
        first: NodeId,
        /// Parent that claimed the node second.
        second: NodeId,
    },
    /// A node listed the same child more than once.
    #[error("node {parent} lists child {child} more than once")]
    DuplicateChild {
        /// Node with the repeated child entry.
        parent: NodeId,
        /// Repeated child.
        child: NodeId,
    },
    /// A node is not reachable from any parentless node.
    #[error("node {node} is part of a parent cycle")]
    ParentCycle {
        /// First node found on the cycle.
        node: NodeId,
    },
    /// A skin declared no joints.
    #[error("skin {skin} declares no joints")]
    EmptySkin {
        /// Index of the skin in declaration order.
        skin: usize,
    },
    /// A skin referenced a joint outside the node table.
    #[error("skin {skin} joint {joint} references node {node}, but the scene only has {node_count} nodes")]
    JointOutOfBounds {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Position of the joint in the skin's joint list.
        joint: usize,
        /// Offending raw node index.
        node: usize,
        /// Number of nodes in the scene.
        node_count: usize,
    },
    /// A skin supplied a different number of bind matrices than joints.
    #[error("skin {skin} has {binds} inverse bind matrices for {joints} joints")]
    BindCountMismatch {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Number of bind matrices supplied.
        binds: usize,
        /// Number of declared joints.
        joints: usize,
    },
    /// Climbing the roots of a multi-rooted skin had to continue past a
    /// top-level node before the roots converged on a common parent.
    #[error("skin {skin} roots never share a parent; climb cannot pass top-level node {node}")]
    DisconnectedRoots {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Top-level node the climb reached.
        node: NodeId,
    },
    /// Recomputed skin roots disagree with the roots produced by expansion.
    #[error("skin {skin} roots {found:?} do not match expanded roots {expected:?}")]
    RootMismatch {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Roots recorded by expansion.
        expected: Vec<NodeId>,
        /// Roots recomputed from the skin's node set.
        found: Vec<NodeId>,
    },
    /// A multi-rooted skin's roots do not share one parent.
    #[error("skin {skin} roots {roots:?} do not share a parent")]
    SkinRootsNotSiblings {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Sorted roots of the skin.
        roots: Vec<NodeId>,
    },
    /// A skeleton's node set produced no roots.
    #[error("skeleton {skeleton} has no roots")]
    SkeletonWithoutRoots {
        /// Skeleton without roots.
        skeleton: SkeletonId,
    },
    /// A multi-rooted skeleton's roots do not share one parent.
    #[error("skeleton {skeleton} roots {roots:?} do not share a parent")]
    SkeletonRootsNotSiblings {
        /// Offending skeleton.
        skeleton: SkeletonId,
        /// Sorted roots of the skeleton.
        roots: Vec<NodeId>,
    },
    /// A node was placed into two skeletons.
    #[error("node {node} already belongs to skeleton {existing}, cannot join {skeleton}")]
    NodeInTwoSkeletons {
        /// Node assigned twice.
        node: NodeId,
        /// Skeleton that owns the node.
        existing: SkeletonId,
        /// Skeleton that attempted to claim the node.
        skeleton: SkeletonId,
    },
    /// A skin's nodes did not all land in one skeleton.
    #[error("skin {skin} spans skeletons {first} and {second}")]
    SkinSpansSkeletons {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Skeleton of the skin's first node.
        first: SkeletonId,
        /// Another skeleton holding one of the skin's nodes.
        second: SkeletonId,
    },
    /// A declared joint has no bone in its skin's skeleton.
    #[error("skin {skin} joint node {node} has no bone in its skeleton")]
    UnmappedJoint {
        /// Index of the skin in declaration order.
        skin: usize,
        /// Joint without a bone.
        node: NodeId,
    },
    /// A skin was left without a skeleton after the merge.
    #[error("skin {skin} was not assigned to a skeleton")]
    SkinUnassigned {
        /// Index of the skin in declaration order.
        skin: usize,
    },
    /// A configured bone name was empty once sanitised.
    #[error("default bone name `{name}` is empty after sanitising")]
    InvalidBoneName {
        /// Name supplied to the builder.
        name: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ResolveError`] variants.
    enum ResolveErrorCode for ResolveError {
        /// A node listed a child index outside the node table.
        ChildOutOfBounds => ChildOutOfBounds { .. } => "FOREST_CHILD_OUT_OF_BOUNDS",
        /// A node appeared in the child lists of two different parents.
        MultipleParents => MultipleParents { .. } => "FOREST_MULTIPLE_PARENTS",
        /// A node listed the same child more than once.
        DuplicateChild => DuplicateChild { .. } => "FOREST_DUPLICATE_CHILD",
        /// A node is not reachable from any parentless node.
        ParentCycle => ParentCycle { .. } => "FOREST_PARENT_CYCLE",
        /// A skin declared no joints.
        EmptySkin => EmptySkin { .. } => "SKIN_EMPTY",
        /// A skin referenced a joint outside the node table.
        JointOutOfBounds => JointOutOfBounds { .. } => "SKIN_JOINT_OUT_OF_BOUNDS",
        /// A skin supplied a different number of bind matrices than joints.
        BindCountMismatch => BindCountMismatch { .. } => "SKIN_BIND_COUNT_MISMATCH",
        /// Multi-root climb had to continue past a top-level node.
        DisconnectedRoots => DisconnectedRoots { .. } => "SKIN_DISCONNECTED_ROOTS",
        /// Recomputed skin roots disagree with the expanded roots.
        RootMismatch => RootMismatch { .. } => "SKIN_ROOT_MISMATCH",
        /// A multi-rooted skin's roots do not share one parent.
        SkinRootsNotSiblings => SkinRootsNotSiblings { .. } => "SKIN_ROOTS_NOT_SIBLINGS",
        /// A skeleton's node set produced no roots.
        SkeletonWithoutRoots => SkeletonWithoutRoots { .. } => "SKELETON_WITHOUT_ROOTS",
        /// A multi-rooted skeleton's roots do not share one parent.
        SkeletonRootsNotSiblings => SkeletonRootsNotSiblings { .. } => "SKELETON_ROOTS_NOT_SIBLINGS",
        /// A node was placed into two skeletons.
        NodeInTwoSkeletons => NodeInTwoSkeletons { .. } => "SKELETON_NODE_REASSIGNED",
        /// A skin's nodes did not all land in one skeleton.
        SkinSpansSkeletons => SkinSpansSkeletons { .. } => "SKELETON_SKIN_SPLIT",
        /// A declared joint has no bone in its skin's skeleton.
        UnmappedJoint => UnmappedJoint { .. } => "SKELETON_UNMAPPED_JOINT",
        /// A skin was left without a skeleton after the merge.
        SkinUnassigned => SkinUnassigned { .. } => "SKELETON_SKIN_UNASSIGNED",
        /// A configured bone name was empty once sanitised.
        InvalidBoneName => InvalidBoneName { .. } => "CONFIG_INVALID_BONE_NAME",
    }
}

impl ResolveError {
    /// Returns `true` when the error signals a resolver bug rather than bad
    /// input.
    ///
    /// Internal failures abort resolution exactly like malformed input, but
    /// are flagged separately in diagnostics.
    ///
    /// # Examples
    /// ```
    /// use ossature_core::{NodeId, ResolveError};
    ///
    /// let mismatch = ResolveError::RootMismatch {
    ///     skin: 0,
    ///     expected: vec![NodeId::new(1)],
    ///     found: vec![NodeId::new(2)],
    /// };
    /// assert!(mismatch.is_internal());
    /// assert!(!ResolveError::EmptySkin { skin: 0 }.is_internal());
    /// ```
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::RootMismatch { .. }
                | Self::NodeInTwoSkeletons { .. }
                | Self::SkinSpansSkeletons { .. }
                | Self::UnmappedJoint { .. }
                | Self::SkinUnassigned { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ResolveError>;
