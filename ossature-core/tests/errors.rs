mod common;

use common::{SIBLING_CHAINS, resolve, scene};
use ossature_core::{
    BindMatrix, NodeDesc, NodeId, ResolveError, ResolveErrorCode, ResolverBuilder, SceneDesc,
    SkeletonId, SkinDesc,
};
use rstest::rstest;

#[rstest]
#[case(
    ResolveError::ChildOutOfBounds { parent: NodeId::new(0), child: 9, node_count: 2 },
    ResolveErrorCode::ChildOutOfBounds,
    "FOREST_CHILD_OUT_OF_BOUNDS",
)]
#[case(
    ResolveError::MultipleParents {
        node: NodeId::new(2),
        first: NodeId::new(0),
        second: NodeId::new(1),
    },
    ResolveErrorCode::MultipleParents,
    "FOREST_MULTIPLE_PARENTS",
)]
#[case(
    ResolveError::DuplicateChild { parent: NodeId::new(0), child: NodeId::new(1) },
    ResolveErrorCode::DuplicateChild,
    "FOREST_DUPLICATE_CHILD",
)]
#[case(
    ResolveError::ParentCycle { node: NodeId::new(0) },
    ResolveErrorCode::ParentCycle,
    "FOREST_PARENT_CYCLE",
)]
#[case(ResolveError::EmptySkin { skin: 0 }, ResolveErrorCode::EmptySkin, "SKIN_EMPTY")]
#[case(
    ResolveError::JointOutOfBounds { skin: 0, joint: 1, node: 7, node_count: 3 },
    ResolveErrorCode::JointOutOfBounds,
    "SKIN_JOINT_OUT_OF_BOUNDS",
)]
#[case(
    ResolveError::BindCountMismatch { skin: 0, binds: 1, joints: 2 },
    ResolveErrorCode::BindCountMismatch,
    "SKIN_BIND_COUNT_MISMATCH",
)]
#[case(
    ResolveError::DisconnectedRoots { skin: 1, node: NodeId::new(0) },
    ResolveErrorCode::DisconnectedRoots,
    "SKIN_DISCONNECTED_ROOTS",
)]
#[case(
    ResolveError::RootMismatch { skin: 0, expected: vec![], found: vec![NodeId::new(1)] },
    ResolveErrorCode::RootMismatch,
    "SKIN_ROOT_MISMATCH",
)]
#[case(
    ResolveError::SkinRootsNotSiblings { skin: 0, roots: vec![NodeId::new(1), NodeId::new(3)] },
    ResolveErrorCode::SkinRootsNotSiblings,
    "SKIN_ROOTS_NOT_SIBLINGS",
)]
#[case(
    ResolveError::SkeletonWithoutRoots { skeleton: SkeletonId::new(0) },
    ResolveErrorCode::SkeletonWithoutRoots,
    "SKELETON_WITHOUT_ROOTS",
)]
#[case(
    ResolveError::SkeletonRootsNotSiblings {
        skeleton: SkeletonId::new(0),
        roots: vec![NodeId::new(1), NodeId::new(3)],
    },
    ResolveErrorCode::SkeletonRootsNotSiblings,
    "SKELETON_ROOTS_NOT_SIBLINGS",
)]
#[case(
    ResolveError::NodeInTwoSkeletons {
        node: NodeId::new(1),
        existing: SkeletonId::new(0),
        skeleton: SkeletonId::new(1),
    },
    ResolveErrorCode::NodeInTwoSkeletons,
    "SKELETON_NODE_REASSIGNED",
)]
#[case(
    ResolveError::SkinSpansSkeletons {
        skin: 0,
        first: SkeletonId::new(0),
        second: SkeletonId::new(1),
    },
    ResolveErrorCode::SkinSpansSkeletons,
    "SKELETON_SKIN_SPLIT",
)]
#[case(
    ResolveError::UnmappedJoint { skin: 0, node: NodeId::new(4) },
    ResolveErrorCode::UnmappedJoint,
    "SKELETON_UNMAPPED_JOINT",
)]
#[case(
    ResolveError::SkinUnassigned { skin: 2 },
    ResolveErrorCode::SkinUnassigned,
    "SKELETON_SKIN_UNASSIGNED",
)]
#[case(
    ResolveError::InvalidBoneName { name: String::new() },
    ResolveErrorCode::InvalidBoneName,
    "CONFIG_INVALID_BONE_NAME",
)]
fn returns_expected_resolve_code(
    #[case] error: ResolveError,
    #[case] expected: ResolveErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(error.code().to_string(), text);
}

#[rstest]
#[case(ResolveError::RootMismatch { skin: 0, expected: vec![], found: vec![] }, true)]
#[case(
    ResolveError::NodeInTwoSkeletons {
        node: NodeId::new(1),
        existing: SkeletonId::new(0),
        skeleton: SkeletonId::new(1),
    },
    true,
)]
#[case(
    ResolveError::SkinSpansSkeletons {
        skin: 0,
        first: SkeletonId::new(0),
        second: SkeletonId::new(1),
    },
    true,
)]
#[case(ResolveError::UnmappedJoint { skin: 0, node: NodeId::new(1) }, true)]
#[case(ResolveError::SkinUnassigned { skin: 0 }, true)]
#[case(ResolveError::EmptySkin { skin: 0 }, false)]
#[case(ResolveError::DisconnectedRoots { skin: 0, node: NodeId::new(0) }, false)]
#[case(ResolveError::ParentCycle { node: NodeId::new(0) }, false)]
fn separates_internal_failures_from_bad_input(#[case] error: ResolveError, #[case] internal: bool) {
    assert_eq!(error.is_internal(), internal);
}

#[test]
fn out_of_range_child_is_rejected() {
    let nodes = vec![NodeDesc::new().with_children([5]), NodeDesc::new()];
    let err = resolve(&SceneDesc::new(nodes, vec![])).expect_err("child 5 does not exist");
    assert_eq!(
        err,
        ResolveError::ChildOutOfBounds {
            parent: NodeId::new(0),
            child: 5,
            node_count: 2,
        }
    );
}

#[test]
fn node_with_two_parents_is_rejected() {
    let nodes = vec![
        NodeDesc::new().with_children([2]),
        NodeDesc::new().with_children([2]),
        NodeDesc::new(),
    ];
    let err = resolve(&SceneDesc::new(nodes, vec![])).expect_err("node 2 has two parents");
    assert_eq!(err.code(), ResolveErrorCode::MultipleParents);
}

#[test]
fn repeated_child_is_rejected() {
    let nodes = vec![NodeDesc::new().with_children([1, 1]), NodeDesc::new()];
    let err = resolve(&SceneDesc::new(nodes, vec![])).expect_err("child listed twice");
    assert_eq!(
        err,
        ResolveError::DuplicateChild {
            parent: NodeId::new(0),
            child: NodeId::new(1),
        }
    );
}

#[test]
fn parent_cycle_is_rejected() {
    let nodes = vec![
        NodeDesc::new(),
        NodeDesc::new().with_children([2]),
        NodeDesc::new().with_children([1]),
    ];
    let err = resolve(&SceneDesc::new(nodes, vec![])).expect_err("1 and 2 form a cycle");
    assert_eq!(err.code(), ResolveErrorCode::ParentCycle);
    assert!(!err.is_internal());
}

#[rstest]
#[case::empty(SkinDesc::new(Vec::<usize>::new()), ResolveError::EmptySkin { skin: 0 })]
#[case::out_of_range(
    SkinDesc::new([1, 7]),
    ResolveError::JointOutOfBounds { skin: 0, joint: 1, node: 7, node_count: 3 },
)]
#[case::bind_count(
    SkinDesc::new([1, 2]).with_inverse_binds(vec![BindMatrix::IDENTITY]),
    ResolveError::BindCountMismatch { skin: 0, binds: 1, joints: 2 },
)]
fn malformed_skins_are_rejected(#[case] skin: SkinDesc, #[case] expected: ResolveError) {
    let nodes = SceneDesc::nodes_from_parents(&[None, Some(0), Some(1)]);
    let err = resolve(&SceneDesc::new(nodes, vec![skin])).expect_err("skin is malformed");
    assert_eq!(err, expected);
}

#[test]
fn failing_skin_is_reported_by_its_index() {
    let mut chains = scene(&SIBLING_CHAINS, &[&[1, 3], &[2, 6]]);
    chains.skins[1].inverse_binds = Some(vec![BindMatrix::IDENTITY]);
    let err = resolve(&chains).expect_err("second skin is short of binds");
    assert_eq!(
        err,
        ResolveError::BindCountMismatch {
            skin: 1,
            binds: 1,
            joints: 2,
        }
    );
}

#[test]
fn blank_default_bone_name_fails_before_resolution() {
    let err = ResolverBuilder::new()
        .with_default_bone_name(" \t ")
        .build()
        .map(|_| ())
        .expect_err("sanitised name is blank");
    assert_eq!(err.code(), ResolveErrorCode::InvalidBoneName);
}
