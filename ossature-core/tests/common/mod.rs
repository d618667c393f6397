use ossature_core::{Resolution, ResolveError, ResolverBuilder, SceneDesc, SkinDesc};

/// Builds a scene from a parent list and one joint list per skin.
#[must_use]
pub fn scene(parents: &[Option<usize>], skins: &[&[usize]]) -> SceneDesc {
    SceneDesc::new(
        SceneDesc::nodes_from_parents(parents),
        skins
            .iter()
            .map(|joints| SkinDesc::new(joints.iter().copied()))
            .collect(),
    )
}

/// Resolves `scene` with the default configuration.
pub fn resolve(scene: &SceneDesc) -> Result<Resolution, ResolveError> {
    ResolverBuilder::new()
        .build()
        .expect("default configuration is valid")
        .resolve(scene)
}

/// Two joint chains under a shared non-joint parent:
/// `0 -> {1 -> 3 -> 4 -> 5, 2 -> 6 -> 7 -> 8}`.
pub const SIBLING_CHAINS: [Option<usize>; 9] = [
    None,
    Some(0),
    Some(0),
    Some(1),
    Some(3),
    Some(4),
    Some(2),
    Some(6),
    Some(7),
];
