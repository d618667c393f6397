//! Resolver configuration and the end-to-end resolution pass.
//!
//! [`ResolverBuilder`] validates configuration up front; [`Resolver::resolve`]
//! runs forest construction, skin parsing, per-skin expansion and
//! verification, the skeleton merge, and binding in that order. The first
//! failure aborts the whole document.

#[cfg(feature = "metrics")]
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::{
    binding::{BindMode, SkinBinding, bind_skins},
    error::{ResolveError, Result},
    forest::NodeForest,
    scene::SceneDesc,
    skeleton::{Skeleton, build_skeletons, sanitise_bone_name},
    skin::{Skin, expand_skin, parse_skins, verify_skin},
};

const DEFAULT_BONE_NAME: &str = "bone";

/// Configures and constructs [`Resolver`] instances.
///
/// # Examples
/// ```
/// use ossature_core::{BindMode, ResolverBuilder};
///
/// let resolver = ResolverBuilder::new()
///     .with_bind_mode(BindMode::BoneName)
///     .with_default_bone_name("joint")
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(resolver.bind_mode(), BindMode::BoneName);
/// assert_eq!(resolver.default_bone_name(), "joint");
/// ```
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    bind_mode: BindMode,
    collapse_duplicate_skins: bool,
    default_bone_name: String,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            bind_mode: BindMode::BoneIndex,
            collapse_duplicate_skins: true,
            default_bone_name: DEFAULT_BONE_NAME.to_owned(),
        }
    }
}

impl ResolverBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses whether binds refer to bones by index or by name.
    #[must_use]
    pub const fn with_bind_mode(mut self, mode: BindMode) -> Self {
        self.bind_mode = mode;
        self
    }

    /// Returns the configured bind mode.
    #[must_use]
    pub const fn bind_mode(&self) -> BindMode {
        self.bind_mode
    }

    /// Enables or disables sharing the binding of identical skins.
    ///
    /// # Examples
    /// ```
    /// use ossature_core::ResolverBuilder;
    ///
    /// let builder = ResolverBuilder::new().with_duplicate_skin_collapse(false);
    /// assert!(!builder.collapses_duplicate_skins());
    /// ```
    #[must_use]
    pub const fn with_duplicate_skin_collapse(mut self, enabled: bool) -> Self {
        self.collapse_duplicate_skins = enabled;
        self
    }

    /// Returns `true` when identical skins share one binding.
    #[must_use]
    pub const fn collapses_duplicate_skins(&self) -> bool {
        self.collapse_duplicate_skins
    }

    /// Sets the name given to bones whose node has no usable name.
    #[must_use]
    pub fn with_default_bone_name(mut self, name: impl Into<String>) -> Self {
        self.default_bone_name = name.into();
        self
    }

    /// Returns the configured fallback bone name, as supplied.
    #[must_use]
    pub fn default_bone_name(&self) -> &str {
        &self.default_bone_name
    }

    /// Validates the configuration and constructs a [`Resolver`].
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidBoneName`] when the default bone name is
    /// empty once sanitised.
    ///
    /// # Examples
    /// ```
    /// use ossature_core::{ResolveError, ResolverBuilder};
    ///
    /// let err = ResolverBuilder::new().with_default_bone_name("").build().unwrap_err();
    /// assert!(matches!(err, ResolveError::InvalidBoneName { .. }));
    /// ```
    pub fn build(self) -> Result<Resolver> {
        let default_bone_name = sanitise_bone_name(self.default_bone_name.trim());
        if default_bone_name.is_empty() {
            return Err(ResolveError::InvalidBoneName {
                name: self.default_bone_name,
            });
        }
        Ok(Resolver {
            bind_mode: self.bind_mode,
            collapse_duplicate_skins: self.collapse_duplicate_skins,
            default_bone_name,
        })
    }
}

/// Resolves the skins of a document into skeletons.
///
/// A resolver holds configuration only; every call to [`Resolver::resolve`]
/// builds its own forest, so one resolver can serve many documents.
///
/// # Examples
/// ```
/// use ossature_core::{NodeId, ResolverBuilder, SceneDesc, SkinDesc};
///
/// // 0 -> {1 -> 3 -> 4 -> 5, 2 -> 6 -> 7 -> 8}
/// let parents = [None, Some(0), Some(0), Some(1), Some(3), Some(4), Some(2), Some(6), Some(7)];
/// let scene = SceneDesc::new(
///     SceneDesc::nodes_from_parents(&parents),
///     vec![SkinDesc::new([1, 3, 4, 5]), SkinDesc::new([2, 6, 7, 8])],
/// );
///
/// let resolution = ResolverBuilder::new().build()?.resolve(&scene)?;
/// assert_eq!(resolution.skeletons().len(), 1);
/// assert_eq!(resolution.skeletons()[0].roots(), &[NodeId::new(1), NodeId::new(2)]);
/// assert_eq!(resolution.forest().skeleton(NodeId::new(0)), None);
/// # Ok::<(), ossature_core::ResolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    bind_mode: BindMode,
    collapse_duplicate_skins: bool,
    default_bone_name: String,
}

impl Resolver {
    /// Returns the bind mode used for skin bindings.
    #[must_use]
    pub const fn bind_mode(&self) -> BindMode {
        self.bind_mode
    }

    /// Returns `true` when identical skins share one binding.
    #[must_use]
    pub const fn collapses_duplicate_skins(&self) -> bool {
        self.collapse_duplicate_skins
    }

    /// Sanitised fallback name for unnamed bones.
    #[must_use]
    pub fn default_bone_name(&self) -> &str {
        &self.default_bone_name
    }

    /// Resolves `scene`.
    ///
    /// # Errors
    /// Returns the first [`ResolveError`] raised by any stage. Errors for
    /// which [`ResolveError::is_internal`] holds indicate a resolver bug
    /// rather than malformed input.
    #[instrument(
        name = "core.resolve",
        skip(self, scene),
        fields(nodes = scene.nodes.len(), skins = scene.skins.len()),
    )]
    pub fn resolve(&self, scene: &SceneDesc) -> Result<Resolution> {
        #[cfg(feature = "metrics")]
        let started = Instant::now();

        let outcome = self.run(scene);
        match &outcome {
            Ok(resolution) => {
                info!(
                    skeletons = resolution.skeletons.len(),
                    duplicates = resolution
                        .bindings
                        .iter()
                        .filter(|binding| binding.is_duplicate())
                        .count(),
                    "resolved skins"
                );
                #[cfg(feature = "metrics")]
                record_metrics(resolution, started);
            }
            Err(err) => error!(
                code = %err.code(),
                internal = err.is_internal(),
                error = %err,
                "skin resolution failed"
            ),
        }
        outcome
    }

    fn run(&self, scene: &SceneDesc) -> Result<Resolution> {
        let mut forest = NodeForest::from_descs(&scene.nodes)?;
        let mut skins = parse_skins(&mut forest, &scene.skins)?;
        for skin in &mut skins {
            let expansion = expand_skin(&forest, skin.index, &skin.joints)?;
            skin.apply(expansion);
            verify_skin(&forest, skin)?;
        }
        let skeletons = build_skeletons(&mut forest, &mut skins, &self.default_bone_name)?;
        let bindings = bind_skins(
            &skins,
            &skeletons,
            self.bind_mode,
            self.collapse_duplicate_skins,
        )?;
        Ok(Resolution {
            forest,
            skins,
            skeletons,
            bindings,
        })
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(resolution: &Resolution, started: Instant) {
    let absorbed: usize = resolution
        .skeletons
        .iter()
        .map(|skeleton| skeleton.non_joints().len())
        .sum();
    metrics::counter!("ossature_skins_resolved").increment(resolution.skins.len() as u64);
    metrics::counter!("ossature_skeletons_created").increment(resolution.skeletons.len() as u64);
    metrics::counter!("ossature_non_joints_absorbed").increment(absorbed as u64);
    metrics::histogram!("ossature_resolve_seconds").record(started.elapsed().as_secs_f64());
}

/// Everything produced by one resolution pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    forest: NodeForest,
    skins: Vec<Skin>,
    skeletons: Vec<Skeleton>,
    bindings: Vec<SkinBinding>,
}

impl Resolution {
    /// The node forest with joint flags and skeleton assignments filled in.
    #[must_use]
    pub const fn forest(&self) -> &NodeForest {
        &self.forest
    }

    /// Resolved skins in declaration order.
    #[must_use]
    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    /// Skeletons ordered by their smallest node.
    #[must_use]
    pub fn skeletons(&self) -> &[Skeleton] {
        &self.skeletons
    }

    /// One binding per skin, in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[SkinBinding] {
        &self.bindings
    }
}

#[cfg(test)]
mod property;
