//! Independent re-check of an expanded skin.

use tracing::instrument;

use super::Skin;
use crate::{
    error::{ResolveError, Result},
    forest::NodeForest,
};

/// Recomputes the roots of `skin` from its node set and checks them against
/// the roots recorded by expansion.
///
/// A mismatch is an internal failure; roots of a multi-rooted skin that do
/// not share a parent are malformed input.
#[instrument(
    name = "skin.verify",
    err,
    skip(forest, skin),
    fields(skin = skin.index, roots = skin.roots.len()),
)]
pub(crate) fn verify_skin(forest: &NodeForest, skin: &Skin) -> Result<()> {
    let found = forest.subtree_roots(&skin.nodes());
    if found != skin.roots {
        return Err(ResolveError::RootMismatch {
            skin: skin.index,
            expected: skin.roots.clone(),
            found,
        });
    }
    if skin.roots.len() > 1 && !forest.share_parent(&skin.roots) {
        return Err(ResolveError::SkinRootsNotSiblings {
            skin: skin.index,
            roots: skin.roots.clone(),
        });
    }
    Ok(())
}
