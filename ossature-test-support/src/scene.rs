//! Seeded generators for synthetic scenes.
//!
//! Scenes are described with raw indices only, so the fixtures can feed both
//! the core property suites and the benchmarks without depending on the core
//! crate. Every skin draws its joints from the subtree of one anchor node,
//! which keeps the generated documents resolvable.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

/// Size limits for a generated scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneShape {
    /// Number of nodes, at least one.
    pub nodes: usize,
    /// Maximum number of parentless nodes.
    pub max_trees: usize,
    /// Number of skins.
    pub skins: usize,
    /// Maximum number of joints per skin.
    pub max_joints: usize,
}

impl Default for SceneShape {
    fn default() -> Self {
        Self {
            nodes: 24,
            max_trees: 3,
            skins: 4,
            max_joints: 6,
        }
    }
}

/// A generated scene: a parent per node and the joint list of every skin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneFixture {
    /// `parents[i]` is the parent of node `i`.
    pub parents: Vec<Option<usize>>,
    /// Joint node indices per skin, in declaration order.
    pub skins: Vec<Vec<usize>>,
}

impl SceneFixture {
    /// Generates a scene from `seed`; equal seeds give equal scenes.
    ///
    /// # Examples
    /// ```
    /// use ossature_test_support::scene::{SceneFixture, SceneShape};
    ///
    /// let shape = SceneShape::default();
    /// let scene = SceneFixture::generate(7, &shape);
    /// assert_eq!(scene, SceneFixture::generate(7, &shape));
    /// assert_eq!(scene.parents.len(), shape.nodes);
    /// assert_eq!(scene.skins.len(), shape.skins);
    /// ```
    #[must_use]
    pub fn generate(seed: u64, shape: &SceneShape) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let parents = random_parents(&mut rng, shape.nodes.max(1), shape.max_trees.max(1));
        let children = child_lists(&parents);
        let skins = (0..shape.skins)
            .map(|_| random_skin(&mut rng, &children, shape.max_joints.max(1)))
            .collect();
        Self { parents, skins }
    }

    /// Child lists derived from [`Self::parents`], ascending.
    #[must_use]
    pub fn children(&self) -> Vec<Vec<usize>> {
        child_lists(&self.parents)
    }

    /// The same scene with the skin list reversed.
    #[must_use]
    pub fn with_reversed_skins(&self) -> Self {
        let mut reversed = self.clone();
        reversed.skins.reverse();
        reversed
    }
}

/// Builds a forest in topological order, then relabels the nodes with a
/// random permutation so ids carry no structural meaning.
fn random_parents(rng: &mut SmallRng, nodes: usize, max_trees: usize) -> Vec<Option<usize>> {
    let trees = rng.gen_range(1..=max_trees.min(nodes));
    let ordered: Vec<Option<usize>> = (0..nodes)
        .map(|node| (node >= trees).then(|| rng.gen_range(0..node)))
        .collect();

    let mut label: Vec<usize> = (0..nodes).collect();
    label.shuffle(rng);
    let mut parents = vec![None; nodes];
    for (node, parent) in ordered.into_iter().enumerate() {
        parents[label[node]] = parent.map(|parent| label[parent]);
    }
    parents
}

fn child_lists(parents: &[Option<usize>]) -> Vec<Vec<usize>> {
    let mut children = vec![Vec::new(); parents.len()];
    for (child, parent) in parents.iter().enumerate() {
        if let Some(list) = parent.and_then(|parent| children.get_mut(parent)) {
            list.push(child);
        }
    }
    children
}

fn random_skin(rng: &mut SmallRng, children: &[Vec<usize>], max_joints: usize) -> Vec<usize> {
    let anchor = rng.gen_range(0..children.len());
    let mut subtree = vec![anchor];
    let mut cursor = 0;
    while let Some(&node) = subtree.get(cursor) {
        subtree.extend(children[node].iter().copied());
        cursor += 1;
    }
    let count = rng.gen_range(1..=max_joints.min(subtree.len()));
    subtree.choose_multiple(rng, count).copied().collect()
}
