//! Union-find (disjoint set union) over arbitrary copyable keys.
//!
//! Keys are mapped to dense slots on insertion; parent links and ranks live in
//! flat vectors indexed by slot. `find` compresses paths iteratively and
//! `union` attaches the lower-ranked root beneath the higher-ranked one.
//!
//! One instance is built per resolution pass and dropped afterwards. Calling
//! [`DisjointSet::union`] with a key that was never inserted is a caller bug:
//! debug builds panic, release builds ignore the call without touching other
//! groups.

use std::collections::HashMap;
use std::hash::Hash;

/// Disjoint-set forest keyed by `K`.
///
/// # Examples
/// ```
/// use ossature_core::DisjointSet;
///
/// let mut set = DisjointSet::new();
/// for key in [10, 20, 30] {
///     set.insert(key);
/// }
/// set.union(10, 30);
///
/// assert_eq!(set.group_count(), 2);
/// assert!(set.same_group(30, 10));
/// assert!(!set.same_group(20, 10));
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet<K> {
    slots: HashMap<K, usize>,
    keys: Vec<K>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<K> Default for DisjointSet<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            keys: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
        }
    }
}

impl<K> DisjointSet<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        }
    }

    /// Number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` when no key has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` when `key` has been inserted.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    /// Adds `key` as a singleton group. Inserting an existing key is a no-op.
    pub fn insert(&mut self, key: K) {
        if self.slots.contains_key(&key) {
            return;
        }
        let slot = self.keys.len();
        self.slots.insert(key, slot);
        self.keys.push(key);
        self.parent.push(slot);
        self.rank.push(0);
    }

    /// Merges the groups containing `left` and `right`.
    ///
    /// # Panics
    /// Panics in debug builds when either key was never inserted.
    pub fn union(&mut self, left: K, right: K) {
        let (Some(left), Some(right)) = (
            self.slots.get(&left).copied(),
            self.slots.get(&right).copied(),
        ) else {
            debug_assert!(false, "union called with a key that was never inserted");
            return;
        };
        let mut left = self.find_slot(left);
        let mut right = self.find_slot(right);
        if left == right {
            return;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
    }

    /// Returns `true` when both keys are present and share a group.
    pub fn same_group(&mut self, left: K, right: K) -> bool {
        match (self.find(left), self.find(right)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Returns the representative of `key`'s group, or `None` when `key` was
    /// never inserted.
    pub(crate) fn find(&mut self, key: K) -> Option<K> {
        let slot = *self.slots.get(&key)?;
        let root = self.find_slot(slot);
        Some(self.keys[root])
    }

    /// One key per group, in the order the representative slots were created.
    ///
    /// Callers needing a stable order across implementations sort the result.
    #[must_use]
    pub fn representatives(&self) -> Vec<K> {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(slot, &parent)| slot == parent)
            .map(|(slot, _)| self.keys[slot])
            .collect()
    }

    /// Number of distinct groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(slot, &parent)| slot == parent)
            .count()
    }

    /// Every key whose representative is `representative`, in insertion
    /// order.
    ///
    /// Returns an empty list when `representative` is not a current
    /// representative.
    pub fn members_of(&mut self, representative: K) -> Vec<K> {
        let Some(&rep_slot) = self.slots.get(&representative) else {
            return Vec::new();
        };
        if self.parent[rep_slot] != rep_slot {
            return Vec::new();
        }
        let mut members = Vec::new();
        for slot in 0..self.keys.len() {
            if self.find_slot(slot) == rep_slot {
                members.push(self.keys[slot]);
            }
        }
        members
    }

    /// All groups as member lists, ordered like [`Self::representatives`].
    pub fn groups(&mut self) -> Vec<Vec<K>> {
        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<K>> = Vec::new();
        for slot in 0..self.keys.len() {
            if self.parent[slot] == slot {
                by_root.insert(slot, groups.len());
                groups.push(Vec::new());
            }
        }
        for slot in 0..self.keys.len() {
            let root = self.find_slot(slot);
            if let Some(&index) = by_root.get(&root) {
                groups[index].push(self.keys[slot]);
            }
        }
        groups
    }

    fn find_slot(&mut self, mut slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[slot] != root {
            let next = self.parent[slot];
            self.parent[slot] = root;
            slot = next;
        }

        root
    }
}
