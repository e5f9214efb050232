use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::RBTreeMap;
use crate::Rank;

impl<K, V> RBTreeMap<K, V> {
    /// Returns the entry at position `rank` in key order.
    ///
    /// Entries with equal keys each have their own rank, in the order they
    /// were put. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.put("a", 10);
    /// map.put("c", 30);
    /// map.put("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.select(rank)?);
        Some((&node.key, &node.value))
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in key order.
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.entry_mut(handle))
    }
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Returns the rank of the first entry with this key, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, "a"), (20, "b"), (20, "c")]);
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&20), Some(1));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|_| self.raw.count_before(key, false))
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rb_cursor_map::{RBTreeMap, Rank};
///
/// let map = RBTreeMap::from([("b", 2), ("a", 1)]);
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for RBTreeMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K, V> IndexMut<Rank> for RBTreeMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
