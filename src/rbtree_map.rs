use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::vec::Vec;

use crate::raw::{Handle, RawRBTreeMap};

mod capacity;
mod cursor;
mod hooks;
mod order_statistic;

pub use crate::Rank;
pub use cursor::{Cursor, CursorId, CursorMut};

/// An ordered multimap based on a [red-black tree].
///
/// Entries are kept sorted by key according to [`Ord`]. Unlike
/// `BTreeMap`, a key may occur any number of times: [`put`] always adds a
/// new entry, and entries with equal keys stay in the order they were put.
/// Lookups and removals by key address the first such entry.
///
/// Besides ordinary iteration, a map hands out any number of independent
/// *cursors* (see [`CursorId`]). A cursor is either off or sits on one
/// entry, and removing that entry, through any API, moves the cursor to
/// the entry that followed it. A cursor never refers to an entry that is
/// no longer in the map.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rb_cursor_map::RBTreeMap;
///
/// let mut readings = RBTreeMap::new();
/// readings.put("kitchen", 21);
/// readings.put("attic", 27);
/// readings.put("kitchen", 22);
///
/// assert_eq!(readings.len(), 3);
/// assert_eq!(readings.occurrences("kitchen"), 2);
/// assert_eq!(readings.get("kitchen"), Some(&21));
///
/// let ordered: Vec<_> = readings.iter().map(|(room, t)| (*room, *t)).collect();
/// assert_eq!(ordered, [("attic", 27), ("kitchen", 21), ("kitchen", 22)]);
/// ```
///
/// Walking and editing with a cursor:
///
/// ```
/// use rb_cursor_map::{CursorId, RBTreeMap};
///
/// let mut map = RBTreeMap::from([(1, "one"), (2, "two"), (3, "three")]);
///
/// let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
/// cursor.start();
/// cursor.forth();
/// assert_eq!(cursor.key_at(), &2);
///
/// // Removing under the cursor moves it to what came next.
/// assert_eq!(cursor.remove(), (2, "two"));
/// assert_eq!(cursor.key_at(), &3);
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
/// [`put`]: RBTreeMap::put
pub struct RBTreeMap<K, V> {
    raw: RawRBTreeMap<K, V>,
}

/// An iterator over the entries of an `RBTreeMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeMap`].
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    raw: &'a RawRBTreeMap<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// A mutable iterator over the entries of an `RBTreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`RBTreeMap`].
///
/// [`iter_mut`]: RBTreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: alloc::vec::IntoIter<(&'a K, &'a mut V)>,
}

/// An owning iterator over the entries of an `RBTreeMap`, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of an `RBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`RBTreeMap`].
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`RBTreeMap`].
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`RBTreeMap`].
///
/// [`values_mut`]: RBTreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap`.
    ///
    /// The map starts with its built-in cursor, off.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.put(1, "a");
    /// assert!(!map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> RBTreeMap<K, V> {
        RBTreeMap {
            raw: RawRBTreeMap::new(),
        }
    }

    /// Returns the number of entries in the map, counting every occurrence
    /// of a repeated key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.put(1, "a");
    /// a.put(1, "b");
    /// assert_eq!(a.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf; zero for an empty map.
    ///
    /// The red-black invariants bound this by `2 * log2(len + 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, ()> = [4, 2, 6, 1, 3, 5, 7].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(map.height(), 3);
    /// assert_eq!(RBTreeMap::<i32, ()>::new().height(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Clears the map, removing all entries. Every cursor is moved off.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.put(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first entry in the map, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.put(1, "b");
    /// map.put(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((&node.key, &node.value))
    }

    /// Returns the last entry in the map, if any.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((&node.key, &node.value))
    }

    /// Removes and returns the first entry in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(map.pop_first(), Some((1, 'a')));
    /// assert_eq!(map.pop_first(), Some((2, 'b')));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.first()?;
        let (key, value, _) = self.raw.remove(first);
        Some((key, value))
    }

    /// Removes and returns the last entry in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.last()?;
        let (key, value, _) = self.raw.remove(last);
        Some((key, value))
    }

    /// Retains only the entries specified by the predicate, visiting them in
    /// order. Cursors on removed entries advance as with any removal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut current = self.raw.first();
        while let Some(handle) = current {
            let (key, value) = self.raw.entry_mut(handle);
            current = if f(key, value) {
                self.raw.successor(handle)
            } else {
                self.raw.remove(handle).2
            };
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([("a", 1), ("b", 2)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.get("b"), Some(&12));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.entries_mut().into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, String::from("hello")), (2, String::from("goodbye"))]);
    /// for value in map.values_mut() {
    ///     value.push('!');
    /// }
    /// let values: Vec<String> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello!", "goodbye!"]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }
}

impl<K: Clone, V: Clone> RBTreeMap<K, V> {
    /// Copies every key into a vector, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, 'b'), (1, 'a'), (2, 'c')]);
    /// assert_eq!(map.keys_to_vec(), [1, 2, 2]);
    /// assert_eq!(map.values_to_vec(), ['a', 'b', 'c']);
    /// ```
    #[must_use]
    pub fn keys_to_vec(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    /// Copies every value into a vector, in order by key.
    #[must_use]
    pub fn values_to_vec(&self) -> Vec<V> {
        self.values().cloned().collect()
    }
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Builds a map by putting `keys[i]` with `values[i]`, in slice order.
    /// Repeated keys become repeated entries.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from_slices(&[3, 1, 3], &["c", "a", "C"]);
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.values_to_vec(), ["a", "c", "C"]);
    /// ```
    #[must_use]
    pub fn from_slices(keys: &[K], values: &[V]) -> Self
    where
        K: Clone,
        V: Clone,
    {
        assert_eq!(
            keys.len(),
            values.len(),
            "`RBTreeMap::from_slices()` - `keys` and `values` differ in length!"
        );
        let mut map = RBTreeMap::with_capacity(keys.len());
        for (key, value) in keys.iter().zip(values) {
            map.put(key.clone(), value.clone());
        }
        map
    }

    /// Adds an entry. An existing equal key is kept; the new entry is placed
    /// after every entry with an equal key.
    ///
    /// Use [`contains_key`] first for unique-key behaviour.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.put(10, "first");
    /// map.put(10, "second");
    /// assert_eq!(map.occurrences(&10), 2);
    /// assert_eq!(map.get(&10), Some(&"first"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// [`contains_key`]: RBTreeMap::contains_key
    pub fn put(&mut self, key: K, value: V) {
        self.raw.insert(key, value);
    }

    /// Returns a reference to the value of the first entry with this key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|h| &self.raw.node(h).value)
    }

    /// Returns the key and value of the first entry with this key.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.raw.node(self.raw.find(key)?);
        Some((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value of the first entry with this key.
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(key)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Returns `true` if the map contains at least one entry with this key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns how many entries have a key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, ()), (2, ()), (2, ()), (3, ())]);
    /// assert_eq!(map.occurrences(&2), 2);
    /// assert_eq!(map.occurrences(&4), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn occurrences<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.occurrences(key)
    }

    /// Removes the first entry with this key, returning its value.
    ///
    /// Other entries with the same key stay. Cursors on the removed entry
    /// move to the entry that followed it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, "a"), (1, "b")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), Some("b"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + c), where c is the number of cursors.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the first entry with this key, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(key)?;
        let (key, value, _) = self.raw.remove(handle);
        Some((key, value))
    }
}

impl<K: Clone, V: Clone> Clone for RBTreeMap<K, V> {
    /// Copies every entry. The copy has only its built-in cursor, off.
    fn clone(&self) -> Self {
        RBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for RBTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RBTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for RBTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for RBTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for RBTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RBTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for RBTreeMap<K, V> {
    fn default() -> Self {
        RBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for RBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RBTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut RBTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for RBTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for RBTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value of the first entry with this key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw;
        let handle = self.front?;
        self.front = raw.successor(handle);
        self.remaining -= 1;
        let node = raw.node(handle);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw;
        let handle = self.back?;
        self.back = raw.predecessor(handle);
        self.remaining -= 1;
        let node = raw.node(handle);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `rbtree_map::IntoIter`.
    ///
    /// ```
    /// # use rb_cursor_map::rbtree_map;
    /// let iter: rbtree_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("len", &self.inner.len()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn iter_meets_in_the_middle() {
        let map: RBTreeMap<i32, i32> = (0..5).map(|k| (k, k)).collect();
        let mut iter = map.iter();
        assert_eq!(iter.next(), Some((&0, &0)));
        assert_eq!(iter.next_back(), Some((&4, &4)));
        assert_eq!(iter.len(), 3);
        let rest: Vec<i32> = iter.map(|(k, _)| *k).collect();
        assert_eq!(rest, vec![1, 2, 3]);
    }

    #[test]
    fn retain_keeps_cursor_valid() {
        let mut map: RBTreeMap<i32, ()> = (0..10).map(|k| (k, ())).collect();
        let id = map.new_cursor();
        map.cursor_mut(id).go(4);

        map.retain(|&k, ()| k % 3 == 0);
        // 4 and 5 went away, so the cursor landed on 6.
        assert_eq!(map.cursor(id).key_at(), &6);
        assert_eq!(map.keys_to_vec(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn pop_last_drains_in_reverse() {
        let mut map = RBTreeMap::from([(1, 'a'), (3, 'c'), (2, 'b')]);
        let mut drained = Vec::new();
        while let Some(entry) = map.pop_last() {
            drained.push(entry);
        }
        assert_eq!(drained, vec![(3, 'c'), (2, 'b'), (1, 'a')]);
        assert!(map.is_empty());
    }
}
