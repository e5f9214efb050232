//! Caller-supplied dispose, equality and clone hooks.
//!
//! `Drop`, `PartialEq` and `Clone` cover the common case. These variants
//! take the operation as a closure for payloads that need something else:
//! handles into an external pool that must be returned, values compared by
//! content rather than identity, or copies that must be made deeply.

use core::borrow::Borrow;

use super::RBTreeMap;

impl<K, V> RBTreeMap<K, V> {
    /// Empties the map, handing every entry to `dispose` in key order.
    /// Every cursor is moved off.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(2, "two"), (1, "one")]);
    /// let mut released = Vec::new();
    /// map.dispose_with(|k, v| released.push((k, v)));
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(released, [(1, "one"), (2, "two")]);
    /// ```
    pub fn dispose_with<F>(&mut self, mut dispose: F)
    where
        F: FnMut(K, V),
    {
        for (key, value) in self.raw.drain_to_vec() {
            dispose(key, value);
        }
    }

    /// Compares two maps entry by entry, in key order, with caller-supplied
    /// predicates. Maps of different lengths are never equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let a = RBTreeMap::from([(1, "Apple"), (2, "Pear")]);
    /// let b = RBTreeMap::from([(1, "apple"), (2, "PEAR")]);
    ///
    /// assert_ne!(a, b);
    /// assert!(a.is_equal_by(&b, |x, y| x == y, |x, y| x.eq_ignore_ascii_case(y)));
    /// ```
    #[must_use]
    pub fn is_equal_by<K2, V2, FK, FV>(&self, other: &RBTreeMap<K2, V2>, mut key_eq: FK, mut value_eq: FV) -> bool
    where
        FK: FnMut(&K, &K2) -> bool,
        FV: FnMut(&V, &V2) -> bool,
    {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((k1, v1), (k2, v2))| key_eq(k1, k2) && value_eq(v1, v2))
    }

    /// Copies the map, producing each key and value with the given closures
    /// instead of `Clone`. The copy has only its built-in cursor, off.
    ///
    /// `key` must not change how keys order relative to one another.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let shared = Rc::new(String::from("payload"));
    /// let map = RBTreeMap::from([(1, Rc::clone(&shared))]);
    ///
    /// let shallow = map.clone();
    /// let deep = map.clone_with(|k| *k, |v| Rc::new((**v).clone()));
    ///
    /// assert!(Rc::ptr_eq(&shallow[&1], &shared));
    /// assert!(!Rc::ptr_eq(&deep[&1], &shared));
    /// assert_eq!(deep[&1], shared);
    /// ```
    #[must_use]
    pub fn clone_with<FK, FV>(&self, key: FK, value: FV) -> Self
    where
        FK: FnMut(&K) -> K,
        FV: FnMut(&V) -> V,
    {
        RBTreeMap {
            raw: self.raw.map_payload(key, value),
        }
    }
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Removes the first entry with this key and hands it to `dispose`.
    /// Returns whether an entry was found.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(7, String::from("seven"))]);
    /// let mut freed = 0;
    /// assert!(map.remove_and_dispose(&7, |_, v| freed += v.len()));
    /// assert!(!map.remove_and_dispose(&7, |_, _| unreachable!()));
    /// assert_eq!(freed, 5);
    /// ```
    pub fn remove_and_dispose<Q, F>(&mut self, key: &Q, dispose: F) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        F: FnOnce(K, V),
    {
        match self.remove_entry(key) {
            Some((key, value)) => {
                dispose(key, value);
                true
            }
            None => false,
        }
    }
}
