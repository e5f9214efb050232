use core::borrow::Borrow;
use core::fmt;

use super::RBTreeMap;
use crate::raw::{BUILT_IN_CURSOR, Handle, RawRBTreeMap};

/// Names one cursor registered with an [`RBTreeMap`].
///
/// A cursor is a position in the map's key order: either *off* (before the
/// first or after the last entry) or *at* one entry. Every map owns the
/// [`BUILT_IN`](CursorId::BUILT_IN) cursor from the moment it is created;
/// more are registered with [`RBTreeMap::new_cursor`] and released with
/// [`RBTreeMap::dispose_cursor`].
///
/// The map moves a cursor by itself in exactly one situation: when the
/// entry under it is removed, the cursor steps to the entry that followed
/// (or off, if there was none).
///
/// A `CursorId` is only meaningful for the map that issued it. Using it with
/// another map, or after disposing it, is a logic error; the map panics when
/// it can detect it.
///
/// # Examples
///
/// ```
/// use rb_cursor_map::RBTreeMap;
///
/// let mut map = RBTreeMap::from([(10, 'a'), (20, 'b'), (30, 'c')]);
/// let reader = map.new_cursor();
/// let writer = map.new_cursor();
///
/// map.cursor_mut(reader).go(1);
/// map.cursor_mut(writer).go(0);
/// assert_eq!(map.cursor_mut(writer).remove(), (10, 'a'));
///
/// // The reader was not on the removed entry, so it is undisturbed.
/// assert_eq!(map.cursor(reader).key_at(), &20);
/// assert_eq!(map.cursor(reader).index(), Some(0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CursorId(Handle);

impl CursorId {
    /// The cursor every map is created with. It cannot be disposed.
    pub const BUILT_IN: CursorId = CursorId(BUILT_IN_CURSOR);
}

/// A read-only view of one cursor.
///
/// This `struct` is created by the [`cursor`] method on [`RBTreeMap`].
///
/// [`cursor`]: RBTreeMap::cursor
pub struct Cursor<'a, K, V> {
    raw: &'a RawRBTreeMap<K, V>,
    id: Handle,
}

/// A view of one cursor that can move it and remove the entry under it.
///
/// This `struct` is created by the [`cursor_mut`] method on [`RBTreeMap`].
///
/// Calling [`forth`], [`back`], [`key_at`], [`item_at`], [`item_at_mut`] or
/// [`remove`] while the cursor is off is a contract violation and panics.
///
/// [`cursor_mut`]: RBTreeMap::cursor_mut
/// [`forth`]: CursorMut::forth
/// [`back`]: CursorMut::back
/// [`key_at`]: CursorMut::key_at
/// [`item_at`]: CursorMut::item_at
/// [`item_at_mut`]: CursorMut::item_at_mut
/// [`remove`]: CursorMut::remove
pub struct CursorMut<'a, K, V> {
    raw: &'a mut RawRBTreeMap<K, V>,
    id: Handle,
}

impl<K, V> RBTreeMap<K, V> {
    /// Registers a new cursor, initially off.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<i32, ()> = RBTreeMap::new();
    /// let id = map.new_cursor();
    /// assert!(map.cursor(id).is_off());
    /// assert_eq!(map.cursor_count(), 2);
    /// ```
    pub fn new_cursor(&mut self) -> CursorId {
        CursorId(self.raw.new_cursor())
    }

    /// Releases a cursor registered with [`new_cursor`](RBTreeMap::new_cursor).
    ///
    /// # Panics
    ///
    /// Panics if `id` is [`CursorId::BUILT_IN`] or was already disposed.
    pub fn dispose_cursor(&mut self, id: CursorId) {
        self.raw.dispose_cursor(id.0);
    }

    /// Returns the number of live cursors, the built-in one included.
    #[must_use]
    pub fn cursor_count(&self) -> usize {
        self.raw.cursor_count()
    }

    /// Borrows a cursor for reading.
    ///
    /// # Panics
    ///
    /// Panics if `id` has been disposed.
    #[must_use]
    pub fn cursor(&self, id: CursorId) -> Cursor<'_, K, V> {
        assert!(self.raw.has_cursor(id.0), "`RBTreeMap::cursor()` - `id` is not a live cursor!");
        Cursor { raw: &self.raw, id: id.0 }
    }

    /// Borrows a cursor for moving it or removing the entry under it.
    ///
    /// # Panics
    ///
    /// Panics if `id` has been disposed.
    #[must_use]
    pub fn cursor_mut(&mut self, id: CursorId) -> CursorMut<'_, K, V> {
        assert!(self.raw.has_cursor(id.0), "`RBTreeMap::cursor_mut()` - `id` is not a live cursor!");
        CursorMut {
            raw: &mut self.raw,
            id: id.0,
        }
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    #[must_use]
    pub fn id(&self) -> CursorId {
        CursorId(self.id)
    }

    /// Returns `true` if the cursor is not at any entry.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.raw.cursor(self.id).is_none()
    }

    /// Returns the cursor's position in key order, or `None` if it is off.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.raw.cursor(self.id).map(|h| self.raw.rank_of_handle(h))
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    #[must_use]
    pub fn key_at(&self) -> &'a K {
        let raw = self.raw;
        &raw.node(raw.cursor(self.id).expect("`Cursor::key_at()` - cursor is off!")).key
    }

    /// Returns the value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    #[must_use]
    pub fn item_at(&self) -> &'a V {
        let raw = self.raw;
        &raw.node(raw.cursor(self.id).expect("`Cursor::item_at()` - cursor is off!")).value
    }

    /// Returns the entry under the cursor, or `None` if it is off.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let raw = self.raw;
        let node = raw.node(raw.cursor(self.id)?);
        Some((&node.key, &node.value))
    }
}

impl<K, V> CursorMut<'_, K, V> {
    fn position(&self) -> Option<Handle> {
        self.raw.cursor(self.id)
    }

    fn set_position(&mut self, position: Option<Handle>) {
        self.raw.set_cursor(self.id, position);
    }

    #[must_use]
    pub fn id(&self) -> CursorId {
        CursorId(self.id)
    }

    /// Reborrows as a read-only [`Cursor`].
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor {
            raw: &*self.raw,
            id: self.id,
        }
    }

    /// Returns `true` if the cursor is not at any entry.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.position().is_none()
    }

    /// Moves to the first entry, or off if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::{CursorId, RBTreeMap};
    ///
    /// let mut empty: RBTreeMap<i32, ()> = RBTreeMap::new();
    /// let mut cursor = empty.cursor_mut(CursorId::BUILT_IN);
    /// cursor.start();
    /// assert!(cursor.is_off());
    /// ```
    pub fn start(&mut self) {
        let first = self.raw.first();
        self.set_position(first);
    }

    /// Moves to the last entry, or off if the map is empty.
    pub fn finish(&mut self) {
        let last = self.raw.last();
        self.set_position(last);
    }

    /// Moves to the next entry, or off after the last one.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::{CursorId, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::from([(1, ()), (2, ())]);
    /// let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
    /// cursor.finish();
    /// cursor.forth();
    /// assert!(cursor.is_off());
    /// ```
    pub fn forth(&mut self) {
        let at = self.position().expect("`CursorMut::forth()` - cursor is off!");
        let next = self.raw.successor(at);
        self.set_position(next);
    }

    /// Moves to the previous entry, or off before the first one.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    pub fn back(&mut self) {
        let at = self.position().expect("`CursorMut::back()` - cursor is off!");
        let previous = self.raw.predecessor(at);
        self.set_position(previous);
    }

    /// Moves to the entry at position `index` in key order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn go(&mut self, index: usize) {
        let len = self.raw.len();
        assert!(index < len, "`CursorMut::go()` - `index` ({index}) out of range for length {len}!");
        let target = self.raw.select(index);
        self.set_position(target);
    }

    /// Returns the cursor's position in key order, or `None` if it is off.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.position().map(|h| self.raw.rank_of_handle(h))
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    #[must_use]
    pub fn key_at(&self) -> &K {
        &self.raw.node(self.position().expect("`CursorMut::key_at()` - cursor is off!")).key
    }

    /// Returns the value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    #[must_use]
    pub fn item_at(&self) -> &V {
        &self.raw.node(self.position().expect("`CursorMut::item_at()` - cursor is off!")).value
    }

    /// Returns the value under the cursor, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    #[must_use]
    pub fn item_at_mut(&mut self) -> &mut V {
        let at = self.position().expect("`CursorMut::item_at_mut()` - cursor is off!");
        &mut self.raw.node_mut(at).value
    }

    /// Removes the entry under the cursor and returns it. The cursor, and
    /// any other cursor on the same entry, moves to the entry that followed.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is off.
    pub fn remove(&mut self) -> (K, V) {
        let at = self.position().expect("`CursorMut::remove()` - cursor is off!");
        let (key, value, _) = self.raw.remove(at);
        (key, value)
    }
}

impl<K: Ord, V> CursorMut<'_, K, V> {
    /// Moves to the first entry whose key is not less than `key`: an equal
    /// key if present, otherwise the next greater key, otherwise off.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_cursor_map::{CursorId, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
    ///
    /// cursor.go_to_key(&20);
    /// assert_eq!(cursor.key_at(), &20);
    /// cursor.go_to_key(&5);
    /// assert_eq!(cursor.key_at(), &10);
    /// cursor.go_to_key(&31);
    /// assert!(cursor.is_off());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn go_to_key<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.raw.lower_bound(key);
        self.set_position(target);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("id", &self.id).field("entry", &self.entry()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("id", &self.id).field("entry", &self.as_cursor().entry()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn back_walks_in_reverse() {
        let mut map = RBTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
        let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
        cursor.finish();

        let mut seen = alloc::vec::Vec::new();
        while !cursor.is_off() {
            seen.push(*cursor.item_at());
            cursor.back();
        }
        assert_eq!(seen, ['c', 'b', 'a']);
    }

    #[test]
    fn item_at_mut_edits_in_place() {
        let mut map = RBTreeMap::from([(1, 10), (2, 20)]);
        let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
        cursor.go(1);
        *cursor.item_at_mut() += 1;
        assert_eq!(map.get(&2), Some(&21));
    }

    #[test]
    #[should_panic(expected = "`CursorMut::back()` - cursor is off!")]
    fn back_while_off() {
        let mut map: RBTreeMap<i32, ()> = RBTreeMap::new();
        map.cursor_mut(CursorId::BUILT_IN).back();
    }

    #[test]
    #[should_panic(expected = "`RBTreeMap::cursor()` - `id` is not a live cursor!")]
    fn disposed_cursor_is_rejected() {
        let mut map: RBTreeMap<i32, ()> = RBTreeMap::new();
        let id = map.new_cursor();
        map.dispose_cursor(id);
        let _ = map.cursor(id);
    }
}
