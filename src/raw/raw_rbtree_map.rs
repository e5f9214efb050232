use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};
use super::size::Size;

/// Slot of the cursor every map is created with.
pub(crate) const BUILT_IN_CURSOR: Handle = Handle::from_index(0);

/// Explicit stack for traversals. A red-black tree with `n` nodes is at most
/// `2 * log2(n + 1)` deep, so 64 entries covers any tree the arena can hold.
type Stack<T> = SmallVec<[T; 64]>;

/// The red-black tree backing `RBTreeMap`.
pub(crate) struct RawRBTreeMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of nodes linked into the tree.
    len: usize,
    /// Position of every live cursor; `None` is off.
    cursors: Arena<Option<Handle>>,
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new() -> Self {
        Self::from_parts(Arena::new(), None, 0)
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(Arena::with_capacity(capacity), None, 0)
    }

    fn from_parts(nodes: Arena<Node<K, V>>, root: Option<Handle>, len: usize) -> Self {
        let mut cursors = Arena::new();
        let built_in = cursors.alloc(None);
        debug_assert_eq!(built_in, BUILT_IN_CURSOR);
        Self {
            nodes,
            root,
            len,
            cursors,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drops every node and moves every cursor off.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.reset_cursors();
    }

    /// Moves every payload out in order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.handles_in_order();
        let drained = order.into_iter().map(|h| self.nodes.take(h).into_payload()).collect();
        self.clear();
        drained
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Key and value of `handle`, the value borrowed mutably.
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let Node { key, value, .. } = self.nodes.get_mut(handle);
        (&*key, value)
    }

    /// Every node's key and value in order, values borrowed mutably.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.handles_in_order();
        let mut by_slot = self.nodes.slot_refs_mut();
        order
            .into_iter()
            .map(|h| {
                let Node { key, value, .. } =
                    by_slot[h.to_index()].take().expect("`RawRBTreeMap::entries_mut()` - node visited twice!");
                (&*key, value)
            })
            .collect()
    }

    fn handles_in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(h) = current {
            order.push(h);
            current = self.successor(h);
        }
        order
    }

    // ─── Linkage queries ────────────────────────────────────────────────

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent
    }

    #[inline]
    fn left(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).left
    }

    #[inline]
    fn right(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).right
    }

    #[inline]
    fn color(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.nodes.get(h).color)
    }

    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        self.color(handle) == Color::Red
    }

    #[inline]
    fn is_black(&self, handle: Option<Handle>) -> bool {
        self.color(handle) == Color::Black
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).color = color;
    }

    #[inline]
    fn size_of(&self, handle: Option<Handle>) -> Size {
        handle.map_or(Size::ZERO, |h| self.nodes.get(h).size)
    }

    fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = Size::parent_of(self.size_of(node.left), self.size_of(node.right));
        self.nodes.get_mut(handle).size = size;
    }

    /// Points `parent`'s link to `old` (or the root, if `parent` is `None`)
    /// at `new`. The child's own parent link is left to the caller.
    fn replace_in_parent(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(p) => self.nodes.get_mut(p).replace_child(old, new),
            None => self.root = new,
        }
    }

    // ─── In-order traversal ─────────────────────────────────────────────

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|r| self.leftmost(r))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|r| self.rightmost(r))
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.left(handle) {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.right(handle) {
            handle = right;
        }
        handle
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.right(handle) {
            return Some(self.leftmost(right));
        }
        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.left(p) == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }
        None
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.left(handle) {
            return Some(self.rightmost(left));
        }
        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.right(p) == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.parent(p);
        }
        None
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Stack<(Handle, usize)> = SmallVec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    // ─── Order statistics ───────────────────────────────────────────────

    /// Node at position `rank` in order.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }

        let mut current = self.root;
        let mut remaining = rank;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left = self.size_of(node.left).to_usize();
            match remaining.cmp(&left) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right;
                }
            }
        }

        unreachable!("`RawRBTreeMap::select()` - subtree sizes disagree with `len`!")
    }

    /// Position of `handle` in order.
    pub(crate) fn rank_of_handle(&self, handle: Handle) -> usize {
        let mut rank = self.size_of(self.left(handle)).to_usize();
        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(p) = parent {
            if self.right(p) == Some(child) {
                rank += self.size_of(self.left(p)).to_usize() + 1;
            }
            child = p;
            parent = self.parent(p);
        }
        rank
    }

    // ─── Rotations ──────────────────────────────────────────────────────

    /// Promotes `x`'s right child into `x`'s place; `x` becomes its left child.
    fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x).expect("`RawRBTreeMap::rotate_left()` - no right child!");
        trace!("rotate left at {x:?}");
        let inner = self.left(y);
        let parent = self.parent(x);

        self.nodes.get_mut(x).right = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(x);
        }
        self.nodes.get_mut(y).parent = parent;
        self.replace_in_parent(parent, x, Some(y));
        self.nodes.get_mut(y).left = Some(x);
        self.nodes.get_mut(x).parent = Some(y);

        let size = self.nodes.get(x).size;
        self.nodes.get_mut(y).size = size;
        self.update_size(x);
    }

    /// Promotes `x`'s left child into `x`'s place; `x` becomes its right child.
    fn rotate_right(&mut self, x: Handle) {
        let y = self.left(x).expect("`RawRBTreeMap::rotate_right()` - no left child!");
        trace!("rotate right at {x:?}");
        let inner = self.right(y);
        let parent = self.parent(x);

        self.nodes.get_mut(x).left = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(x);
        }
        self.nodes.get_mut(y).parent = parent;
        self.replace_in_parent(parent, x, Some(y));
        self.nodes.get_mut(y).right = Some(x);
        self.nodes.get_mut(x).parent = Some(y);

        let size = self.nodes.get(x).size;
        self.nodes.get_mut(y).size = size;
        self.update_size(x);
    }

    // ─── Insertion ──────────────────────────────────────────────────────

    /// Restores the red-black properties after `z` was linked in red.
    fn repair_after_insert(&mut self, mut z: Handle) {
        while let Some(p) = self.parent(z) {
            if self.is_black(Some(p)) {
                break;
            }
            // A red node is never the root, so `p` has a parent.
            let g = self.parent(p).expect("`RawRBTreeMap::repair_after_insert()` - red root!");

            if self.left(g) == Some(p) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    trace!("insert repair: recolor at {g:?}");
                    self.set_color(p, Color::Black);
                    self.set_color(uncle.expect("red uncle exists"), Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if self.right(p) == Some(z) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z).expect("`RawRBTreeMap::repair_after_insert()` - rotated node lost its parent!");
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    trace!("insert repair: recolor at {g:?}");
                    self.set_color(p, Color::Black);
                    self.set_color(uncle.expect("red uncle exists"), Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if self.left(p) == Some(z) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z).expect("`RawRBTreeMap::repair_after_insert()` - rotated node lost its parent!");
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }

        let root = self.root.expect("`RawRBTreeMap::repair_after_insert()` - tree is empty!");
        self.set_color(root, Color::Black);
    }

    // ─── Removal ────────────────────────────────────────────────────────

    /// Unlinks `target` and returns its payload together with the node that
    /// now holds the payload that followed it in order.
    ///
    /// Cursors on `target` move to that following node before anything is
    /// relinked. A node with two children keeps its slot: it takes its
    /// predecessor's payload (cursors on the predecessor follow), and the
    /// predecessor's slot is the one freed.
    pub(crate) fn remove(&mut self, target: Handle) -> (K, V, Option<Handle>) {
        let next = self.successor(target);
        self.move_cursors(target, next);

        let doomed = if self.nodes.get(target).has_two_children() {
            let left = self.left(target).expect("two children");
            let predecessor = self.rightmost(left);
            let (target_node, predecessor_node) = self.nodes.get_pair_mut(target, predecessor);
            target_node.swap_payload(predecessor_node);
            self.move_cursors(predecessor, Some(target));
            predecessor
        } else {
            target
        };

        let (parent, child, color) = {
            let node = self.nodes.get(doomed);
            (node.parent, node.only_child(), node.color)
        };

        let mut ancestor = parent;
        while let Some(a) = ancestor {
            let node = self.nodes.get_mut(a);
            node.size = node.size.decrement();
            ancestor = node.parent;
        }

        self.replace_in_parent(parent, doomed, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).parent = parent;
        }
        if color == Color::Black {
            self.repair_after_remove(child, parent);
        }

        self.len -= 1;
        trace!("removed {doomed:?}, {} nodes remain", self.len);
        let (key, value) = self.nodes.take(doomed).into_payload();
        (key, value, next)
    }

    /// Restores equal black-height after a black node was unlinked from
    /// above `x`. `x` may be absent, so its parent is tracked alongside it.
    fn repair_after_remove(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        const NO_SIBLING: &str = "`RawRBTreeMap::repair_after_remove()` - doubly black node has no sibling!";

        while x != self.root && self.is_black(x) {
            let p = parent.expect("`RawRBTreeMap::repair_after_remove()` - non-root node has no parent!");

            if self.left(p) == x {
                let mut w = self.right(p).expect(NO_SIBLING);
                if self.is_red(Some(w)) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    w = self.right(p).expect(NO_SIBLING);
                }

                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    trace!("remove repair: recolor at {w:?}, moving up");
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if self.is_black(self.right(w)) {
                        let near = self.left(w).expect("red near nephew");
                        self.set_color(near, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(p).expect(NO_SIBLING);
                    }
                    let color = self.color(Some(p));
                    self.set_color(w, color);
                    self.set_color(p, Color::Black);
                    if let Some(far) = self.right(w) {
                        self.set_color(far, Color::Black);
                    }
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let mut w = self.left(p).expect(NO_SIBLING);
                if self.is_red(Some(w)) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    w = self.left(p).expect(NO_SIBLING);
                }

                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    trace!("remove repair: recolor at {w:?}, moving up");
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if self.is_black(self.left(w)) {
                        let near = self.right(w).expect("red near nephew");
                        self.set_color(near, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(p).expect(NO_SIBLING);
                    }
                    let color = self.color(Some(p));
                    self.set_color(w, color);
                    self.set_color(p, Color::Black);
                    if let Some(far) = self.left(w) {
                        self.set_color(far, Color::Black);
                    }
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    // ─── Cursor registry ────────────────────────────────────────────────

    pub(crate) fn new_cursor(&mut self) -> Handle {
        let cursor = self.cursors.alloc(None);
        debug!("cursor {cursor:?} created, {} live", self.cursors.len());
        cursor
    }

    pub(crate) fn dispose_cursor(&mut self, cursor: Handle) {
        assert_ne!(
            cursor, BUILT_IN_CURSOR,
            "`RawRBTreeMap::dispose_cursor()` - the built-in cursor cannot be disposed!"
        );
        assert!(self.has_cursor(cursor), "`RawRBTreeMap::dispose_cursor()` - `cursor` is not live!");
        self.cursors.free(cursor);
        debug!("cursor {cursor:?} disposed, {} live", self.cursors.len());
    }

    pub(crate) fn has_cursor(&self, cursor: Handle) -> bool {
        self.cursors.contains(cursor)
    }

    pub(crate) fn cursor_count(&self) -> usize {
        self.cursors.len()
    }

    /// Where `cursor` points; `None` is off.
    pub(crate) fn cursor(&self, cursor: Handle) -> Option<Handle> {
        *self.cursors.get(cursor)
    }

    pub(crate) fn set_cursor(&mut self, cursor: Handle, position: Option<Handle>) {
        *self.cursors.get_mut(cursor) = position;
    }

    fn move_cursors(&mut self, from: Handle, to: Option<Handle>) {
        for position in self.cursors.iter_mut() {
            if *position == Some(from) {
                *position = to;
            }
        }
    }

    fn reset_cursors(&mut self) {
        for position in self.cursors.iter_mut() {
            *position = None;
        }
    }

    /// Copies the tree shape with each payload mapped through `key` and
    /// `value`. The copy starts with only its built-in cursor, off.
    pub(crate) fn map_payload<K2, V2, FK, FV>(&self, mut key: FK, mut value: FV) -> RawRBTreeMap<K2, V2>
    where
        FK: FnMut(&K) -> K2,
        FV: FnMut(&V) -> V2,
    {
        let nodes = self.nodes.map(|node| Node {
            key: key(&node.key),
            value: value(&node.value),
            color: node.color,
            parent: node.parent,
            left: node.left,
            right: node.right,
            size: node.size,
        });
        RawRBTreeMap::from_parts(nodes, self.root, self.len)
    }
}

impl<K: Ord, V> RawRBTreeMap<K, V> {
    /// Links a new node in below every node whose key it does not precede;
    /// equal keys therefore keep insertion order.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Handle {
        let mut node = Node::new(key, value);
        node.color = Color::Red;
        let new = self.nodes.alloc(node);

        let mut parent = None;
        let mut go_left = false;
        let mut current = self.root;
        while let Some(handle) = current {
            go_left = self.nodes.get(new).key < self.nodes.get(handle).key;
            let node = self.nodes.get_mut(handle);
            node.size = node.size.increment();
            parent = Some(handle);
            current = if go_left { node.left } else { node.right };
        }

        self.nodes.get_mut(new).parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(p) if go_left => self.nodes.get_mut(p).left = Some(new),
            Some(p) => self.nodes.get_mut(p).right = Some(new),
        }
        self.len += 1;

        self.repair_after_insert(new);
        new
    }

    /// First node in order whose key is not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let node_key: &Q = node.key.borrow();
            if node_key < key {
                current = node.right;
            } else {
                candidate = Some(handle);
                current = node.left;
            }
        }
        candidate
    }

    /// First node in order holding a key equal to `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.lower_bound(key)?;
        let found: &Q = self.nodes.get(handle).key.borrow();
        (found == key).then_some(handle)
    }

    /// Number of keys that order strictly before `key`, or before-or-equal
    /// when `inclusive`.
    pub(crate) fn count_before<Q>(&self, key: &Q, inclusive: bool) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let node_key: &Q = node.key.borrow();
            let before = match node_key.cmp(key) {
                Ordering::Less => true,
                Ordering::Equal => inclusive,
                Ordering::Greater => false,
            };
            if before {
                count += self.size_of(node.left).to_usize() + 1;
                current = node.right;
            } else {
                current = node.left;
            }
        }
        count
    }

    /// Number of nodes whose key equals `key`.
    pub(crate) fn occurrences<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.count_before(key, true) - self.count_before(key, false)
    }
}

impl<K: Clone, V: Clone> Clone for RawRBTreeMap<K, V> {
    fn clone(&self) -> Self {
        self.map_payload(K::clone, V::clone)
    }
}
