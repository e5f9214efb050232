use super::handle::Handle;
use super::size::Size;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One key/value pair plus its tree linkage.
///
/// Absent links are `None`; there is no sentinel node. The map's colour
/// queries treat `None` as a black leaf.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    // Number of nodes in the subtree rooted here, this one included.
    pub(crate) size: Size,
}

impl<K, V> Node<K, V> {
    /// A detached node. Insertion colours it red before linking it in.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Black,
            parent: None,
            left: None,
            right: None,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// The only child of a node with at most one child.
    #[inline]
    pub(crate) fn only_child(&self) -> Option<Handle> {
        debug_assert!(!self.has_two_children());
        self.left.or(self.right)
    }

    /// Replaces whichever child link currently points at `old`.
    pub(crate) fn replace_child(&mut self, old: Handle, new: Option<Handle>) {
        if self.left == Some(old) {
            self.left = new;
        } else {
            debug_assert_eq!(self.right, Some(old), "`Node::replace_child()` - `old` is not a child!");
            self.right = new;
        }
    }

    /// Exchanges key and value with `other`, leaving both nodes' linkage,
    /// colour and size untouched.
    pub(crate) fn swap_payload(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.key, &mut other.key);
        core::mem::swap(&mut self.value, &mut other.value);
    }

    pub(crate) fn into_payload(self) -> (K, V) {
        (self.key, self.value)
    }
}
