/// A zero-based position in the key order of a map.
///
/// # Examples
///
/// ```
/// use rb_cursor_map::{RBTreeMap, Rank};
///
/// let mut map = RBTreeMap::new();
/// map.put("a", 10);
/// map.put("a", 11);
///
/// assert_eq!(map[Rank(1)], 11);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
