//! An ordered multimap on a red-black tree, with cursors that survive removal.
//!
//! [`RBTreeMap`] keeps its entries sorted by key and allows duplicate keys;
//! entries with equal keys stay in insertion order. Besides the usual map
//! operations it offers:
//!
//! - Cursors, each named by a [`CursorId`]. A map always owns one built-in
//!   cursor and any number of extra ones can be registered. Removing the entry
//!   a cursor sits on moves that cursor to the entry that followed it.
//! - O(log n) positional access via subtree sizes: [`get_by_rank`](RBTreeMap::get_by_rank),
//!   [`rank_of`](RBTreeMap::rank_of), indexing by [`Rank`] and [`CursorMut::go`].
//!
//! # Example
//!
//! ```
//! use rb_cursor_map::{CursorId, RBTreeMap, Rank};
//!
//! let mut queue = RBTreeMap::new();
//! queue.put(2, "write");
//! queue.put(1, "read");
//! queue.put(2, "flush");
//!
//! // Duplicates keep the order they were put in.
//! assert_eq!(queue.values().copied().collect::<Vec<_>>(), ["read", "write", "flush"]);
//! assert_eq!(queue[Rank(2)], "flush");
//!
//! // Park a cursor on "write", then remove that entry out from under it.
//! let id = queue.new_cursor();
//! queue.cursor_mut(id).go(1);
//! queue.cursor_mut(CursorId::BUILT_IN).go(1);
//! assert_eq!(queue.cursor_mut(CursorId::BUILT_IN).remove(), (2, "write"));
//!
//! // The registered cursor followed to the next entry.
//! assert_eq!(queue.cursor(id).item_at(), &"flush");
//! ```
//!
//! # Implementation
//!
//! Nodes live in an index-addressed arena rather than behind pointers. Absent
//! children and the root's parent are `None`, so there is no shared sentinel
//! node. Each node also records the size of its subtree.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod rbtree_map;

pub use order_statistic::Rank;
pub use rbtree_map::{Cursor, CursorId, CursorMut, RBTreeMap};
