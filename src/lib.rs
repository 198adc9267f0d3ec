//! # radart
//!
//! An Adaptive Radix Tree (ART): an ordered, in-memory map from byte-string
//! keys to values, with path compression and node sizes that adapt to how
//! densely each level of the tree actually branches.
//!
//! ## Quick start
//!
//! ```rust
//! use radart::AdaptiveRadixTree;
//!
//! let mut tree = AdaptiveRadixTree::new();
//! tree.set(b"apple", 1);
//! tree.set(b"application", 2);
//! assert_eq!(tree.get(b"apple"), Some(&1));
//! assert_eq!(tree.get(b"app"), None);
//!
//! for (key, value) in tree.begin() {
//!     println!("{:?} -> {}", key, value);
//! }
//! ```
//!
//! Keys are arbitrary non-empty byte slices that must not contain an
//! embedded zero byte; see [`AdaptiveRadixTree`] for the full operation set.

mod cursor;
mod mapping;
mod node;
mod partial;

pub mod iter;
pub mod range;
pub mod tree;

pub use iter::Cursor;
pub use range::Range;
pub use tree::AdaptiveRadixTree;
