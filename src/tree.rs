//! Adaptive Radix Tree: an ordered, in-memory byte-string keyed map.

use crate::iter::Cursor;
use crate::node::RadixNode;
use crate::partial::Partial;
use crate::range::Range;

/// An ordered map from byte-string keys to values of type `V`, backed by an
/// Adaptive Radix Tree.
///
/// Keys are arbitrary non-empty byte slices; they must not contain an
/// embedded zero byte, since the tree appends a sentinel zero internally to
/// guarantee that no stored key is a strict prefix of another.
///
/// ```
/// use radart::AdaptiveRadixTree;
///
/// let mut tree = AdaptiveRadixTree::new();
/// tree.set(b"apple", 1);
/// tree.set(b"application", 2);
/// assert_eq!(tree.get(b"apple"), Some(&1));
/// assert_eq!(tree.get(b"app"), None);
/// ```
pub struct AdaptiveRadixTree<V> {
    pub(crate) root: Option<RadixNode<V>>,
}

impl<V> Default for AdaptiveRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for AdaptiveRadixTree<V> {
    /// Tears down the tree iteratively via an explicit work stack, instead of
    /// relying on recursive `Drop` glue that could overflow the stack on a
    /// deep or wide tree.
    fn drop(&mut self) {
        let Some(mut root) = self.root.take() else {
            return;
        };
        let mut pending = root.take_children();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_children());
        }
    }
}

/// Appends the trailing sentinel zero byte. Panics (via `debug_assert`) if
/// `key` already contains an embedded zero, since that would silently
/// truncate the stored key.
pub(crate) fn encode_key(key: &[u8]) -> Vec<u8> {
    debug_assert!(!key.contains(&0), "keys must not contain an embedded zero byte");
    let mut encoded = Vec::with_capacity(key.len() + 1);
    encoded.extend_from_slice(key);
    encoded.push(0);
    encoded
}

impl<V> AdaptiveRadixTree<V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Looks up `key`, returning its value if present.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let key = encode_key(key);
        Self::get_iterate(self.root.as_ref()?, &key)
    }

    /// Looks up `key`, returning a mutable reference to its value if present.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let key = encode_key(key);
        Self::get_iterate_mut(self.root.as_mut()?, &key)
    }

    /// Inserts `value` under `key`, returning the value it replaced, if any.
    pub fn set(&mut self, key: &[u8], value: V) -> Option<V> {
        let key = encode_key(key);
        let Some(root) = &mut self.root else {
            self.root = Some(RadixNode::new_leaf(Partial::from_slice(&key), value));
            return None;
        };
        Self::insert_recurse(root, &key, value, 0)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn del(&mut self, key: &[u8]) -> Option<V> {
        let key = encode_key(key);
        let root = self.root.as_mut()?;

        let match_len = root.prefix.common_prefix_len(&key);
        if match_len != root.prefix.len() {
            return None;
        }

        if root.is_leaf() {
            if root.prefix.len() != key.len() {
                return None;
            }
            let root = self.root.take().unwrap();
            return Some(root.into_leaf_value());
        }

        let result = Self::del_recurse(root, &key, match_len);
        if result.is_some() && root.is_inner() && root.num_children() == 0 {
            self.root = None;
        }
        result
    }

    /// A cursor positioned at the lexicographically smallest key.
    pub fn begin(&self) -> Cursor<'_, V> {
        Cursor::seek_ge(self.root.as_ref(), &[])
    }

    /// A cursor positioned at the first key `>= key`.
    pub fn seek_ge(&self, key: &[u8]) -> Cursor<'_, V> {
        Cursor::seek_ge(self.root.as_ref(), key)
    }

    /// An empty, exhausted cursor.
    pub fn end(&self) -> Cursor<'_, V> {
        Cursor::empty()
    }

    /// An iterator over `[start, end)` of the tree's entries, in key order.
    ///
    /// `start`/`end` are raw key bytes (without the trailing sentinel).
    pub fn range(&self, start: std::ops::Bound<&[u8]>, end: std::ops::Bound<&[u8]>) -> Range<'_, V> {
        let cursor = match start {
            std::ops::Bound::Unbounded => self.begin(),
            std::ops::Bound::Included(k) => self.seek_ge(k),
            std::ops::Bound::Excluded(k) => {
                let mut encoded = k.to_vec();
                encoded.push(0);
                self.seek_ge(&encoded)
            }
        };
        Range::new(cursor, end.map(|k| k.to_vec()))
    }

    fn get_iterate<'a>(mut node: &'a RadixNode<V>, key: &[u8]) -> Option<&'a V> {
        let mut depth = 0;
        loop {
            let match_len = node.prefix.common_prefix_len(&key[depth..]);
            if match_len != node.prefix.len() {
                return None;
            }
            if node.prefix.len() == key.len() - depth {
                return node.leaf_value();
            }
            if node.is_leaf() {
                return None;
            }
            let pk = key[depth + node.prefix.len()];
            depth += node.prefix.len() + 1;
            node = node.find_child(pk)?;
        }
    }

    fn get_iterate_mut<'a>(mut node: &'a mut RadixNode<V>, key: &[u8]) -> Option<&'a mut V> {
        let mut depth = 0;
        loop {
            let match_len = node.prefix.common_prefix_len(&key[depth..]);
            if match_len != node.prefix.len() {
                return None;
            }
            if node.prefix.len() == key.len() - depth {
                return node.leaf_value_mut();
            }
            if node.is_leaf() {
                return None;
            }
            let pk = key[depth + node.prefix.len()];
            depth += node.prefix.len() + 1;
            node = node.find_child_mut(pk)?;
        }
    }

    fn insert_recurse(cur: &mut RadixNode<V>, key: &[u8], value: V, depth: usize) -> Option<V> {
        let match_len = cur.prefix.common_prefix_len(&key[depth..]);
        let remaining = key.len() - depth;
        let is_full_match = match_len == std::cmp::min(cur.prefix.len(), remaining);

        // Case A: the key ends exactly at this node's prefix.
        if is_full_match && cur.prefix.len() == remaining {
            return match cur.leaf_value_mut() {
                Some(v) => Some(std::mem::replace(v, value)),
                None => unreachable!(
                    "sentinel discipline guarantees no inner node's prefix exactly spans a key"
                ),
            };
        }

        // Case B: this node's prefix diverges from the key partway through.
        // Split it: a new N4 parent holds the common prefix, with the
        // (shrunken) current node and a fresh leaf as its two children.
        if !is_full_match {
            let old_prefix = cur.prefix.clone();
            let k1 = old_prefix.at(match_len);
            let k2 = key[depth + match_len];
            let parent = RadixNode::new_inner4(old_prefix.before(match_len));
            let mut sibling = std::mem::replace(cur, parent);
            sibling.prefix = old_prefix.after(match_len + 1);
            let new_leaf = RadixNode::new_leaf(Partial::from_slice(&key[depth + match_len + 1..]), value);
            cur.add_child(k1, sibling);
            cur.add_child(k2, new_leaf);
            return None;
        }

        // Case C: this node's prefix is fully consumed; descend (or add a
        // fresh child leaf) on the next key byte.
        let pk = key[depth + cur.prefix.len()];
        let next_depth = depth + cur.prefix.len() + 1;
        match cur.find_child_mut(pk) {
            Some(child) => Self::insert_recurse(child, key, value, next_depth),
            None => {
                debug_assert!(cur.is_inner(), "a leaf cannot gain a child outside case B");
                let new_leaf = RadixNode::new_leaf(Partial::from_slice(&key[next_depth..]), value);
                cur.add_child(pk, new_leaf);
                None
            }
        }
    }

    /// Deletes under `parent`, the inner node that owns the slot matching
    /// `key` at `depth`. `parent.del_child` takes care of shrinking (and, for
    /// a two-child `N4`, collapsing into the surviving sibling).
    fn del_recurse(parent: &mut RadixNode<V>, key: &[u8], depth: usize) -> Option<V> {
        let c = key[depth];
        let child = parent.find_child_mut(c)?;

        let match_len = child.prefix.common_prefix_len(&key[depth + 1..]);
        if match_len != child.prefix.len() {
            return None;
        }

        if child.is_leaf() {
            if child.prefix.len() != key.len() - depth - 1 {
                return None;
            }
            let removed = parent.del_child(c).unwrap();
            return Some(removed.into_leaf_value());
        }

        let child_depth = depth + child.prefix.len() + 1;
        let result = Self::del_recurse(child, key, child_depth);

        if result.is_some() && child.is_inner() && child.num_children() == 0 {
            parent.del_child(c);
        }

        result
    }
}
