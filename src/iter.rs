//! Forward cursor over an Adaptive Radix Tree, yielding `(key, &value)` pairs
//! in lexicographic order.

use crate::cursor::ChildCursor;
use crate::node::RadixNode;
use crate::tree::encode_key;

struct Frame<'a, V> {
    node: &'a RadixNode<V>,
    /// Key bytes consumed to reach `node`, not including `node`'s own prefix.
    key: Vec<u8>,
    child_iter: ChildCursor<'a, V>,
}

/// A forward iterator over all `(key, &value)` pairs in a tree, in ascending
/// lexicographic order.
///
/// A cursor borrows the tree; the borrow checker prevents any mutation of
/// the tree while a cursor is outstanding.
pub struct Cursor<'a, V> {
    stack: Vec<Frame<'a, V>>,
}

impl<'a, V> Cursor<'a, V> {
    pub(crate) fn empty() -> Self {
        Self { stack: Vec::new() }
    }

    /// Builds a cursor positioned at the first leaf whose key is `>= target`
    /// (`target` here is the raw, unencoded key).
    pub(crate) fn seek_ge(root: Option<&'a RadixNode<V>>, target: &[u8]) -> Self {
        let Some(root) = root else {
            return Self::empty();
        };
        let target = encode_key(target);
        let stack = Self::build(root, Vec::new(), &target, 0).unwrap_or_default();
        let mut cursor = Self { stack };
        cursor.seek_leaf();
        cursor
    }

    /// Attempts to position a frame (and, recursively, its descendants) at
    /// the start of the subtree rooted at `node` that holds the first key
    /// `>= target`. Returns `None` if this entire subtree sorts strictly
    /// before `target`, signalling the caller to try the next sibling.
    fn build(node: &'a RadixNode<V>, key: Vec<u8>, target: &[u8], depth: usize) -> Option<Vec<Frame<'a, V>>> {
        let p = std::cmp::min(node.prefix.common_prefix_len(&target[depth..]), target.len() - depth);

        // target <= the smallest key in this subtree: descend leftmost.
        if target.len() == depth + p {
            return Some(vec![Frame { node, key, child_iter: ChildCursor::first(node) }]);
        }

        if p < node.prefix.len() {
            return match node.prefix.at(p).cmp(&target[depth + p]) {
                std::cmp::Ordering::Less => None,
                std::cmp::Ordering::Greater => {
                    Some(vec![Frame { node, key, child_iter: ChildCursor::first(node) }])
                }
                std::cmp::Ordering::Equal => unreachable!("p is the longest common prefix length"),
            };
        }

        if node.is_leaf() {
            return Some(vec![Frame { node, key, child_iter: ChildCursor::first(node) }]);
        }

        let next_depth = depth + node.prefix.len() + 1;
        let pk_target = target[depth + node.prefix.len()];
        let mut child_iter = ChildCursor::at_or_after(node, pk_target);
        loop {
            let c = child_iter.current().ok()?;
            let child = node.find_child(c).expect("child_iter key must resolve to a live child");
            let mut child_key = key.clone();
            child_key.extend_from_slice(node.prefix.as_slice());
            child_key.push(c);
            if let Some(sub) = Self::build(child, child_key, target, next_depth) {
                let mut frames = vec![Frame { node, key, child_iter }];
                frames.extend(sub);
                return Some(frames);
            }
            child_iter.advance();
        }
    }

    /// Restores the invariant that the top frame's node is a leaf, or the
    /// stack is empty: ascends past exhausted frames, then descends to the
    /// leftmost leaf under whatever frame remains.
    fn seek_leaf(&mut self) {
        loop {
            let Some(frame) = self.stack.last() else {
                return;
            };
            if frame.node.is_leaf() {
                return;
            }
            if frame.child_iter.is_end() {
                self.stack.pop();
                if let Some(parent) = self.stack.last_mut() {
                    parent.child_iter.advance();
                }
                continue;
            }
            let pk = frame.child_iter.current().expect("checked not end above");
            let child = frame.node.find_child(pk).expect("child_iter key must resolve to a live child");
            let mut child_key = frame.key.clone();
            child_key.extend_from_slice(frame.node.prefix.as_slice());
            child_key.push(pk);
            self.stack.push(Frame { node: child, key: child_key, child_iter: ChildCursor::first(child) });
        }
    }

    /// Drops the current leaf frame and advances to the next one.
    fn step(&mut self) {
        self.stack.pop();
        if let Some(parent) = self.stack.last_mut() {
            parent.child_iter.advance();
        }
        self.seek_leaf();
    }
}

impl<'a, V> Iterator for Cursor<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.last()?;
        let node = frame.node;
        let mut key = frame.key.clone();
        key.extend_from_slice(node.prefix.as_slice());
        key.pop(); // drop the trailing sentinel
        let value = node.leaf_value().expect("top frame's node must be a leaf");
        self.step();
        Some((key, value))
    }
}

impl<V> PartialEq for Cursor<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self.stack.last(), other.stack.last()) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a.node, b.node),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::AdaptiveRadixTree;

    #[test]
    fn begin_yields_entries_in_lexicographic_order() {
        let mut tree = AdaptiveRadixTree::new();
        tree.set(b"cherry", 3);
        tree.set(b"apple", 1);
        tree.set(b"banana", 2);
        let collected: Vec<_> = tree.begin().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            collected,
            vec![(b"apple".to_vec(), 1), (b"banana".to_vec(), 2), (b"cherry".to_vec(), 3)]
        );
    }

    #[test]
    fn scenario_iterator_order_after_prefix_split() {
        let mut tree = AdaptiveRadixTree::new();
        tree.set(b"aa", 0);
        tree.set(b"aaaa", 1);
        tree.set(b"aaaaaaa", 2);
        let collected: Vec<_> = tree.begin().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            collected,
            vec![(b"aa".to_vec(), 0), (b"aaaa".to_vec(), 1), (b"aaaaaaa".to_vec(), 2)]
        );
    }

    #[test]
    fn scenario_seek_ge_boundary() {
        let mut tree = AdaptiveRadixTree::new();
        tree.set(b"apple", 1);
        tree.set(b"banana", 2);
        tree.set(b"cherry", 3);
        let collected: Vec<_> = tree.seek_ge(b"b").map(|(k, v)| (k, *v)).collect();
        assert_eq!(collected, vec![(b"banana".to_vec(), 2), (b"cherry".to_vec(), 3)]);
        assert_eq!(tree.seek_ge(b"d"), tree.end());
    }

    #[test]
    fn empty_tree_begin_is_end() {
        let tree: AdaptiveRadixTree<i32> = AdaptiveRadixTree::new();
        assert_eq!(tree.begin(), tree.end());
    }
}
