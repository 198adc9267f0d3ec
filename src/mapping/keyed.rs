//! `N4`/`N16`: a small sorted array of partial keys alongside parallel child slots.

use crate::mapping::indexed::IndexedMapping;
use crate::mapping::NodeMapping;
use crate::node::RadixNode;

/// Sorted keys `[0..num_children)` plus parallel, front-packed child slots.
pub(crate) struct KeyedMapping<V, const WIDTH: usize> {
    keys: [u8; WIDTH],
    children: [Option<Box<RadixNode<V>>>; WIDTH],
    num_children: u8,
}

impl<V, const WIDTH: usize> KeyedMapping<V, WIDTH> {
    /// Rebuilds from a smaller or larger same-kind mapping whose entries are
    /// already sorted (grow N4->N16, or shrink N16->N4 once down to <= 4
    /// children).
    pub(crate) fn from_resized<const OLD_WIDTH: usize>(old: &mut KeyedMapping<V, OLD_WIDTH>) -> Self {
        let mut new = Self::new();
        for i in 0..old.num_children as usize {
            new.keys[i] = old.keys[i];
            new.children[i] = old.children[i].take();
        }
        new.num_children = old.num_children;
        new
    }

    /// Rebuilds a shrinking `N48` down into an `N16`; `old`'s entries have no
    /// particular order so the result is sorted as each is re-inserted.
    pub(crate) fn from_indexed(old: &mut IndexedMapping<V>) -> Self {
        let mut new = Self::new();
        let keys: Vec<u8> = old.iter().map(|(k, _)| k).collect();
        for key in keys {
            let child = old.del_child(key).expect("key observed during iteration must be removable");
            new.set_child(key, child);
        }
        new
    }

    /// Returns and removes the sole remaining child; only ever called on a
    /// mapping with exactly one entry (the N4-collapse path in [`crate::tree`]).
    pub(crate) fn take_sole_child(&mut self) -> (u8, Box<RadixNode<V>>) {
        debug_assert_eq!(self.num_children, 1);
        let key = self.keys[0];
        let child = self.children[0].take().expect("sole child must be present");
        self.num_children = 0;
        (key, child)
    }
}

impl<V, const WIDTH: usize> NodeMapping<V> for KeyedMapping<V, WIDTH> {
    fn new() -> Self {
        Self {
            keys: [0; WIDTH],
            children: std::array::from_fn(|_| None),
            num_children: 0,
        }
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    fn find_child(&self, key: u8) -> Option<&RadixNode<V>> {
        let n = self.num_children as usize;
        self.keys[..n]
            .binary_search(&key)
            .ok()
            .map(|idx| self.children[idx].as_deref().expect("present key must have a child"))
    }

    fn find_child_mut(&mut self, key: u8) -> Option<&mut RadixNode<V>> {
        let n = self.num_children as usize;
        let idx = self.keys[..n].binary_search(&key).ok()?;
        Some(self.children[idx].as_deref_mut().expect("present key must have a child"))
    }

    fn set_child(&mut self, key: u8, child: RadixNode<V>) {
        let n = self.num_children as usize;
        debug_assert!(n < WIDTH, "set_child called on a full node");
        debug_assert!(self.keys[..n].binary_search(&key).is_err(), "key already present");
        let idx = self.keys[..n].partition_point(|&k| k < key);
        for i in (idx..n).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = self.children[i].take();
        }
        self.keys[idx] = key;
        self.children[idx] = Some(Box::new(child));
        self.num_children += 1;
    }

    fn del_child(&mut self, key: u8) -> Option<RadixNode<V>> {
        let n = self.num_children as usize;
        let idx = self.keys[..n].binary_search(&key).ok()?;
        let removed = self.children[idx].take().map(|b| *b);
        for i in idx..n - 1 {
            self.keys[i] = self.keys[i + 1];
            self.children[i] = self.children[i + 1].take();
        }
        self.num_children -= 1;
        removed
    }

    fn next_partial_key(&self, from: u8) -> Option<u8> {
        let n = self.num_children as usize;
        let idx = self.keys[..n].partition_point(|&k| k < from);
        self.keys[..n].get(idx).copied()
    }

    fn prev_partial_key(&self, from: u8) -> Option<u8> {
        let n = self.num_children as usize;
        let idx = self.keys[..n].partition_point(|&k| k <= from);
        idx.checked_sub(1).map(|i| self.keys[i])
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (u8, &RadixNode<V>)> + '_> {
        let n = self.num_children as usize;
        Box::new(
            self.keys[..n]
                .iter()
                .zip(self.children[..n].iter())
                .map(|(&k, c)| (k, c.as_deref().expect("present key must have a child"))),
        )
    }

    fn take_all_children(&mut self) -> Vec<Box<RadixNode<V>>> {
        let n = self.num_children as usize;
        self.num_children = 0;
        self.children[..n].iter_mut().filter_map(|c| c.take()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::KeyedMapping;
    use crate::mapping::NodeMapping;
    use crate::node::RadixNode;
    use crate::partial::Partial;

    fn leaf(v: u8) -> RadixNode<u8> {
        RadixNode::new_leaf(Partial::from_slice(&[]), v)
    }

    #[test]
    fn insert_keeps_sorted_order() {
        let mut m = KeyedMapping::<u8, 4>::new();
        for k in [3u8, 1, 4, 2] {
            m.set_child(k, leaf(k));
        }
        let keys: Vec<u8> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
    }

    #[test]
    fn find_and_delete() {
        let mut m = KeyedMapping::<u8, 4>::new();
        m.set_child(10, leaf(10));
        m.set_child(20, leaf(20));
        assert!(m.find_child(10).is_some());
        assert!(m.find_child(15).is_none());
        let removed = m.del_child(10).unwrap();
        assert_eq!(removed.leaf_value(), Some(&10));
        assert_eq!(m.num_children(), 1);
        assert!(m.find_child(10).is_none());
    }

    #[test]
    fn next_and_prev_partial_key() {
        let mut m = KeyedMapping::<u8, 4>::new();
        for k in [10u8, 20, 30] {
            m.set_child(k, leaf(k));
        }
        assert_eq!(m.next_partial_key(0), Some(10));
        assert_eq!(m.next_partial_key(11), Some(20));
        assert_eq!(m.next_partial_key(31), None);
        assert_eq!(m.prev_partial_key(255), Some(30));
        assert_eq!(m.prev_partial_key(15), Some(10));
        assert_eq!(m.prev_partial_key(9), None);
    }

    #[test]
    fn take_sole_child() {
        let mut m = KeyedMapping::<u8, 4>::new();
        m.set_child(5, leaf(5));
        let (k, child) = m.take_sole_child();
        assert_eq!(k, 5);
        assert_eq!(child.leaf_value(), Some(&5));
        assert_eq!(m.num_children(), 0);
    }

    #[test]
    fn from_resized_grow_preserves_order() {
        let mut small = KeyedMapping::<u8, 4>::new();
        for k in [1u8, 2, 3, 4] {
            small.set_child(k, leaf(k));
        }
        let big = KeyedMapping::<u8, 16>::from_resized(&mut small);
        assert_eq!(big.num_children(), 4);
        let keys: Vec<u8> = big.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
    }
}
