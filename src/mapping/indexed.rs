//! `N48`: a 256-slot index (partial key -> child slot) over a 48-slot child array.

use crate::mapping::direct::DirectMapping;
use crate::mapping::keyed::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::node::RadixNode;

const WIDTH: usize = 48;
const EMPTY: u8 = 255;

pub(crate) struct IndexedMapping<V> {
    index: Box<[u8; 256]>,
    children: Box<[Option<Box<RadixNode<V>>>; WIDTH]>,
    num_children: u8,
}

impl<V> IndexedMapping<V> {
    pub(crate) fn from_keyed<const OLD_WIDTH: usize>(old: &mut KeyedMapping<V, OLD_WIDTH>) -> Self {
        let mut new = Self::new();
        let keys: Vec<u8> = old.iter().map(|(k, _)| k).collect();
        for key in keys {
            let child = old.del_child(key).expect("key observed during iteration must be removable");
            new.set_child(key, child);
        }
        new
    }

    pub(crate) fn from_direct(old: &mut DirectMapping<V>) -> Self {
        let mut new = Self::new();
        for key in old.iter().map(|(k, _)| k).collect::<Vec<_>>() {
            let child = old.del_child(key).expect("key observed during iteration must be removable");
            new.set_child(key, child);
        }
        new
    }
}

impl<V> NodeMapping<V> for IndexedMapping<V> {
    fn new() -> Self {
        Self {
            index: Box::new([EMPTY; 256]),
            children: Box::new(std::array::from_fn(|_| None)),
            num_children: 0,
        }
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    fn find_child(&self, key: u8) -> Option<&RadixNode<V>> {
        let slot = self.index[key as usize];
        if slot == EMPTY {
            return None;
        }
        self.children[slot as usize].as_deref()
    }

    fn find_child_mut(&mut self, key: u8) -> Option<&mut RadixNode<V>> {
        let slot = self.index[key as usize];
        if slot == EMPTY {
            return None;
        }
        self.children[slot as usize].as_deref_mut()
    }

    fn set_child(&mut self, key: u8, child: RadixNode<V>) {
        debug_assert_eq!(self.index[key as usize], EMPTY, "key already present");
        let slot = self.children.iter().position(|c| c.is_none()).expect("set_child called on a full node");
        self.children[slot] = Some(Box::new(child));
        self.index[key as usize] = slot as u8;
        self.num_children += 1;
    }

    fn del_child(&mut self, key: u8) -> Option<RadixNode<V>> {
        let slot = self.index[key as usize];
        if slot == EMPTY {
            return None;
        }
        self.index[key as usize] = EMPTY;
        self.num_children -= 1;
        self.children[slot as usize].take().map(|b| *b)
    }

    fn next_partial_key(&self, from: u8) -> Option<u8> {
        (from..=255).find(|&k| self.index[k as usize] != EMPTY)
    }

    fn prev_partial_key(&self, from: u8) -> Option<u8> {
        (0..=from).rev().find(|&k| self.index[k as usize] != EMPTY)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (u8, &RadixNode<V>)> + '_> {
        Box::new((0u8..=255).filter_map(move |k| {
            let slot = self.index[k as usize];
            if slot == EMPTY {
                None
            } else {
                Some((k, self.children[slot as usize].as_deref().expect("indexed slot must hold a child")))
            }
        }))
    }

    fn take_all_children(&mut self) -> Vec<Box<RadixNode<V>>> {
        self.num_children = 0;
        self.index.fill(EMPTY);
        self.children.iter_mut().filter_map(|c| c.take()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::IndexedMapping;
    use crate::mapping::keyed::KeyedMapping;
    use crate::mapping::NodeMapping;
    use crate::node::RadixNode;
    use crate::partial::Partial;

    fn leaf(v: u8) -> RadixNode<u8> {
        RadixNode::new_leaf(Partial::from_slice(&[]), v)
    }

    #[test]
    fn add_seek_delete_reuses_slots() {
        let mut m = IndexedMapping::<u8>::new();
        m.set_child(5, leaf(5));
        m.set_child(200, leaf(200));
        assert_eq!(m.find_child(5).unwrap().leaf_value(), Some(&5));
        m.del_child(5);
        assert!(m.find_child(5).is_none());
        m.set_child(9, leaf(9));
        assert_eq!(m.find_child(9).unwrap().leaf_value(), Some(&9));
        assert_eq!(m.num_children(), 2);
    }

    #[test]
    fn iteration_is_ascending_despite_slot_reuse() {
        let mut m = IndexedMapping::<u8>::new();
        for k in [100u8, 1, 250, 50] {
            m.set_child(k, leaf(k));
        }
        m.del_child(1);
        m.set_child(2, leaf(2));
        let keys: Vec<u8> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![2, 50, 100, 250]);
    }

    #[test]
    fn from_keyed_preserves_entries() {
        let mut km = KeyedMapping::<u8, 16>::new();
        for k in [1u8, 5, 9, 200] {
            km.set_child(k, leaf(k));
        }
        let im = IndexedMapping::from_keyed(&mut km);
        assert_eq!(im.num_children(), 4);
        for k in [1u8, 5, 9, 200] {
            assert_eq!(im.find_child(k).unwrap().leaf_value(), Some(&k));
        }
    }
}
