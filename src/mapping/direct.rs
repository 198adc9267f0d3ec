//! `N256`: direct-indexed child array, one slot per possible byte value.

use crate::mapping::indexed::IndexedMapping;
use crate::mapping::NodeMapping;
use crate::node::RadixNode;

pub(crate) struct DirectMapping<V> {
    children: Box<[Option<Box<RadixNode<V>>>; 256]>,
    num_children: u16,
}

impl<V> DirectMapping<V> {
    pub(crate) fn from_indexed(old: &mut IndexedMapping<V>) -> Self {
        let mut new = Self::new();
        let keys: Vec<u8> = old.iter().map(|(k, _)| k).collect();
        for key in keys {
            let child = old.del_child(key).expect("key observed during iteration must be removable");
            new.set_child(key, child);
        }
        new
    }
}

impl<V> NodeMapping<V> for DirectMapping<V> {
    fn new() -> Self {
        Self {
            children: Box::new(std::array::from_fn(|_| None)),
            num_children: 0,
        }
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    fn find_child(&self, key: u8) -> Option<&RadixNode<V>> {
        self.children[key as usize].as_deref()
    }

    fn find_child_mut(&mut self, key: u8) -> Option<&mut RadixNode<V>> {
        self.children[key as usize].as_deref_mut()
    }

    fn set_child(&mut self, key: u8, child: RadixNode<V>) {
        debug_assert!(self.children[key as usize].is_none(), "key already present");
        self.children[key as usize] = Some(Box::new(child));
        self.num_children += 1;
    }

    fn del_child(&mut self, key: u8) -> Option<RadixNode<V>> {
        let removed = self.children[key as usize].take().map(|b| *b);
        if removed.is_some() {
            self.num_children -= 1;
        }
        removed
    }

    fn next_partial_key(&self, from: u8) -> Option<u8> {
        (from..=255).find(|&k| self.children[k as usize].is_some())
    }

    fn prev_partial_key(&self, from: u8) -> Option<u8> {
        (0..=from).rev().find(|&k| self.children[k as usize].is_some())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (u8, &RadixNode<V>)> + '_> {
        Box::new(
            (0u8..=255).filter_map(move |k| self.children[k as usize].as_deref().map(|c| (k, c))),
        )
    }

    fn take_all_children(&mut self) -> Vec<Box<RadixNode<V>>> {
        self.num_children = 0;
        self.children.iter_mut().filter_map(|c| c.take()).collect()
    }
}
