//! Node representation: a compressed-prefix header plus either a leaf value
//! or one of the four inner-node variants (`N4`/`N16`/`N48`/`N256`).

use crate::mapping::direct::DirectMapping;
use crate::mapping::indexed::IndexedMapping;
use crate::mapping::keyed::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::partial::Partial;

pub(crate) struct RadixNode<V> {
    pub(crate) prefix: Partial,
    body: Body<V>,
}

enum Body<V> {
    Leaf(V),
    Node4(KeyedMapping<RadixNode<V>, 4>),
    Node16(KeyedMapping<RadixNode<V>, 16>),
    Node48(IndexedMapping<RadixNode<V>>),
    Node256(DirectMapping<RadixNode<V>>),
}

impl<V> RadixNode<V> {
    pub(crate) fn new_leaf(suffix: Partial, value: V) -> Self {
        Self { prefix: suffix, body: Body::Leaf(value) }
    }

    pub(crate) fn new_inner4(prefix: Partial) -> Self {
        Self { prefix, body: Body::Node4(KeyedMapping::new()) }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.body, Body::Leaf(_))
    }

    pub(crate) fn is_inner(&self) -> bool {
        !self.is_leaf()
    }

    pub(crate) fn leaf_value(&self) -> Option<&V> {
        match &self.body {
            Body::Leaf(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn leaf_value_mut(&mut self) -> Option<&mut V> {
        match &mut self.body {
            Body::Leaf(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn num_children(&self) -> usize {
        match &self.body {
            Body::Leaf(_) => 0,
            Body::Node4(m) => m.num_children(),
            Body::Node16(m) => m.num_children(),
            Body::Node48(m) => m.num_children(),
            Body::Node256(m) => m.num_children(),
        }
    }

    pub(crate) fn find_child(&self, key: u8) -> Option<&RadixNode<V>> {
        match &self.body {
            Body::Leaf(_) => None,
            Body::Node4(m) => m.find_child(key),
            Body::Node16(m) => m.find_child(key),
            Body::Node48(m) => m.find_child(key),
            Body::Node256(m) => m.find_child(key),
        }
    }

    pub(crate) fn find_child_mut(&mut self, key: u8) -> Option<&mut RadixNode<V>> {
        match &mut self.body {
            Body::Leaf(_) => None,
            Body::Node4(m) => m.find_child_mut(key),
            Body::Node16(m) => m.find_child_mut(key),
            Body::Node48(m) => m.find_child_mut(key),
            Body::Node256(m) => m.find_child_mut(key),
        }
    }

    pub(crate) fn next_partial_key(&self, from: u8) -> Option<u8> {
        match &self.body {
            Body::Leaf(_) => None,
            Body::Node4(m) => m.next_partial_key(from),
            Body::Node16(m) => m.next_partial_key(from),
            Body::Node48(m) => m.next_partial_key(from),
            Body::Node256(m) => m.next_partial_key(from),
        }
    }

    pub(crate) fn prev_partial_key(&self, from: u8) -> Option<u8> {
        match &self.body {
            Body::Leaf(_) => None,
            Body::Node4(m) => m.prev_partial_key(from),
            Body::Node16(m) => m.prev_partial_key(from),
            Body::Node48(m) => m.prev_partial_key(from),
            Body::Node256(m) => m.prev_partial_key(from),
        }
    }

    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &RadixNode<V>)> + '_> {
        match &self.body {
            Body::Leaf(_) => Box::new(std::iter::empty()),
            Body::Node4(m) => m.iter(),
            Body::Node16(m) => m.iter(),
            Body::Node48(m) => m.iter(),
            Body::Node256(m) => m.iter(),
        }
    }

    /// Inserts a fresh child, growing this node first if it's already full.
    pub(crate) fn add_child(&mut self, key: u8, child: RadixNode<V>) {
        if self.is_full() {
            self.grow();
        }
        match &mut self.body {
            Body::Node4(m) => m.set_child(key, child),
            Body::Node16(m) => m.set_child(key, child),
            Body::Node48(m) => m.set_child(key, child),
            Body::Node256(m) => m.set_child(key, child),
            Body::Leaf(_) => unreachable!("a leaf has no children to add"),
        }
    }

    /// Removes `key`'s child, shrinking this node afterward if it has become
    /// underfull. Returns the removed child.
    pub(crate) fn del_child(&mut self, key: u8) -> Option<RadixNode<V>> {
        let removed = match &mut self.body {
            Body::Node4(m) => m.del_child(key),
            Body::Node16(m) => m.del_child(key),
            Body::Node48(m) => m.del_child(key),
            Body::Node256(m) => m.del_child(key),
            Body::Leaf(_) => unreachable!("a leaf has no children to delete"),
        };
        if removed.is_some() && self.is_underfull() {
            self.shrink();
        }
        removed
    }

    fn is_full(&self) -> bool {
        match &self.body {
            Body::Node4(m) => m.num_children() >= 4,
            Body::Node16(m) => m.num_children() >= 16,
            Body::Node48(m) => m.num_children() >= 48,
            Body::Node256(m) => m.num_children() >= 256,
            Body::Leaf(_) => unreachable!("a leaf has no capacity"),
        }
    }

    /// `Node4` has no smaller sibling variant; instead it collapses entirely
    /// once a single child remains (see [`Self::shrink`]).
    fn is_underfull(&self) -> bool {
        match &self.body {
            Body::Node4(m) => m.num_children() == 1,
            Body::Node16(m) => m.num_children() < 5,
            Body::Node48(m) => m.num_children() < 17,
            Body::Node256(m) => m.num_children() < 49,
            Body::Leaf(_) => unreachable!("a leaf has no capacity"),
        }
    }

    fn grow(&mut self) {
        self.body = match &mut self.body {
            Body::Node4(m) => Body::Node16(KeyedMapping::from_resized(m)),
            Body::Node16(m) => Body::Node48(IndexedMapping::from_keyed(m)),
            Body::Node48(m) => Body::Node256(DirectMapping::from_indexed(m)),
            Body::Node256(_) => unreachable!("a node256 never grows further"),
            Body::Leaf(_) => unreachable!("a leaf never grows"),
        };
    }

    /// Shrinks to the next smaller variant. A `Node4` dropping to a single
    /// child collapses entirely: that child's content replaces this node's,
    /// and its prefix absorbs ours plus the partial key byte that used to
    /// discriminate the child (path compression re-forming).
    fn shrink(&mut self) {
        if let Body::Node4(m) = &mut self.body {
            let (key, mut child) = m.take_sole_child();
            child.prefix = self.prefix.concat(&Partial::from_slice(&[key])).concat(&child.prefix);
            *self = *child;
            return;
        }
        match &mut self.body {
            Body::Node16(m) => self.body = Body::Node4(KeyedMapping::from_resized(m)),
            Body::Node48(m) => self.body = Body::Node16(KeyedMapping::from_indexed(m)),
            Body::Node256(m) => self.body = Body::Node48(IndexedMapping::from_direct(m)),
            Body::Node4(_) => unreachable!("handled above"),
            Body::Leaf(_) => unreachable!("a leaf never shrinks"),
        }
    }
}

impl<V> RadixNode<V> {
    /// Drains this node's direct children, leaving it childless. Used by
    /// [`crate::tree::AdaptiveRadixTree`]'s iterative teardown, which walks an
    /// explicit work stack instead of relying on recursive `Drop` glue.
    pub(crate) fn take_children(&mut self) -> Vec<Box<RadixNode<V>>> {
        match &mut self.body {
            Body::Leaf(_) => Vec::new(),
            Body::Node4(m) => m.take_all_children(),
            Body::Node16(m) => m.take_all_children(),
            Body::Node48(m) => m.take_all_children(),
            Body::Node256(m) => m.take_all_children(),
        }
    }

    /// Consumes a leaf node, returning its value. Panics if called on an
    /// inner node.
    pub(crate) fn into_leaf_value(self) -> V {
        match self.body {
            Body::Leaf(v) => v,
            _ => unreachable!("into_leaf_value called on an inner node"),
        }
    }
}
