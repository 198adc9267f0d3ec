//! Uniform child-storage interface shared by the four inner-node variants.

pub(crate) mod direct;
pub(crate) mod indexed;
pub(crate) mod keyed;

use crate::node::RadixNode;

/// Partial-key -> child-node mapping, implemented once per inner-node variant
/// (`N4`/`N16` via [`keyed::KeyedMapping`], `N48` via [`indexed::IndexedMapping`],
/// `N256` via [`direct::DirectMapping`]).
pub(crate) trait NodeMapping<V> {
    fn new() -> Self;
    fn num_children(&self) -> usize;
    fn find_child(&self, key: u8) -> Option<&RadixNode<V>>;
    fn find_child_mut(&mut self, key: u8) -> Option<&mut RadixNode<V>>;
    fn set_child(&mut self, key: u8, child: RadixNode<V>);
    fn del_child(&mut self, key: u8) -> Option<RadixNode<V>>;
    fn next_partial_key(&self, from: u8) -> Option<u8>;
    fn prev_partial_key(&self, from: u8) -> Option<u8>;
    fn iter(&self) -> Box<dyn Iterator<Item = (u8, &RadixNode<V>)> + '_>;
    /// Drains every child for iterative teardown; see [`crate::tree::AdaptiveRadixTree`]'s `Drop` impl.
    fn take_all_children(&mut self) -> Vec<Box<RadixNode<V>>>;
}
