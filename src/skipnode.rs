// Copyright (c) RankList Authors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    fmt,
    iter,
};

/// SkipNodes make up the [`RankList`]. The list owns the head sentinel
/// (which has no payload) and each node owns its base-level successor
/// through `next`.
///
/// The node has a `height` fixed when it is created, which is how many
/// levels it participates in; `links` and `spans` are parallel vectors of
/// exactly that length. `links[i]` is a non-owning pointer to the next node
/// reachable at level `i` (`links[0]` always points at the same node `next`
/// owns), and `spans[i]` counts how many base-level steps that link skips,
/// so that summing spans along any path from the head to a node yields the
/// node's 1-based rank.
///
/// `prev` mirrors the base level backwards and is `None` for the head and
/// for the first node.
///
/// [`RankList`]: crate::skiplist::RankList
pub struct SkipNode<V> {
    // None only for the head sentinel.
    pub(crate) value: Option<V>,
    // Number of levels this node participates in; immutable after creation.
    pub(crate) height: usize,
    // The immediately next element, and owner of that node.
    pub(crate) next: Option<Box<SkipNode<V>>>,
    // The immediately previous element.
    pub(crate) prev: Option<*mut SkipNode<V>>,
    // Non-owning forward links, one per level. links[0] points to the same
    // node as `next`.
    pub(crate) links: Vec<Option<*mut SkipNode<V>>>,
    // spans[i] is the number of base-level steps links[i] skips; for a node
    // with no forward target at level i it holds the distance to the end of
    // the list instead, which keeps the splice arithmetic uniform.
    pub(crate) spans: Vec<usize>,
}

impl<V> SkipNode<V> {
    /// Create a new head sentinel spanning `total_levels` levels.
    pub(crate) fn head(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            height: total_levels,
            next: None,
            prev: None,
            links: iter::repeat(None).take(total_levels).collect(),
            spans: iter::repeat(0).take(total_levels).collect(),
        }
    }

    /// Create a new SkipNode with the given payload and height. The links
    /// all start empty and are adjusted by the splice.
    pub(crate) fn new(value: V, height: usize) -> Self {
        SkipNode {
            value: Some(value),
            height,
            next: None,
            prev: None,
            links: iter::repeat(None).take(height).collect(),
            spans: iter::repeat(0).take(height).collect(),
        }
    }

    /// Consumes the node, returning the payload it contains.
    pub(crate) fn into_inner(mut self) -> Option<V> {
        self.value.take()
    }

    /// The payload stored in this node.
    ///
    /// # Panics
    ///
    /// Panics if called on the head sentinel, which the public API never
    /// hands out.
    pub fn value(&self) -> &V {
        self.value.as_ref().expect("the head sentinel has no payload")
    }

    /// How many levels this node participates in. Sampled once at insertion
    /// and never changed.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The base-level successor, if any.
    pub fn next(&self) -> Option<&SkipNode<V>> {
        self.links[0].map(|ptr| unsafe { &*ptr })
    }

    /// The base-level predecessor, or `None` if this node is first.
    pub fn prev(&self) -> Option<&SkipNode<V>> {
        self.prev.map(|ptr| unsafe { &*ptr })
    }
}

impl<V> Drop for SkipNode<V> {
    fn drop(&mut self) {
        // Unroll the ownership chain iteratively so a long list cannot
        // overflow the stack with recursive drops.
        while let Some(mut node) = self.next.take() {
            self.next = node.next.take();
        }
    }
}

impl<V> fmt::Debug for SkipNode<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipNode")
            .field("value", &self.value)
            .field("height", &self.height)
            .finish()
    }
}

// /////////////////////////////////
// Iterators
// /////////////////////////////////

/// Borrowed iterator over the payloads in base-level order.
pub struct Iter<'a, V> {
    pub(crate) cur: Option<&'a SkipNode<V>>,
    pub(crate) size: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let node = self.cur?;
        self.cur = node.next();
        self.size -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Consuming iterator.
pub struct IntoIter<V> {
    pub(crate) first: Option<Box<SkipNode<V>>>,
    pub(crate) size: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let mut popped = self.first.take()?;
        self.size -= 1;
        self.first = popped.next.take();
        popped.into_inner()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
