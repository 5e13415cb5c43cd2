// Copyright (c) RankList Authors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    fmt,
    ptr,
};

use getset::{
    CopyGetters,
    Getters,
};
use tracing::{
    instrument,
    trace,
};

use crate::{
    errs::RankListError,
    level_generator::{
        GeometricalLevelGenerator,
        LevelGenerator,
    },
    ordering::OrderingPolicy,
    skipnode::{
        IntoIter,
        Iter,
        SkipNode,
    },
};

/// The default chance for a node to be replicated one level higher.
pub const DEFAULT_PROBABILITY: f64 = 0.25;
/// The default cap on tower heights.
pub const DEFAULT_MAX_HEIGHT: usize = 32;

/// An ordered, rank-indexed skip list.
///
/// Elements are kept in the total order defined by the injected
/// [`OrderingPolicy`] (score first, key as tie-break), and every forward
/// link carries a span counting the base-level nodes it skips. Summing
/// spans along any head-to-node path yields the node's 1-based rank, which
/// is what makes [`rank_of`] and [`node_at_rank`] expected `O(log n)`.
///
/// The list exclusively owns every node reachable from its head sentinel.
/// Ownership runs along the base level; all tower links and the backward
/// links are raw, non-owning mirrors of it. The structure is single
/// threaded: wrap it in a lock for shared use.
///
/// [`rank_of`]: RankList::rank_of
/// [`node_at_rank`]: RankList::node_at_rank
#[derive(Getters, CopyGetters)]
pub struct RankList<V, P> {
    // The sentinel anchoring all levels. Never stores a payload, never
    // participates in a comparison.
    head: Box<SkipNode<V>>,
    // The last real node, if any.
    tail: Option<*mut SkipNode<V>>,
    /// The number of stored elements.
    #[getset(get_copy = "pub")]
    len: usize,
    /// The highest level with at least one real node.
    #[getset(get_copy = "pub")]
    level: usize,
    /// The injected ordering capability.
    #[getset(get = "pub")]
    policy: P,
    level_generator: GeometricalLevelGenerator,
}

unsafe impl<V: Send, P: Send> Send for RankList<V, P> {}
unsafe impl<V: Sync, P: Sync> Sync for RankList<V, P> {}

impl<V, P> RankList<V, P>
where
    P: OrderingPolicy<V>,
{
    /// Create an empty list with the default tunables: branching
    /// probability 0.25 and a height cap of 32 levels.
    pub fn new(policy: P) -> Self {
        Self::with_params(policy, DEFAULT_MAX_HEIGHT, DEFAULT_PROBABILITY)
    }

    /// Create an empty list with explicit tunables.
    ///
    /// # Panics
    ///
    /// Panics when `max_height` is zero or `p` is outside `(0, 1)`.
    pub fn with_params(policy: P, max_height: usize, p: f64) -> Self {
        let lg = GeometricalLevelGenerator::new(max_height, p);
        RankList {
            head: Box::new(SkipNode::head(lg.total())),
            tail: None,
            len: 0,
            level: 1,
            policy,
            level_generator: lg,
        }
    }

    // a strictly precedes b: score, then key, both ascending.
    fn precedes(&self, a: &V, b: &V) -> bool {
        self.policy.order(a, b) == std::cmp::Ordering::Less
    }

    // a precedes-or-equals b; the exact-match stop condition for rank_of.
    fn precedes_or_matches(&self, a: &V, b: &V) -> bool {
        self.policy.order(a, b) != std::cmp::Ordering::Greater
    }

    // score and key both equal.
    fn matches(&self, a: &V, b: &V) -> bool {
        self.policy.order(a, b) == std::cmp::Ordering::Equal
    }

    /// Insert a payload at the position the ordering policy dictates and
    /// return the freshly spliced node.
    ///
    /// A payload whose score *and* key match an existing entry is rejected
    /// with [`RankListError::DuplicateEntry`] before any mutation.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: V) -> Result<&SkipNode<V>, RankListError> {
        let max_height = self.level_generator.total();
        let mut update: Vec<*mut SkipNode<V>> = vec![ptr::null_mut(); max_height];
        let mut rank = vec![0usize; max_height];

        unsafe {
            let head_ptr: *mut SkipNode<V> = &mut *self.head;

            // Descend through the levels, remembering at each one the
            // rightmost node preceding the insertion point and the rank it
            // sits at. rank[i] is seeded from the level above since a
            // level's starting rank is at most the higher level's.
            let mut cur = head_ptr;
            for i in (0..self.level).rev() {
                rank[i] = if i + 1 == self.level { 0 } else { rank[i + 1] };
                while let Some(next) = (&(*cur).links)[i] {
                    if !self.precedes((*next).value(), &value) {
                        break;
                    }
                    rank[i] += (&(*cur).spans)[i];
                    cur = next;
                }
                update[i] = cur;
            }

            if let Some(next) = (&(*update[0]).links)[0] {
                if self.matches((*next).value(), &value) {
                    return Err(RankListError::DuplicateEntry);
                }
            }

            let height = self.level_generator.random();
            if height > self.level {
                // The new top levels splice directly after the head, which
                // spans the whole list at those levels.
                for i in self.level..height {
                    rank[i] = 0;
                    update[i] = head_ptr;
                    (&mut (*update[i]).spans)[i] = self.len;
                }
                trace!(from = self.level, to = height, "raising active height");
                self.level = height;
            }

            // Splice into the base-level ownership chain first; the raw
            // pointer is taken once the box has settled into place.
            let mut node = Box::new(SkipNode::new(value, height));
            node.next = (*update[0]).next.take();
            (*update[0]).next = Some(node);
            let node_ptr: *mut SkipNode<V> = (*update[0])
                .next
                .as_mut()
                .map(|n| &mut **n as *mut SkipNode<V>)
                .expect("the node was just spliced into the chain");

            // Relink every level the new tower reaches, repairing spans
            // from the rank distances gathered on the way down.
            for i in 0..height {
                (&mut (*node_ptr).links)[i] = (&(*update[i]).links)[i];
                (&mut (*update[i]).links)[i] = Some(node_ptr);

                (&mut (*node_ptr).spans)[i] = (&(*update[i]).spans)[i] - (rank[0] - rank[i]);
                (&mut (*update[i]).spans)[i] = (rank[0] - rank[i]) + 1;
            }

            // Levels the tower does not reach still span across the new
            // node.
            for i in height..self.level {
                (&mut (*update[i]).spans)[i] += 1;
            }

            (*node_ptr).prev = if update[0] == head_ptr {
                None
            } else {
                Some(update[0])
            };
            if let Some(next) = (&(*node_ptr).links)[0] {
                (*next).prev = Some(node_ptr);
            } else {
                self.tail = Some(node_ptr);
            }

            self.len += 1;
            Ok(&*node_ptr)
        }
    }

    /// Remove the entry whose score and key both match `value`, returning
    /// the evicted payload. Returns `None`, with no mutation, when no such
    /// entry is stored.
    #[instrument(level = "trace", skip_all)]
    pub fn remove(&mut self, value: &V) -> Option<V> {
        let max_height = self.level_generator.total();
        let mut update: Vec<*mut SkipNode<V>> = vec![ptr::null_mut(); max_height];

        unsafe {
            let head_ptr: *mut SkipNode<V> = &mut *self.head;

            let mut cur = head_ptr;
            for i in (0..self.level).rev() {
                while let Some(next) = (&(*cur).links)[i] {
                    if !self.precedes((*next).value(), value) {
                        break;
                    }
                    cur = next;
                }
                update[i] = cur;
            }

            let target = (&(*update[0]).links)[0]?;
            if !self.matches((*target).value(), value) {
                return None;
            }

            // Unsplice level by level. Where the target is directly linked
            // its span folds into the predecessor's; everywhere else the
            // removed node was merely spanned.
            for i in (0..self.level).rev() {
                if (&(*update[i]).links)[i] == Some(target) {
                    // add before subtracting: the target's span is 0 when it
                    // is last at this level
                    (&mut (*update[i]).spans)[i] =
                        (&(*update[i]).spans)[i] + (&(*target).spans)[i] - 1;
                    (&mut (*update[i]).links)[i] = (&(*target).links)[i];
                } else {
                    (&mut (*update[i]).spans)[i] -= 1;
                }
            }

            if let Some(next) = (&(*target).links)[0] {
                (*next).prev = (*target).prev;
            } else {
                self.tail = (*target).prev;
            }

            let old_level = self.level;
            while self.level > 1 && (&(*head_ptr).links)[self.level - 1].is_none() {
                self.level -= 1;
            }
            if self.level < old_level {
                trace!(from = old_level, to = self.level, "shrinking active height");
            }

            self.len -= 1;

            // Detach the target from the ownership chain and release it.
            let mut removed = (*update[0])
                .next
                .take()
                .expect("the base-level chain must contain the target");
            (*update[0]).next = removed.next.take();
            removed.into_inner()
        }
    }

    /// The 1-based rank of the entry matching `value`, or `None` when the
    /// value is absent.
    pub fn rank_of(&self, value: &V) -> Option<usize> {
        let mut rank = 0;

        unsafe {
            let head_ptr: *const SkipNode<V> = &*self.head;

            let mut cur = head_ptr;
            for i in (0..self.level).rev() {
                while let Some(next) = (&(*cur).links)[i] {
                    if !self.precedes_or_matches((*next).value(), value) {
                        break;
                    }
                    rank += (&(*cur).spans)[i];
                    cur = next;
                }
            }

            // Equality is only decided once the descent has reached the
            // base level; a higher level may overshoot when several entries
            // share a score.
            if !ptr::eq(cur, head_ptr) && self.matches((*cur).value(), value) {
                return Some(rank);
            }
        }

        None
    }

    /// The node at 1-based `rank`, or `None` when the rank is out of range.
    ///
    /// A single descent carries the cursor and the traversed count down
    /// through the levels, so the lookup stays expected `O(log n)`.
    pub fn node_at_rank(&self, rank: usize) -> Option<&SkipNode<V>> {
        if rank == 0 || rank > self.len {
            return None;
        }

        let mut traversed = 0;
        unsafe {
            let mut cur: *const SkipNode<V> = &*self.head;
            for i in (0..self.level).rev() {
                while let Some(next) = (&(*cur).links)[i] {
                    if traversed + (&(*cur).spans)[i] > rank {
                        break;
                    }
                    traversed += (&(*cur).spans)[i];
                    cur = next;
                }
                if traversed == rank {
                    return Some(&*cur);
                }
            }
        }

        None
    }

    /// The payload at 1-based `rank`, or `None` when the rank is out of
    /// range.
    pub fn value_at_rank(&self, rank: usize) -> Option<&V> {
        self.node_at_rank(rank).map(SkipNode::value)
    }
}

impl<V, P> RankList<V, P> {
    /// `true` when no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first node in rank order, if any.
    pub fn front(&self) -> Option<&SkipNode<V>> {
        self.head.links[0].map(|ptr| unsafe { &*ptr })
    }

    /// The last node in rank order, if any.
    pub fn back(&self) -> Option<&SkipNode<V>> {
        self.tail.map(|ptr| unsafe { &*ptr })
    }

    /// Iterate over the payloads in rank order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            cur: self.front(),
            size: self.len,
        }
    }

    /// Drop every element and return to the freshly constructed state.
    pub fn clear(&mut self) {
        // Dropping the ownership chain releases every node; the head's
        // tower is then re-emptied by hand.
        self.head.next = None;
        for i in 0..self.head.links.len() {
            self.head.links[i] = None;
            self.head.spans[i] = 0;
        }
        self.tail = None;
        self.level = 1;
        self.len = 0;
    }
}

impl<V, P> fmt::Debug for RankList<V, P>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, V, P> IntoIterator for &'a RankList<V, P> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V, P> IntoIterator for RankList<V, P> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(mut self) -> IntoIter<V> {
        let first = self.head.next.take();
        let size = self.len;
        self.clear();
        IntoIter { first, size }
    }
}
