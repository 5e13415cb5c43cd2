//! A rank-indexed skip list, the kind of structure that backs leaderboards
//! and sorted-set indexes.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//! Every forward link additionally records how many base-level nodes it
//! skips, which is what makes the two rank lookups (`rank_of` and
//! `node_at_rank`) expected `O(log n)` instead of a full scan.
//!
//! Elements are opaque payloads ordered by a caller-supplied
//! [`OrderingPolicy`]: a primary three-way comparison on a "score" axis and a
//! secondary tie-break on a "key" axis. The list never inspects payloads in
//! any other way.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`). It is very unlikely that this will need to be changed
//! as the default should suffice, but if need be custom parameters can be
//! passed to [`RankList::with_params`].

/// Errors surfaced by mutating operations.
pub mod errs;
/// Randomized tower-height sampling.
pub mod level_generator;
/// The caller-supplied ordering capability.
pub mod ordering;
/// The list aggregate and the four core algorithms.
pub mod skiplist;
/// Node representation and iterators.
pub mod skipnode;

pub use crate::{
    errs::RankListError,
    ordering::OrderingPolicy,
    skiplist::RankList,
    skipnode::SkipNode,
};
