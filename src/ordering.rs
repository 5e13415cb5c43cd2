use std::cmp::Ordering;

/// The ordering capability a [`RankList`] is constructed with.
///
/// Payloads are compared on two axes: a primary "score" and a secondary
/// "key" used as the tie-break when scores are equal. Together they **must**
/// form a strict total order over the stored payloads:
///
/// - Be well defined: comparing the same pair should always return the same
///   value for the lifetime of any single operation.
/// - Be anti-symmetric: `cmp(a, b) == Greater` if and only if
///   `cmp(b, a) == Less`, and `cmp(a, b) == Equal == cmp(b, a)`.
/// - Be transitive: if `cmp(a, b) == Greater` and `cmp(b, c) == Greater`
///   then `cmp(a, c) == Greater`.
///
/// Comparisons must be pure: no side effects, and never a mutation of the
/// list they serve.
///
/// [`RankList`]: crate::skiplist::RankList
pub trait OrderingPolicy<V> {
    /// Primary comparison.
    fn cmp_score(&self, a: &V, b: &V) -> Ordering;

    /// Secondary comparison, consulted only when the scores are equal.
    fn cmp_key(&self, a: &V, b: &V) -> Ordering;

    /// The combined total order: score first, key as tie-break.
    fn order(&self, a: &V, b: &V) -> Ordering {
        self.cmp_score(a, b).then_with(|| self.cmp_key(a, b))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::ordering::OrderingPolicy;

    #[derive(Debug, PartialEq)]
    struct Entry {
        key: u64,
        score: u64,
    }

    struct ByScoreThenKey;

    impl OrderingPolicy<Entry> for ByScoreThenKey {
        fn cmp_score(&self, a: &Entry, b: &Entry) -> Ordering {
            a.score.cmp(&b.score)
        }

        fn cmp_key(&self, a: &Entry, b: &Entry) -> Ordering {
            a.key.cmp(&b.key)
        }
    }

    #[test]
    fn test_key_breaks_score_ties() {
        let policy = ByScoreThenKey;
        let a = Entry { key: 1, score: 10 };
        let b = Entry { key: 3, score: 10 };
        let c = Entry { key: 2, score: 5 };

        assert_eq!(policy.order(&a, &b), Ordering::Less);
        assert_eq!(policy.order(&b, &a), Ordering::Greater);
        assert_eq!(policy.order(&c, &a), Ordering::Less);
        assert_eq!(policy.order(&a, &a), Ordering::Equal);
    }
}
