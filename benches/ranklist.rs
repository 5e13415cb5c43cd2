use std::cmp::Ordering;

use criterion::{
    black_box,
    Criterion,
};
use rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};
use ranklist::{
    OrderingPolicy,
    RankList,
};

#[derive(Debug, Clone, PartialEq, Eq)]
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

const N: u64 = 10_000;

fn filled(rng: &mut SmallRng) -> RankList<Entry, ByScoreThenKey> {
    let mut list = RankList::new(ByScoreThenKey);
    for key in 0..N {
        let score = rng.gen_range(0..1_000u64);
        list.insert(Entry { key, score }).unwrap();
    }
    list
}

pub fn insert(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    c.bench_function("RankList::insert", |b| {
        let mut list = RankList::new(ByScoreThenKey);
        let mut key = 0;
        b.iter(|| {
            let score = rng.gen_range(0..1_000u64);
            key += 1;
            list.insert(black_box(Entry { key, score })).unwrap();
        })
    });
}

pub fn remove(c: &mut Criterion) {
    c.bench_function("RankList::remove", |b| {
        b.iter_batched(
            || filled(&mut SmallRng::seed_from_u64(0xC0FFEE)),
            |mut list| {
                // replay the fill sequence so every remove hits
                let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
                for key in 0..N {
                    let score = rng.gen_range(0..1_000u64);
                    black_box(list.remove(&Entry { key, score }));
                }
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

pub fn rank_of(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    let list = filled(&mut SmallRng::seed_from_u64(0xC0FFEE));
    let stored: Vec<Entry> = list.iter().cloned().collect();
    c.bench_function("RankList::rank_of", |b| {
        b.iter(|| {
            let target = &stored[rng.gen_range(0..stored.len())];
            black_box(list.rank_of(target));
        })
    });
}

pub fn node_at_rank(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    let list = filled(&mut SmallRng::seed_from_u64(0xC0FFEE));
    c.bench_function("RankList::node_at_rank", |b| {
        b.iter(|| {
            let rank = rng.gen_range(1..=N) as usize;
            black_box(list.node_at_rank(rank));
        })
    });
}

pub fn iter(c: &mut Criterion) {
    let list = filled(&mut SmallRng::seed_from_u64(0xC0FFEE));
    c.bench_function("RankList::iter", |b| {
        b.iter(|| {
            for entry in list.iter() {
                black_box(entry);
            }
        })
    });
}
