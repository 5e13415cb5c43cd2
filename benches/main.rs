use criterion::{
    criterion_group,
    criterion_main,
    Criterion,
};

mod ranklist;

// Group Benchmarks
criterion_group!(
    name = benches;
    config = Criterion::default();
    targets =
    crate::ranklist::insert,
    crate::ranklist::remove,
    crate::ranklist::rank_of,
    crate::ranklist::node_at_rank,
    crate::ranklist::iter,
);

// Benchmarks
criterion_main!(benches);
