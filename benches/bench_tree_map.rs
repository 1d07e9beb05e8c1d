use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use corecol::TreeMap;

struct RandTestData {
    keys: Vec<usize>,
    get_idxs: Vec<usize>,
}

impl RandTestData {
    fn new(size: usize) -> Self {
        let mut rng = rand::thread_rng();

        RandTestData {
            keys: (0..size).map(|_| rng.gen()).collect(),
            get_idxs: (0..size).map(|_| rng.gen_range(0, size)).collect(),
        }
    }
}

fn insert_bench(c: &mut Criterion) {
    let rtd_100 = RandTestData::new(100);
    let rtd_1_000 = RandTestData::new(1_000);
    let rtd_10_000 = RandTestData::new(10_000);

    c.bench_function("tree_map_insert_100", |b| {
        b.iter(|| {
            let mut m = TreeMap::new();
            for k in &rtd_100.keys {
                m.insert(*k, *k);
            }
        })
    });

    c.bench_function("tree_map_insert_1_000", |b| {
        b.iter(|| {
            let mut m = TreeMap::new();
            for k in &rtd_1_000.keys {
                m.insert(*k, *k);
            }
        })
    });

    c.bench_function("tree_map_insert_10_000", |b| {
        b.iter(|| {
            let mut m = TreeMap::new();
            for k in &rtd_10_000.keys {
                m.insert(*k, *k);
            }
        })
    });
}

fn get_bench(c: &mut Criterion) {
    let rtd_1_000 = RandTestData::new(1_000);
    let mut m_1_000 = TreeMap::new();
    for k in &rtd_1_000.keys {
        m_1_000.insert(*k, *k);
    }

    c.bench_function("tree_map_get_1_000", |b| {
        b.iter(|| {
            for idx in &rtd_1_000.get_idxs {
                m_1_000.get(&rtd_1_000.keys[*idx]);
            }
        })
    });
}

criterion_group!(benches, insert_bench, get_bench);
criterion_main!(benches);
