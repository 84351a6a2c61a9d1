use probing_table::{Error, ProbingTable};
use rand::prelude::*;

use std::collections::{HashMap, HashSet};

mod common;
use common::with_table;

// Runs a random sequence of operations against both the table and `std::collections::HashMap`,
// checking that every result agrees.
fn check_against_std(
    table: &mut ProbingTable<u16, u32>,
    rng: &mut StdRng,
    ops: usize,
    keys: u16,
) {
    let mut model = HashMap::new();

    for _ in 0..ops {
        let key = rng.gen_range(0..keys);

        match rng.gen_range(0..10) {
            0..=4 => {
                let value = rng.gen();
                assert_eq!(table.set(key, value), Ok(model.insert(key, value)));
            }
            5..=7 => {
                let expected = model.remove(&key).ok_or(Error::KeyNotFound);
                assert_eq!(table.delete(&key), expected);
            }
            _ => {
                let expected = model.get(&key).ok_or(Error::KeyNotFound);
                assert_eq!(table.get(&key), expected);
            }
        }

        assert_eq!(table.len(), model.len());
        assert!(table.load_factor() < 1.0);
    }

    for (key, value) in model.iter() {
        assert_eq!(table.get(key), Ok(value));
    }

    let mut keys: Vec<_> = table.keys().copied().collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), model.len());
}

#[test]
fn model_stress() {
    const ITERATIONS: usize = if cfg!(miri) { 1 } else { 16 };
    const OPS: usize = if cfg!(miri) { 256 } else { 1 << 14 };

    with_table(|table| {
        for seed in 0..ITERATIONS as u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut table = table();

            // a small key space keeps the table dense with tombstones
            check_against_std(&mut table, &mut rng, OPS, 64);

            debug!(
                "seed {seed}: {} entries in {} slots",
                table.len(),
                table.capacity()
            );
        }
    });
}

#[test]
fn sparse_stress() {
    const ITERATIONS: usize = if cfg!(miri) { 1 } else { 8 };
    const OPS: usize = if cfg!(miri) { 256 } else { 1 << 14 };

    with_table(|table| {
        for seed in 0..ITERATIONS as u64 {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1 << 32));
            let mut table = table();
            check_against_std(&mut table, &mut rng, OPS, u16::MAX);
        }
    });
}

#[test]
fn churn_stress() {
    const ROUNDS: usize = if cfg!(miri) { 4 } else { 256 };
    const ENTRIES: usize = if cfg!(miri) { 16 } else { 64 };

    with_table::<usize, usize>(|table| {
        let mut table = table();

        // repeatedly delete and reinsert a fixed working set under shifting keys, so
        // tombstones keep accumulating and being purged
        for round in 0..ROUNDS {
            let base = round * ENTRIES;

            for i in base..base + ENTRIES {
                assert_eq!(table.set(i, i), Ok(None));
            }

            for i in base..base + ENTRIES {
                assert_eq!(table.delete(&i), Ok(i));
            }

            assert!(table.is_empty());
        }

        // the working set never exceeds `ENTRIES`, so growth is bounded
        assert!(table.capacity() <= 8 * ENTRIES.max(31));
    });
}

// there must be more things absent than present!
const SIZE: usize = if cfg!(miri) { 12 } else { 50_000 };

#[test]
fn get_absent() {
    let mut rng = StdRng::seed_from_u64(SIZE as u64);
    let present: HashSet<u64> = (0..SIZE).map(|_| rng.gen()).collect();

    with_table::<u64, ()>(|table| {
        let mut table = table();
        for &key in &present {
            table.set(key, ()).unwrap();
        }

        for _ in 0..SIZE {
            let key: u64 = rng.gen();
            assert_eq!(table.contains_key(&key), present.contains(&key));
        }
    });
}
