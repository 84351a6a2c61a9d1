#![allow(dead_code)]

use probing_table::{ProbeMode, ProbingTable};

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

// Run the test on different configurations of a `ProbingTable`.
pub fn with_table<K, V>(mut test: impl FnMut(&dyn Fn() -> ProbingTable<K, V>)) {
    with_table_and_hasher::<K, V, RandomState>(|table| test(table));
}

// Run the test on different configurations of a `ProbingTable` using the hasher `S`.
pub fn with_table_and_hasher<K, V, S>(mut test: impl FnMut(&dyn Fn() -> ProbingTable<K, V, S>))
where
    S: BuildHasher + Default,
{
    for mode in [ProbeMode::Linear, ProbeMode::DoubleHash] {
        // The defaults: 8 slots, grow at 75%.
        test(
            &(|| {
                ProbingTable::builder()
                    .probe_mode(mode)
                    .hasher(S::default())
                    .build()
                    .unwrap()
            }),
        );

        // A single slot with a low threshold, so nearly every insert grows the table.
        test(
            &(|| {
                ProbingTable::builder()
                    .capacity(1)
                    .load_factor_threshold(0.25)
                    .probe_mode(mode)
                    .hasher(S::default())
                    .build()
                    .unwrap()
            }),
        );

        // A prime capacity with a high threshold to promote long probe sequences.
        test(
            &(|| {
                ProbingTable::builder()
                    .capacity(31)
                    .load_factor_threshold(0.95)
                    .probe_mode(mode)
                    .hasher(S::default())
                    .build()
                    .unwrap()
            }),
        );
    }
}

// Prints a log message if `RUST_LOG=debug` is set.
#[macro_export]
macro_rules! debug {
    ($($x:tt)*) => {
        if std::env::var("RUST_LOG").as_deref() == Ok("debug") {
            println!($($x)*);
        }
    };
}
