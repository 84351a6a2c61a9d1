#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use probing_table::{Error, ProbeMode, ProbingTable};
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Arbitrary)]
enum Operation<K, V> {
    Set(K, V),
    Delete(K),
    Get(K),
    Contains(K),
    Clear,
    Len,
    IsEmpty,
    Update(K, V),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity: u8,
    threshold: u8,
    double_hash: bool,
    operations: Vec<Operation<u8, u32>>,
}

fn fuzz_table(input: FuzzInput) {
    let mode = if input.double_hash {
        ProbeMode::DoubleHash
    } else {
        ProbeMode::Linear
    };

    // map the threshold byte onto (0, 1)
    let threshold = (input.threshold as f64 + 1.0) / 257.0;

    let mut std_map = StdHashMap::new();
    let mut table = match ProbingTable::builder()
        .capacity(input.capacity as usize)
        .load_factor_threshold(threshold)
        .probe_mode(mode)
        .build()
    {
        Ok(table) => table,
        Err(Error::InvalidArgument(_)) => {
            assert_eq!(input.capacity, 0);
            return;
        }
        Err(err) => panic!("unexpected error: {err}"),
    };

    for op in input.operations {
        match op {
            Operation::Set(k, v) => {
                let std_result = std_map.insert(k, v);
                let table_result = table.set(k, v);
                assert_eq!(Ok(std_result), table_result);
            }
            Operation::Delete(k) => {
                let std_result = std_map.remove(&k).ok_or(Error::KeyNotFound);
                let table_result = table.delete(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Get(k) => {
                let std_result = std_map.get(&k).ok_or(Error::KeyNotFound);
                let table_result = table.get(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Contains(k) => {
                let std_result = std_map.contains_key(&k);
                let table_result = table.contains_key(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Clear => {
                std_map.clear();
                table.clear();
            }
            Operation::Len => {
                assert_eq!(std_map.len(), table.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), table.is_empty());
            }
            Operation::Update(k, v) => {
                let std_result = std_map.get_mut(&k).map(|e| {
                    *e = e.wrapping_add(v);
                    *e
                });
                let table_result = table.get_mut(&k).ok().map(|e| {
                    *e = e.wrapping_add(v);
                    *e
                });
                assert_eq!(std_result, table_result);
            }
        }

        assert!(table.load_factor() < 1.0);
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        let table_result = table.get(k);
        assert_eq!(Ok(v), table_result);
    }
    assert_eq!(std_map.len(), table.len());
    assert_eq!(std_map.is_empty(), table.is_empty());
}

fuzz_target!(|data: FuzzInput| {
    fuzz_table(data);
});
