#![doc = include_str!("../README.md")]

mod error;
mod raw;
mod table;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::{Error, Result};
pub use raw::ProbeMode;
pub use table::{Iter, Keys, ProbingTable, ProbingTableBuilder, Values};
