use thiserror::Error;

/// Errors returned by [`ProbingTable`](crate::ProbingTable) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The table was configured with a capacity or load factor threshold
    /// outside of the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The key is not present in the table.
    #[error("key not found")]
    KeyNotFound,

    /// An insert visited every slot in the probe sequence without finding
    /// a free one.
    ///
    /// Growth keeps at least one slot free, so this indicates a broken
    /// invariant rather than a full table.
    #[error("no free slot found after probing all {capacity} slots")]
    TableFull { capacity: usize },
}

/// A specialized `Result` type for table operations.
pub type Result<T> = std::result::Result<T, Error>;
