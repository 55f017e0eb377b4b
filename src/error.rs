use thiserror::Error;

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// The fixture has exactly one fallible operation: allocating a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixtureError {
    #[error("out of memory allocating {size} bytes")]
    OutOfMemory { size: usize },
}
