//! Status codes returned by fallible arena, heap, and array operations.

use std::error::Error as StdError;
use std::fmt;

/// Recoverable failure of an arena, heap, or fixed-array operation.
///
/// Every failing operation leaves its receiver unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The arena has too little space left for the request.
    OutOfMemory,
    /// The heap holds no elements to remove or update.
    Empty,
    /// A handle, index, or capacity limit was violated.
    OutOfBounds,
    /// The handle is already queued in the heap.
    AlreadyExists,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "arena out of memory"),
            Self::Empty => write!(f, "heap is empty"),
            Self::OutOfBounds => write!(f, "handle or index out of bounds"),
            Self::AlreadyExists => write!(f, "handle already present in heap"),
        }
    }
}

impl StdError for Error {}
