use std::fmt;

/// Errors reported by the fallible operations of a [`Sequence`].
///
/// A failing operation never mutates the sequence.
///
/// [`Sequence`]: crate::Sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceError {
    /// A position (or the end of a position range) lies outside the bounds
    /// of the sequence.
    OutOfRange {
        /// The offending position.
        index: usize,
        /// The length of the sequence at the time of the call.
        len: usize,
    },
    /// The operation needs at least one element.
    EmptyContainer,
    /// A ranged erase was requested with a zero count.
    InvalidArgument,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SequenceError::OutOfRange { index, len } => {
                write!(f, "position {} is out of range for a sequence of length {}", index, len)
            }
            SequenceError::EmptyContainer => f.write_str("the sequence is empty"),
            SequenceError::InvalidArgument => f.write_str("cannot erase a range of zero elements"),
        }
    }
}

impl std::error::Error for SequenceError {}
