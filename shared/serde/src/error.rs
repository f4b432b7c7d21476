use thiserror::Error;

/// Errors that can occur while reading or writing byte streams
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Reader ran past the end of its buffer
    #[error("Unexpected end of buffer: needed {needed} bytes at offset {offset}, only {available} available")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A fixed-size writer was asked to hold more bytes than it has room for
    #[error("Writer overflow: attempted to write {attempted} bytes into a buffer of {capacity}")]
    Overflow { attempted: usize, capacity: usize },

    /// A decoded value is outside the domain of its type
    #[error("Invalid value {value} for {type_name}")]
    InvalidValue {
        type_name: &'static str,
        value: u64,
    },
}
