use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntegerError>;

/// Everything that can go wrong while building or combining [`Integer`](crate::Integer)s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegerError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid shift amount {shift}: shift must not be negative")]
    InvalidShift { shift: i64 },

    #[error("failed to parse {input:?} as a decimal integer: {reason}")]
    ParseError { input: String, reason: &'static str },

    #[error("out of memory growing limb buffer to {limbs} limbs")]
    OutOfMemory { limbs: usize },
}

impl IntegerError {
    pub(crate) fn parse(input: &str, reason: &'static str) -> IntegerError {
        IntegerError::ParseError { input: input.to_string(), reason }
    }
}
