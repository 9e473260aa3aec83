//! Logic of the trusted guest program.
//!
//! Parity is enforced here, inside the proven computation. The contract only
//! checks that a journal came from this program and never re-checks evenness.

use alloy_primitives::U256;
use thiserror::Error;

use crate::journal::{self, Journal, JournalError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgramError {
    #[error("invalid input: {0}")]
    Input(#[from] JournalError),
    #[error("number is not even: {0}")]
    NotEven(U256),
}

pub fn is_even(value: U256) -> bool {
    !value.bit(0)
}

/// Runs the guest logic on raw input bytes and returns the journal to commit.
///
/// Input and journal share the same encoding: one big-endian `uint256`.
pub fn evaluate(input: &[u8]) -> Result<Journal, ProgramError> {
    let value = journal::decode(input)?;
    if !is_even(value) {
        return Err(ProgramError::NotEven(value));
    }
    Ok(journal::encode(value))
}
