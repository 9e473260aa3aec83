//! Journal encoding shared by the guest, the host and the contract tests.
//!
//! The guest commits exactly [`JOURNAL_LEN`] bytes: the value as a big-endian
//! `uint256`. The verifier is handed the SHA-256 of those bytes. Any drift
//! from the contract's encoder makes every proof fail verification.

use alloy_primitives::U256;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Byte length of an encoded journal.
pub const JOURNAL_LEN: usize = 32;

pub type Journal = [u8; JOURNAL_LEN];
pub type JournalDigest = [u8; 32];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("journal must be {JOURNAL_LEN} bytes, got {0}")]
    Length(usize),
}

/// Canonical journal for `value`.
pub fn encode(value: U256) -> Journal {
    value.to_be_bytes::<JOURNAL_LEN>()
}

/// Inverse of [`encode`]. Rejects anything that is not exactly one word.
pub fn decode(bytes: &[u8]) -> Result<U256, JournalError> {
    if bytes.len() != JOURNAL_LEN {
        return Err(JournalError::Length(bytes.len()));
    }
    Ok(U256::from_be_slice(bytes))
}

/// SHA-256 of the raw journal bytes.
pub fn digest(journal: &[u8]) -> JournalDigest {
    Sha256::digest(journal).into()
}

/// `digest(encode(value))`: the digest a receipt for `value` must carry.
pub fn journal_digest(value: U256) -> JournalDigest {
    digest(&encode(value))
}
