use std::path::Path;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::journal::{self, JournalError};

#[derive(Debug, Error)]
pub enum ArtifactsError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid value {0:?}")]
    Value(String),
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error("journal does not encode value {0}")]
    JournalMismatch(U256),
    #[error("journal digest does not match journal")]
    DigestMismatch,
}

/// Everything needed to call `set(value, seal)` on the contract, hex encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifacts {
    pub seal: String,
    pub image_id: String,
    pub journal: String,
    pub journal_digest: String,
    /// Decimal.
    pub value: String,
}

impl ProofArtifacts {
    pub fn new(seal: &[u8], image_id: &[u8; 32], value: U256) -> Self {
        let journal = journal::encode(value);
        Self {
            seal: hex::encode(seal),
            image_id: hex::encode(image_id),
            journal: hex::encode(journal),
            journal_digest: hex::encode(journal::digest(&journal)),
            value: value.to_string(),
        }
    }

    pub fn value(&self) -> Result<U256, ArtifactsError> {
        parse_value(&self.value)
    }

    pub fn seal_bytes(&self) -> Result<Vec<u8>, ArtifactsError> {
        Ok(hex::decode(&self.seal)?)
    }

    /// Recomputes journal and digest from `value` and compares them with the recorded ones.
    pub fn check(&self) -> Result<U256, ArtifactsError> {
        let value = self.value()?;
        let recorded = hex::decode(&self.journal)?;
        if journal::decode(&recorded)? != value {
            return Err(ArtifactsError::JournalMismatch(value));
        }
        if hex::decode(&self.journal_digest)? != journal::digest(&recorded) {
            return Err(ArtifactsError::DigestMismatch);
        }
        Ok(value)
    }

    pub fn to_json(&self) -> Result<String, ArtifactsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ArtifactsError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ArtifactsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ArtifactsError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Parses a decimal or `0x`-prefixed hex value.
pub fn parse_value(s: &str) -> Result<U256, ArtifactsError> {
    s.trim()
        .parse::<U256>()
        .map_err(|_| ArtifactsError::Value(s.to_owned()))
}

/// Image ID words as bytes, in the order verifiers and `EVEN_NUMBER_IMAGE_ID` expect.
pub fn image_id_bytes(words: &[u32; 8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (chunk, w) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&w.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProofArtifacts {
        ProofArtifacts::new(&[0xAB; 8], &[0x11; 32], U256::from(42u64))
    }

    #[test]
    fn new_fills_journal_and_digest() {
        let a = sample();
        assert_eq!(a.value, "42");
        assert_eq!(a.seal, "abababababababab");
        assert_eq!(a.journal, format!("{}2a", "00".repeat(31)));
        assert_eq!(
            a.journal_digest,
            "0a28e9ffef0073f9a6a674cf57ee77307f38f0f1bebb087888d9011ed0eeefdf"
        );
        assert_eq!(a.seal_bytes().unwrap(), vec![0xAB; 8]);
        assert_eq!(a.check().unwrap(), U256::from(42u64));
    }

    #[test]
    fn json_roundtrip() {
        let a = sample();
        let json = a.to_json().unwrap();
        assert!(json.contains("\"journal_digest\""));
        assert_eq!(ProofArtifacts::from_json(&json).unwrap(), a);
    }

    #[test]
    fn file_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("even-number-artifacts-{}.json", std::process::id()));
        let a = sample();
        a.write(&path).unwrap();
        let b = ProofArtifacts::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tampered_value_detected() {
        let mut a = sample();
        a.value = "44".into();
        assert!(matches!(
            a.check(),
            Err(ArtifactsError::JournalMismatch(v)) if v == U256::from(44u64)
        ));
    }

    #[test]
    fn tampered_digest_detected() {
        let mut a = sample();
        a.journal_digest = "00".repeat(32);
        assert!(matches!(a.check(), Err(ArtifactsError::DigestMismatch)));
    }

    #[test]
    fn truncated_journal_detected() {
        let mut a = sample();
        a.journal = "00".repeat(31);
        assert!(matches!(
            a.check(),
            Err(ArtifactsError::Journal(JournalError::Length(31)))
        ));
    }

    #[test]
    fn parse_value_forms() {
        assert_eq!(parse_value("12345678").unwrap(), U256::from(12_345_678u64));
        assert_eq!(parse_value("0x2a").unwrap(), U256::from(42u64));
        assert_eq!(parse_value(" 0 ").unwrap(), U256::ZERO);
        assert!(matches!(parse_value("-1"), Err(ArtifactsError::Value(_))));
        assert!(matches!(parse_value("even"), Err(ArtifactsError::Value(_))));
    }

    #[test]
    fn image_id_words_little_endian() {
        let bytes = image_id_bytes(&[0x04030201, 0, 0, 0, 0, 0, 0, 0x0d0c0b0a]);
        assert_eq!(bytes[..4], [1, 2, 3, 4]);
        assert_eq!(bytes[28..], [0x0a, 0x0b, 0x0c, 0x0d]);
    }
}
