pub mod artifacts;
pub mod journal;
pub mod program;

pub use alloy_primitives::U256;
pub use artifacts::{image_id_bytes, parse_value, ArtifactsError, ProofArtifacts};
pub use journal::{journal_digest, Journal, JournalDigest, JournalError, JOURNAL_LEN};
pub use program::{evaluate, is_even, ProgramError};
