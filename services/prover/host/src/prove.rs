use std::time::Instant;

use anyhow::{ensure, Context, Result};
use even_number_core::{image_id_bytes, journal, program, ProofArtifacts, U256};
use even_number_methods::{EVEN_NUMBER_GUEST_ELF, EVEN_NUMBER_GUEST_ID};
use risc0_zkvm::{default_executor, default_prover, ExecutorEnv, ProverOpts, Receipt};

/// Executes the guest ELF on `value` without proving. Returns the cycle count.
///
/// Catches inputs the guest rejects, or a guest that drifted from `core`, before any
/// proving time or market fees are spent.
pub fn dry_run(value: U256) -> Result<u64> {
    let input = journal::encode(value);
    let env = ExecutorEnv::builder()
        .write_slice(&input)
        .build()
        .context("failed to build executor env")?;
    let session = default_executor()
        .execute(env, EVEN_NUMBER_GUEST_ELF)
        .context("guest execution failed")?;
    ensure_journal(&session.journal.bytes, value)?;

    let cycles = session.segments.iter().map(|s| 1u64 << s.po2).sum::<u64>();
    tracing::info!(%value, cycles, segments = session.segments.len(), "dry run ok");
    Ok(cycles)
}

/// The journal must be exactly the encoding of `value`.
pub fn ensure_journal(bytes: &[u8], value: U256) -> Result<()> {
    ensure!(
        bytes == journal::encode(value),
        "journal {} does not encode {value}",
        hex::encode(bytes)
    );
    Ok(())
}

/// Proves locally that `value` is even and returns the artifacts for `set(value, seal)`.
pub fn run_local(value: U256, use_groth16: bool) -> Result<ProofArtifacts> {
    // Same bytes are the guest input and the expected journal
    let input = journal::encode(value);
    program::evaluate(&input).context("guest would reject this input")?;

    let env = ExecutorEnv::builder()
        .write_slice(&input)
        .build()
        .context("failed to build executor env")?;

    let prover = default_prover();
    let opts = if use_groth16 {
        ProverOpts::groth16()
    } else {
        ProverOpts::default()
    };
    let mode = if use_groth16 { "Groth16" } else { "local STARK" };
    tracing::info!(%value, mode, "starting proof generation");

    let start = Instant::now();
    let prove_info = prover
        .prove_with_opts(env, EVEN_NUMBER_GUEST_ELF, &opts)
        .context("proof generation failed")?;
    tracing::info!(
        elapsed_s = start.elapsed().as_secs_f64(),
        segments = prove_info.stats.segments,
        total_cycles = prove_info.stats.total_cycles,
        user_cycles = prove_info.stats.user_cycles,
        "{mode} proof generated"
    );

    let receipt = prove_info.receipt;
    receipt
        .verify(EVEN_NUMBER_GUEST_ID)
        .context("receipt verification failed")?;
    ensure_journal(&receipt.journal.bytes, value)?;
    tracing::info!("receipt verified locally");

    let seal = if use_groth16 {
        onchain_seal(&receipt)
    } else {
        Vec::new()
    };
    Ok(ProofArtifacts::new(
        &seal,
        &image_id_bytes(&EVEN_NUMBER_GUEST_ID),
        value,
    ))
}

/// Groth16 seal prefixed with the 4-byte verifier selector used for routing on chain.
/// Empty when the receipt has no Groth16 seal (dev mode).
fn onchain_seal(receipt: &Receipt) -> Vec<u8> {
    match receipt.inner.groth16() {
        Ok(g) => {
            let mut seal = g.verifier_parameters.as_bytes()[..4].to_vec();
            seal.extend_from_slice(&g.seal);
            tracing::info!(bytes = seal.len(), "Groth16 seal extracted");
            seal
        }
        Err(_) => {
            tracing::warn!("no Groth16 seal (dev mode?), writing artifacts with empty seal");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_must_encode_value() {
        let value = U256::from(42u64);
        assert!(ensure_journal(&journal::encode(value), value).is_ok());
        assert!(ensure_journal(&journal::encode(U256::from(44u64)), value).is_err());
        assert!(ensure_journal(&[0u8; 31], U256::ZERO).is_err());
    }

    #[test]
    fn dry_run_executes_guest_on_even_value() {
        let cycles = dry_run(U256::from(12_345_678u64)).unwrap();
        assert!(cycles > 0);
    }

    #[test]
    fn dry_run_fails_when_guest_rejects() {
        assert!(dry_run(U256::from(7u64)).is_err());
    }

    #[test]
    fn prover_crates_not_built_for_size() {
        // The root release profile targets the Soroban wasm (opt-level "z")
        let manifest = include_str!("../../../../Cargo.toml");
        for package in ["even-number-guest", "even-number-host", "even-number-core"] {
            let section = format!("[profile.release.package.{package}]\nopt-level = 2\n");
            assert!(manifest.contains(&section), "missing speed override for {package}");
        }
    }
}
