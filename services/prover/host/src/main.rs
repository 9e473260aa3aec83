use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use even_number_core::{image_id_bytes, journal, parse_value, ProofArtifacts, U256};
use even_number_methods::EVEN_NUMBER_GUEST_ID;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "boundless")]
mod boundless;
mod prove;

/// Prover host for the EvenNumber contract.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the guest image ID (export it as EVEN_NUMBER_IMAGE_ID when building the contract).
    ImageId,
    /// Print the journal and journal digest the contract expects for a value.
    Encode {
        /// Decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_value)]
        value: U256,
    },
    /// Prove that a value is even and write proof artifacts.
    Prove {
        /// Decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_value)]
        value: U256,
        /// STARK proof only; the seal is left empty and cannot be submitted on chain.
        #[arg(long)]
        local: bool,
        /// Request the proof from the Boundless market (needs `--features boundless`).
        #[arg(long, conflicts_with = "local")]
        boundless: bool,
        #[arg(long, default_value = "proof_artifacts.json")]
        out: PathBuf,
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Re-check a proof artifacts file against its value.
    Check {
        #[arg(default_value = "proof_artifacts.json")]
        path: PathBuf,
    },
}

/// Boundless market settings.
#[derive(Args)]
#[cfg_attr(not(feature = "boundless"), allow(dead_code))]
pub(crate) struct RemoteArgs {
    #[arg(long, env = "RPC_URL")]
    pub(crate) rpc_url: Option<String>,
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub(crate) private_key: Option<String>,
    #[arg(long, env = "PINATA_JWT", hide_env_values = true)]
    pub(crate) pinata_jwt: Option<String>,
}

#[cfg(feature = "boundless")]
fn prove_remote(value: U256, remote: &RemoteArgs) -> Result<ProofArtifacts> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(boundless::run(value, remote))
}

#[cfg(not(feature = "boundless"))]
fn prove_remote(_value: U256, _remote: &RemoteArgs) -> Result<ProofArtifacts> {
    anyhow::bail!("Boundless feature not enabled; rebuild with --features boundless")
}

/// Loads `.env` (or `dotenv_path`) and builds the log filter from the resulting `RUST_LOG`.
/// Variables already set in the process win over the file.
fn log_filter(dotenv_path: Option<&Path>) -> EnvFilter {
    // .env first so RUST_LOG from it reaches the filter
    match dotenv_path {
        Some(path) => dotenvy::from_path(path).ok(),
        None => dotenvy::dotenv().ok().map(|_| ()),
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter(None)).init();

    match Cli::parse().command {
        Command::ImageId => {
            println!("{}", hex::encode(image_id_bytes(&EVEN_NUMBER_GUEST_ID)));
        }
        Command::Encode { value } => {
            let bytes = journal::encode(value);
            println!("Journal: {}", hex::encode(bytes));
            println!("Digest:  {}", hex::encode(journal::digest(&bytes)));
        }
        Command::Prove {
            value,
            local,
            boundless,
            out,
            remote,
        } => {
            let artifacts = if boundless {
                prove_remote(value, &remote)?
            } else {
                prove::run_local(value, !local)?
            };
            artifacts.write(&out)?;
            tracing::info!(path = %out.display(), "artifacts written");

            if artifacts.seal.is_empty() {
                println!("=== Artifacts written (dev/STARK mode, not submittable on-chain) ===");
            } else {
                println!("=== Ready for Soroban submission ===");
            }
            println!("Value:   {}", artifacts.value);
            println!("Digest:  {}", artifacts.journal_digest);
            println!("ImageId: {}", artifacts.image_id);
        }
        Command::Check { path } => {
            let artifacts = ProofArtifacts::read(&path)?;
            let value = artifacts.check()?;
            let expected = hex::encode(image_id_bytes(&EVEN_NUMBER_GUEST_ID));
            if artifacts.image_id != expected {
                tracing::warn!(
                    recorded = %artifacts.image_id,
                    %expected,
                    "artifacts were proven for another guest build"
                );
            }
            println!("OK: {} proves {value}", path.display());
        }
    }

    Ok(())
}
