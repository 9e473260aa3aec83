use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use boundless_market::contracts::FulfillmentData;
use boundless_market::storage::{StorageUploaderConfig, StorageUploaderType};
use boundless_market::Client;
use even_number_core::{image_id_bytes, journal, ProofArtifacts, U256};
use even_number_methods::{EVEN_NUMBER_GUEST_ELF, EVEN_NUMBER_GUEST_ID};

use crate::prove::{dry_run, ensure_journal};
use crate::RemoteArgs;

/// Requests a Groth16 proof for `value` from the Boundless market.
pub async fn run(value: U256, args: &RemoteArgs) -> Result<ProofArtifacts> {
    // 1. Execute the real guest first so unprovable requests never reach the market.
    //    Guest stdin is the raw journal encoding of the value.
    let cycles = dry_run(value).context("dry run failed, not submitting")?;
    tracing::info!(mcycles = cycles.div_ceil(1_000_000), "guest executed locally");
    let stdin_bytes = journal::encode(value).to_vec();

    // 2. Configuration
    let rpc_url: url::Url = args
        .rpc_url
        .as_deref()
        .context("RPC_URL required (e.g. https://sepolia.base.org)")?
        .parse()
        .context("invalid RPC_URL")?;
    let private_key: alloy::signers::local::PrivateKeySigner = args
        .private_key
        .as_deref()
        .context("PRIVATE_KEY required (hex with 0x prefix)")?
        .parse()
        .context("invalid PRIVATE_KEY")?;
    let pinata_jwt = args
        .pinata_jwt
        .clone()
        .context("PINATA_JWT required for uploading ELF/input to IPFS")?;

    // 3. Storage for the guest image and input
    let storage_config = StorageUploaderConfig::builder()
        .storage_uploader(StorageUploaderType::Pinata)
        .pinata_jwt(pinata_jwt)
        .build()
        .context("failed to build storage config")?;

    // 4. Client
    tracing::info!(%rpc_url, "connecting to Boundless market");
    let client = Client::builder()
        .with_rpc_url(rpc_url)
        .with_uploader_config(&storage_config)
        .await
        .context("failed to configure storage uploader")?
        .with_private_key(private_key)
        .build()
        .await
        .context("failed to build Boundless client")?;

    // 5. Submit
    let request = client
        .new_request()
        .with_program(EVEN_NUMBER_GUEST_ELF)
        .with_stdin(stdin_bytes)
        .with_groth16_proof();
    let (request_id, expires_at) = client
        .submit_onchain(request)
        .await
        .context("failed to submit proof request")?;
    tracing::info!(request_id = %format!("{request_id:x}"), expires_at, "request submitted");

    // 6. Wait for fulfillment
    let start = Instant::now();
    let fulfillment = client
        .wait_for_request_fulfillment(request_id, Duration::from_secs(5), expires_at)
        .await
        .context("proof generation failed or timed out")?;
    tracing::info!(elapsed_s = start.elapsed().as_secs_f64(), "request fulfilled");

    // 7. Seal already carries its selector; the journal must be exactly ours
    let seal = fulfillment.seal.to_vec();
    let journal_bytes: Vec<u8> = match fulfillment
        .data()
        .context("failed to decode fulfillment data")?
    {
        FulfillmentData::ImageIdAndJournal(_, journal) => journal.to_vec(),
        _ => bail!("unexpected fulfillment data type (expected ImageIdAndJournal)"),
    };
    ensure_journal(&journal_bytes, value).context("fulfilled journal mismatch")?;

    Ok(ProofArtifacts::new(
        &seal,
        &image_id_bytes(&EVEN_NUMBER_GUEST_ID),
        value,
    ))
}
