#![no_std]

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype,
    crypto::Hash,
    log, panic_with_error, symbol_short, Address, Bytes, BytesN, Env, U256,
};

include!(concat!(env!("OUT_DIR"), "/image_id.rs"));

// ── Cross-contract clients ───────────────────────────────────────────────────

#[contractclient(name = "VerifierClient")]
pub trait VerifierInterface {
    fn verify(env: Env, seal: Bytes, image_id: BytesN<32>, journal: BytesN<32>);
}

// ── Storage types ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Verifier,
    ImageId,
    Number,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    VerificationFailed = 1,
    InvalidVerifier = 2,
}

// ── Journal layout ───────────────────────────────────────────────────────────
// 32 bytes: the value as a big-endian uint256 (ABI encoding of `uint256`).
// Must match `even_number_core::journal::encode` byte for byte.

fn encode_journal(value: &U256) -> Bytes {
    value.to_be_bytes()
}

fn journal_digest(env: &Env, value: &U256) -> BytesN<32> {
    let digest: Hash<32> = env.crypto().sha256(&encode_journal(value));
    BytesN::from_array(env, &digest.to_array())
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct EvenNumberContract;

#[contractimpl]
impl EvenNumberContract {
    /// Binds the verifier and pins [`IMAGE_ID`]. The number starts at 0.
    pub fn __constructor(env: Env, verifier: Address) {
        if verifier == env.current_contract_address() {
            panic_with_error!(&env, Error::InvalidVerifier);
        }
        let storage = env.storage().instance();
        storage.set(&DataKey::Verifier, &verifier);
        storage.set(&DataKey::ImageId, &BytesN::from_array(&env, &IMAGE_ID));
        storage.set(&DataKey::Number, &U256::from_u32(&env, 0));
    }

    /// Set the number, gated on a proof that the guest committed `value` as its journal.
    ///
    /// `seal`: RISC Zero seal, forwarded untouched to the verifier
    pub fn set(env: Env, value: U256, seal: Bytes) -> Result<(), Error> {
        // 1. Expected journal digest = SHA-256(journal(value))
        let digest = journal_digest(&env, &value);

        // 2. Verify against the pinned image ID. Any failure in the callee is a rejection.
        let verifier = VerifierClient::new(&env, &Self::verifier(env.clone()));
        let verified = verifier.try_verify(&seal, &Self::image_id(env.clone()), &digest);
        if !matches!(verified, Ok(Ok(()))) {
            log!(&env, "seal rejected");
            return Err(Error::VerificationFailed);
        }

        // 3. Commit and notify
        env.storage().instance().set(&DataKey::Number, &value);
        env.events().publish((symbol_short!("set"),), value);
        Ok(())
    }

    /// Current number.
    pub fn get(env: Env) -> U256 {
        env.storage()
            .instance()
            .get(&DataKey::Number)
            .unwrap_or_else(|| U256::from_u32(&env, 0))
    }

    pub fn image_id(env: Env) -> BytesN<32> {
        env.storage()
            .instance()
            .get(&DataKey::ImageId)
            .unwrap_or_else(|| BytesN::from_array(&env, &IMAGE_ID))
    }

    pub fn verifier(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Verifier)
            .unwrap_or_else(|| panic_with_error!(&env, Error::InvalidVerifier))
    }
}
