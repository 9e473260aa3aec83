#![no_main]

risc0_zkvm::guest::entry!(main);

use std::io::Read;

use even_number_core::program;

/// Input (stdin): one big-endian uint256.
/// Output (journal): the same 32 bytes, only if the number is even.
fn main() {
    let c0 = risc0_zkvm::guest::env::cycle_count();

    let mut input = Vec::with_capacity(even_number_core::JOURNAL_LEN);
    risc0_zkvm::guest::env::stdin()
        .read_to_end(&mut input)
        .expect("failed to read input");

    let journal = program::evaluate(&input).unwrap_or_else(|e| panic!("{e}"));

    let c1 = risc0_zkvm::guest::env::cycle_count();
    risc0_zkvm::guest::env::log(&format!("CYCLES: total={}", c1 - c0));

    risc0_zkvm::guest::env::commit_slice(&journal);
}
