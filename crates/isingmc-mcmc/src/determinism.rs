use isingmc_core::{derive_substream_seed, RngHandle};

/// Derives the deterministic seed used for chain `chain_index` of a run.
pub fn chain_seed(master_seed: u64, chain_index: usize) -> u64 {
    derive_substream_seed(master_seed, chain_index as u64)
}

/// Builds the random source for chain `chain_index` of a run.
pub fn chain_rng(master_seed: u64, chain_index: usize) -> RngHandle {
    RngHandle::from_seed(chain_seed(master_seed, chain_index))
}
