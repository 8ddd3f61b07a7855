#![deny(missing_docs)]

//! Generic Metropolis sampling framework and statistics for correlated chains.
//!
//! A simulation state implements [`McmcState`]; the moves it proposes
//! implement [`StateTransfer`]. A [`Sampler`] owns one state plus its random
//! source and turns the chain into an ordered sequence of observables, which
//! [`error_binning`] / [`BinningAnalysis`] reduce to a (mean, error) estimate.

/// Binning analysis for serially correlated samples.
pub mod binning;
/// Deterministic seed derivation for independent chains.
pub mod determinism;
/// Sampling driver and acceptance bookkeeping.
pub mod sampler;
/// State and transition capability traits.
pub mod state;

pub use binning::{coarsen, error_binning, BinningAnalysis, BinningLevel, Estimate};
pub use determinism::{chain_rng, chain_seed};
pub use sampler::{AcceptanceStats, Sampler};
pub use state::{check_probability, McmcState, StateTransfer};
