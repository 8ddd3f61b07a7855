use isingmc_core::{IsingError, RngHandle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::McmcState;

/// Proposal and acceptance counters accumulated by a [`Sampler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceStats {
    /// Number of propose / evaluate / decide cycles performed.
    pub proposed: u64,
    /// Number of cycles whose move was applied.
    pub accepted: u64,
}

impl AcceptanceStats {
    /// Records the outcome of one cycle.
    pub fn record(&mut self, accepted: bool) {
        self.proposed += 1;
        if accepted {
            self.accepted += 1;
        }
    }

    /// Fraction of accepted proposals, `0.0` before the first proposal.
    pub fn rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }
}

/// Drives one Markov chain and records its observable.
///
/// The sampler owns its state and random source; independent chains need
/// independent samplers with independently seeded sources.
#[derive(Debug)]
pub struct Sampler<S, R = RngHandle> {
    state: S,
    rng: R,
    stats: AcceptanceStats,
}

impl<S: McmcState, R: Rng> Sampler<S, R> {
    /// Creates a sampler around an initial state.
    pub fn new(state: S, rng: R) -> Self {
        Self {
            state,
            rng,
            stats: AcceptanceStats::default(),
        }
    }

    /// Performs a single transition attempt.
    pub fn step(&mut self) -> Result<bool, IsingError> {
        let accepted = self.state.transfer(&mut self.rng)?;
        self.stats.record(accepted);
        Ok(accepted)
    }

    /// Collects `nsamples` observables, performing `sample_interval`
    /// transition attempts before each one.
    ///
    /// `output[i]` reflects the state after `(i + 1) * sample_interval`
    /// attempts counted from the state at the time of the call.
    pub fn sample(
        &mut self,
        nsamples: usize,
        sample_interval: usize,
    ) -> Result<Vec<S::Observable>, IsingError> {
        debug!(nsamples, sample_interval, "sampling started");
        let before = self.stats;
        let mut observables = Vec::with_capacity(nsamples);
        for _ in 0..nsamples {
            for _ in 0..sample_interval {
                self.step()?;
            }
            observables.push(self.state.observable());
        }
        let run = AcceptanceStats {
            proposed: self.stats.proposed - before.proposed,
            accepted: self.stats.accepted - before.accepted,
        };
        debug!(
            proposed = run.proposed,
            accepted = run.accepted,
            acceptance_rate = run.rate(),
            "sampling finished"
        );
        Ok(observables)
    }

    /// Returns the current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns the current state for mutation.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Returns the counters accumulated since construction.
    pub fn stats(&self) -> &AcceptanceStats {
        &self.stats
    }

    /// Returns the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Consumes the sampler and returns the final state.
    pub fn into_state(self) -> S {
        self.state
    }

    /// Consumes the sampler and returns the final state and random source.
    pub fn into_parts(self) -> (S, R) {
        (self.state, self.rng)
    }
}
