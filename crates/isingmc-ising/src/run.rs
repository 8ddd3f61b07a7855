use isingmc_core::{IsingError, RngHandle};
use isingmc_mcmc::{chain_rng, BinningAnalysis, BinningLevel, Estimate, Sampler};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{RunConfig, SweepConfig};
use crate::lattice::IsingModel2D;
use crate::sampler::{IsingMcmcState, Observable};

/// Critical temperature of the square-lattice Ising model, `2 / ln(1 + sqrt 2)`.
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + std::f64::consts::SQRT_2).ln()
}

/// Result of one sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Inverse temperature of the run.
    pub beta: f64,
    /// Number of samples entering the statistics.
    pub samples: usize,
    /// Observable the statistics refer to.
    pub observable: Observable,
    /// Mean and binning error of the observable.
    pub estimate: Estimate,
    /// Per-level binning spreads, finest first.
    pub levels: Vec<BinningLevel>,
    /// Fraction of accepted flips over the whole run, burn-in included.
    pub acceptance_rate: f64,
    /// Total energy of the final configuration.
    pub final_hamiltonian: i64,
}

/// Builds the lattice described by `config`, samples it and reduces the
/// observable sequence to an estimate.
pub fn run(config: &RunConfig) -> Result<RunSummary, IsingError> {
    config.validate()?;
    debug!(
        master_seed = config.seed_policy.master_seed,
        label = config.seed_policy.label.as_deref().unwrap_or(""),
        "run started"
    );
    let rng = RngHandle::from_seed(config.seed_policy.master_seed);
    run_chain(config, config.beta, rng)
}

/// One point of a temperature sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Temperature `T`.
    pub temperature: f64,
    /// Inverse temperature `1 / T`.
    pub beta: f64,
    /// Mean of the observable.
    pub mean: f64,
    /// Standard error from the coarsest binning level.
    pub error: f64,
    /// Fraction of accepted flips.
    pub acceptance_rate: f64,
}

/// Runs an independent chain per temperature, in input order.
///
/// Point `i` is seeded with substream `i` of the master seed, so every point
/// is reproducible on its own and no two points share a random stream.
pub fn temperature_sweep(config: &SweepConfig) -> Result<Vec<SweepPoint>, IsingError> {
    config.validate()?;
    let master_seed = config.base.seed_policy.master_seed;
    let temperatures = config.temperatures.values();
    let mut points = Vec::with_capacity(temperatures.len());
    for (index, temperature) in temperatures.into_iter().enumerate() {
        let beta = 1.0 / temperature;
        let summary = run_chain(&config.base, beta, chain_rng(master_seed, index))
            .map_err(|err| err.with_context("temperature", temperature))?;
        debug!(
            index,
            temperature,
            mean = summary.estimate.mean,
            error = summary.estimate.standard_error,
            "sweep point finished"
        );
        points.push(SweepPoint {
            temperature,
            beta,
            mean: summary.estimate.mean,
            error: summary.estimate.standard_error,
            acceptance_rate: summary.acceptance_rate,
        });
    }
    Ok(points)
}

fn run_chain(config: &RunConfig, beta: f64, mut rng: RngHandle) -> Result<RunSummary, IsingError> {
    let lattice = IsingModel2D::new(config.lattice.side, config.lattice.initial_spin, &mut rng)?;
    let state =
        IsingMcmcState::new(lattice.into_model(), beta)?.with_observable(config.observable);
    let mut sampler = Sampler::new(state, rng);

    sampler.sample(config.burn_in, config.sample_interval)?;
    let samples = sampler.sample(config.samples, config.sample_interval)?;
    let analysis = BinningAnalysis::new(&samples, config.max_binning_levels);
    let acceptance_rate = sampler.stats().rate();
    let final_hamiltonian = sampler.state_mut().model_mut().hamiltonian();

    Ok(RunSummary {
        beta,
        samples: samples.len(),
        observable: config.observable,
        estimate: analysis.estimate(),
        levels: analysis.levels,
        acceptance_rate,
        final_hamiltonian,
    })
}
