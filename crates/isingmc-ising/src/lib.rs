#![deny(missing_docs)]

//! Ising model on arbitrary graphs and on the periodic square lattice, with
//! a Metropolis single-flip sampler, YAML run configuration and a
//! temperature sweep driver.

/// Run and sweep configuration.
pub mod config;
/// Periodic square lattice builder.
pub mod lattice;
/// Spins, interactions and the cached Hamiltonian.
pub mod model;
/// Run driver and temperature sweep.
pub mod run;
/// Adapter between the model and the generic sampler.
pub mod sampler;

pub use config::{
    LatticeConfig, RunConfig, SeedPolicy, SweepConfig, TemperatureGrid, TemperatureRange,
};
pub use lattice::IsingModel2D;
pub use model::{random_spin, HamiltonianCache, Interaction, IsingModel, IsingSite, Spin};
pub use run::{critical_temperature, run, temperature_sweep, RunSummary, SweepPoint};
pub use sampler::{ising2d_sampler, metropolis_acceptance, FlipSite, IsingMcmcState, Observable};
