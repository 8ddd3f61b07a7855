use isingmc_core::errors::ErrorInfo;
use isingmc_core::{uniform_index, IsingError};
use isingmc_mcmc::{McmcState, Sampler, StateTransfer};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::lattice::IsingModel2D;
use crate::model::{IsingModel, Spin};

/// Quantity recorded for every retained sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observable {
    /// Total energy (the Hamiltonian).
    #[default]
    Energy,
    /// Sum of all spins.
    Magnetization,
}

/// Metropolis acceptance probability for an energy change at inverse
/// temperature `beta`: `1` for `delta_e <= 0`, `exp(-beta * delta_e)` otherwise.
pub fn metropolis_acceptance(beta: f64, delta_e: i64) -> f64 {
    if delta_e <= 0 {
        1.0
    } else {
        (-beta * delta_e as f64).exp()
    }
}

/// Proposal to flip one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipSite {
    /// Site to flip.
    pub site: usize,
}

impl StateTransfer<IsingMcmcState> for FlipSite {
    fn accept_prob(&self, state: &IsingMcmcState) -> Result<f64, IsingError> {
        let delta = state.model.flip_energy_change(self.site)?;
        Ok(metropolis_acceptance(state.beta, delta))
    }
}

/// Ising model at a fixed inverse temperature, driven by single-site flips.
#[derive(Debug, Clone)]
pub struct IsingMcmcState {
    model: IsingModel,
    beta: f64,
    observable: Observable,
}

impl IsingMcmcState {
    /// Wraps `model` at inverse temperature `beta`, recording the energy.
    pub fn new(model: IsingModel, beta: f64) -> Result<Self, IsingError> {
        if !(beta.is_finite() && beta > 0.0) {
            return Err(IsingError::Config(
                ErrorInfo::new("invalid-config", "beta must be positive and finite")
                    .with_context("beta", beta),
            ));
        }
        if model.site_count() == 0 {
            return Err(IsingError::Config(ErrorInfo::new(
                "invalid-config",
                "cannot sample a model without sites",
            )));
        }
        Ok(Self {
            model,
            beta,
            observable: Observable::Energy,
        })
    }

    /// Selects the recorded observable.
    pub fn with_observable(mut self, observable: Observable) -> Self {
        self.observable = observable;
        self
    }

    /// Inverse temperature.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Recorded observable.
    pub fn observable_kind(&self) -> Observable {
        self.observable
    }

    /// Current model.
    pub fn model(&self) -> &IsingModel {
        &self.model
    }

    /// Current model for mutation.
    pub fn model_mut(&mut self) -> &mut IsingModel {
        &mut self.model
    }

    /// Consumes the state and returns the model.
    pub fn into_model(self) -> IsingModel {
        self.model
    }
}

impl McmcState for IsingMcmcState {
    type Transfer = FlipSite;
    type Observable = f64;

    fn make_transfer<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FlipSite, IsingError> {
        Ok(FlipSite {
            site: uniform_index(rng, self.model.site_count()),
        })
    }

    fn apply_transfer(&mut self, transfer: FlipSite) -> Result<(), IsingError> {
        self.model.flip(transfer.site).map(|_| ())
    }

    fn observable(&mut self) -> f64 {
        match self.observable {
            Observable::Energy => self.model.hamiltonian() as f64,
            Observable::Magnetization => self.model.magnetization() as f64,
        }
    }
}

/// Builds a sampler over a periodic `side x side` lattice at inverse
/// temperature `beta`. The lattice spins are drawn from `rng` when
/// `initial_spin` is `None`; `rng` then drives the chain.
pub fn ising2d_sampler<R: Rng>(
    beta: f64,
    side: usize,
    initial_spin: Option<Spin>,
    mut rng: R,
) -> Result<Sampler<IsingMcmcState, R>, IsingError> {
    let lattice = IsingModel2D::new(side, initial_spin, &mut rng)?;
    let state = IsingMcmcState::new(lattice.into_model(), beta)?;
    Ok(Sampler::new(state, rng))
}
