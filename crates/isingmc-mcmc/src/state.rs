use isingmc_core::errors::ErrorInfo;
use isingmc_core::{uniform_unit, IsingError};
use rand::Rng;

/// A proposed move of a Markov chain.
///
/// Proposals must be symmetric: no Hastings correction is applied, so the
/// probability of proposing `a -> b` has to equal that of `b -> a`.
pub trait StateTransfer<S: ?Sized> {
    /// Probability in `[0, 1]` of accepting this move from `state`.
    ///
    /// Must depend on the current state only and must not mutate it.
    fn accept_prob(&self, state: &S) -> Result<f64, IsingError>;
}

/// Simulation state driven by the Metropolis rule.
pub trait McmcState {
    /// Move type proposed by this state.
    type Transfer: StateTransfer<Self>;
    /// Value recorded for every retained sample.
    type Observable;

    /// Proposes a candidate move without side effects on the state.
    fn make_transfer<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Transfer, IsingError>;

    /// Applies an accepted move.
    ///
    /// Called with the same pre-transition state that produced the acceptance
    /// probability.
    fn apply_transfer(&mut self, transfer: Self::Transfer) -> Result<(), IsingError>;

    /// Reads the observable for the current state.
    ///
    /// Takes `&mut self` so implementations may materialize lazy caches.
    fn observable(&mut self) -> Self::Observable;

    /// Runs one propose / evaluate / decide cycle and reports whether the move
    /// was accepted.
    ///
    /// A uniform `u` in `[0, 1)` is drawn for every proposal and the move is
    /// applied when `u <= p`.
    fn transfer<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, IsingError>
    where
        Self: Sized,
    {
        let transfer = self.make_transfer(rng)?;
        let prob = check_probability(transfer.accept_prob(self)?)?;
        if uniform_unit(rng) <= prob {
            self.apply_transfer(transfer)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Rejects acceptance probabilities that are NaN or outside `[0, 1]`.
pub fn check_probability(prob: f64) -> Result<f64, IsingError> {
    if (0.0..=1.0).contains(&prob) {
        Ok(prob)
    } else {
        Err(IsingError::Sampling(
            ErrorInfo::new(
                "invalid-acceptance",
                "acceptance probability must lie in [0, 1]",
            )
            .with_context("probability", prob)
            .with_hint("transitions should return min(1, ratio) for ratios above one"),
        ))
    }
}
