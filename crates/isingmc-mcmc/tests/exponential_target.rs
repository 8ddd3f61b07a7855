use isingmc_core::{IsingError, RngHandle};
use isingmc_mcmc::{BinningAnalysis, McmcState, Sampler, StateTransfer};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Random walk on the real line targeting `pi(x) = exp(-x)` for `x >= 0`.
struct ExpWalk {
    x: f64,
}

struct Jump {
    to: f64,
}

fn density(x: f64) -> f64 {
    if x >= 0.0 {
        (-x).exp()
    } else {
        0.0
    }
}

impl StateTransfer<ExpWalk> for Jump {
    fn accept_prob(&self, state: &ExpWalk) -> Result<f64, IsingError> {
        Ok((density(self.to) / density(state.x)).min(1.0))
    }
}

impl McmcState for ExpWalk {
    type Transfer = Jump;
    type Observable = f64;

    fn make_transfer<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Jump, IsingError> {
        let step = Normal::new(0.0, 1.0).unwrap();
        Ok(Jump {
            to: self.x + step.sample(rng),
        })
    }

    fn apply_transfer(&mut self, transfer: Jump) -> Result<(), IsingError> {
        self.x = transfer.to;
        Ok(())
    }

    fn observable(&mut self) -> f64 {
        self.x
    }
}

#[test]
fn chain_mean_matches_exponential_distribution() {
    let mut sampler = Sampler::new(ExpWalk { x: 1.0 }, RngHandle::from_seed(0xE1));
    sampler.sample(1_000, 1).unwrap();
    let samples = sampler.sample(200_000, 1).unwrap();

    assert!(samples.iter().all(|x| *x >= 0.0));
    let analysis = BinningAnalysis::new(&samples, None);
    let estimate = analysis.estimate();
    assert!(
        (estimate.mean - 1.0).abs() < 0.05,
        "mean {} too far from 1",
        estimate.mean
    );

    let variance =
        samples.iter().map(|x| (x - estimate.mean).powi(2)).sum::<f64>() / samples.len() as f64;
    assert!((variance - 1.0).abs() < 0.15, "variance {variance}");
}

#[test]
fn binning_error_grows_for_correlated_chain() {
    let mut sampler = Sampler::new(ExpWalk { x: 1.0 }, RngHandle::from_seed(0xE2));
    let samples = sampler.sample(1 << 16, 1).unwrap();
    let analysis = BinningAnalysis::new(&samples, Some(10));

    let first = analysis.levels[0].standard_error();
    let last = analysis.final_level().unwrap().standard_error();
    assert!(last > first, "expected {last} > {first}");
    assert!(sampler.stats().rate() > 0.2 && sampler.stats().rate() < 0.9);
}
