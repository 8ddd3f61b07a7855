use isingmc_core::RngHandle;
use isingmc_ising::{HamiltonianCache, IsingModel, IsingModel2D, Spin};
use proptest::prelude::*;
use rand::Rng;

fn random_graph(seed: u64, sites: usize, bonds: usize) -> IsingModel {
    let mut rng = RngHandle::from_seed(seed);
    let mut model = IsingModel::with_random_spins(sites, &mut rng);
    for _ in 0..bonds {
        let a = rng.gen_range(0..sites);
        let b = rng.gen_range(0..sites);
        if a != b {
            model.add_interaction(a, b).unwrap();
        }
    }
    model
}

proptest! {
    #[test]
    fn incremental_energy_matches_full_recomputation(
        seed in any::<u64>(),
        sites in 2usize..30,
        bonds in 0usize..90,
        flips in prop::collection::vec(0usize..1_000, 1..60),
    ) {
        let mut model = random_graph(seed, sites, bonds);
        for raw in flips {
            let site = raw % sites;
            let predicted = model.flip_energy_change(site).unwrap();
            let before = model.hamiltonian();
            let applied = model.flip(site).unwrap();
            prop_assert_eq!(applied, predicted);
            prop_assert_eq!(model.hamiltonian(), before + applied);
            prop_assert_eq!(model.hamiltonian(), model.calculate_hamiltonian());
        }
    }

    #[test]
    fn double_flip_restores_energy_and_spin(seed in any::<u64>(), site in 0usize..25) {
        let mut rng = RngHandle::from_seed(seed);
        let mut lattice = IsingModel2D::new(5, None, &mut rng).unwrap();
        let model = lattice.model_mut();
        let energy = model.hamiltonian();
        let spin = model.spin(site).unwrap();
        let first = model.flip(site).unwrap();
        let second = model.flip(site).unwrap();
        prop_assert_eq!(first, -second);
        prop_assert_eq!(model.hamiltonian(), energy);
        prop_assert_eq!(model.spin(site).unwrap(), spin);
    }
}

#[test]
fn flips_keep_the_cache_valid() {
    let mut model = IsingModel::new([Spin::Up; 4]);
    for i in 0..4 {
        model.add_interaction(i, (i + 1) % 4).unwrap();
    }
    model.flip(2).unwrap();
    assert_eq!(model.cached_hamiltonian(), HamiltonianCache::Valid(0));
    assert_eq!(model.magnetization(), 2);
}
