use std::fmt;

use isingmc_core::errors::ErrorInfo;
use isingmc_core::{fair_coin, IsingError, VertexId};
use isingmc_graph::{EdgeInsert, Graph};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Orientation of a single spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Spin {
    /// Spin value `-1`.
    Down,
    /// Spin value `+1`.
    Up,
}

impl Spin {
    /// Returns the numeric spin value, `-1` or `+1`.
    pub const fn value(self) -> i64 {
        match self {
            Spin::Down => -1,
            Spin::Up => 1,
        }
    }

    /// Returns the opposite orientation.
    pub const fn flipped(self) -> Self {
        match self {
            Spin::Down => Spin::Up,
            Spin::Up => Spin::Down,
        }
    }
}

impl From<Spin> for i64 {
    fn from(spin: Spin) -> Self {
        spin.value()
    }
}

impl TryFrom<i64> for Spin {
    type Error = IsingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Spin::Down),
            1 => Ok(Spin::Up),
            other => Err(IsingError::Config(
                ErrorInfo::new("invalid-spin", "spin must be -1 or +1").with_context("value", other),
            )),
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value())
    }
}

/// Draws `Up` or `Down` with equal probability.
pub fn random_spin<R: Rng + ?Sized>(rng: &mut R) -> Spin {
    if fair_coin(rng) {
        Spin::Up
    } else {
        Spin::Down
    }
}

/// Vertex payload of an Ising model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsingSite {
    /// Current orientation.
    pub spin: Spin,
}

/// Ferromagnetic nearest-neighbour bond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction;

impl Interaction {
    /// Energy contribution `-s_head * s_tail`.
    pub fn energy(&self, head: Spin, tail: Spin) -> i64 {
        -(head.value() * tail.value())
    }
}

/// State of the lazily computed total energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HamiltonianCache {
    /// Topology changed since the last full computation.
    Stale,
    /// Energy consistent with the current spins and bonds.
    Valid(i64),
}

/// Spins on the vertices of an arbitrary graph, coupled along its edges.
///
/// The total energy is cached; it is recomputed in full after a topology
/// change and updated incrementally on every flip.
#[derive(Debug, Clone)]
pub struct IsingModel {
    graph: Graph<IsingSite, Interaction>,
    hamiltonian: HamiltonianCache,
}

impl IsingModel {
    /// Creates a model without interactions, one site per spin.
    pub fn new(spins: impl IntoIterator<Item = Spin>) -> Self {
        Self {
            graph: Graph::from_vertices(spins.into_iter().map(|spin| IsingSite { spin })),
            hamiltonian: HamiltonianCache::Stale,
        }
    }

    /// Creates `sites` independently and uniformly oriented spins.
    pub fn with_random_spins<R: Rng + ?Sized>(sites: usize, rng: &mut R) -> Self {
        Self::new((0..sites).map(|_| random_spin(rng)).collect::<Vec<_>>())
    }

    /// Couples sites `i` and `j`.
    ///
    /// Out-of-range indices and self-interactions are rejected without
    /// touching the model. Requesting an existing bond is a no-op.
    pub fn add_interaction(&mut self, i: usize, j: usize) -> Result<EdgeInsert, IsingError> {
        self.check_site(i)?;
        self.check_site(j)?;
        if i == j {
            return Err(IsingError::Topology(
                ErrorInfo::new("self-interaction", "a site cannot interact with itself")
                    .with_context("site", i),
            ));
        }
        let insert = self
            .graph
            .add_edge_with(VertexId::new(i), VertexId::new(j), |_, _| Interaction)?;
        match insert {
            EdgeInsert::Added(_) => self.hamiltonian = HamiltonianCache::Stale,
            EdgeInsert::Existing(edge) => trace!(i, j, edge = edge.index(), "bond already present"),
        }
        Ok(insert)
    }

    /// Number of sites.
    pub fn site_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Number of interactions.
    pub fn interaction_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Spin of site `i`.
    pub fn spin(&self, i: usize) -> Result<Spin, IsingError> {
        self.check_site(i)?;
        Ok(self.graph.vertex(VertexId::new(i))?.spin)
    }

    /// All spins in site order.
    pub fn spins(&self) -> impl ExactSizeIterator<Item = Spin> + '_ {
        self.graph.vertices().map(|(_, site)| site.spin)
    }

    /// Sum of the energies of the interactions incident to site `i`.
    pub fn site_energy(&self, i: usize) -> Result<i64, IsingError> {
        let here = self.spin(i)?;
        let mut energy = 0;
        for (edge, other) in self.graph.neighbours(VertexId::new(i))? {
            let there = self.graph.vertex(other)?.spin;
            energy += self.graph.edge(edge)?.data.energy(here, there);
        }
        Ok(energy)
    }

    /// Energy change that flipping site `i` would cause.
    ///
    /// Flipping negates every term involving the site, so the change is
    /// `-2 * site_energy(i)`.
    pub fn flip_energy_change(&self, i: usize) -> Result<i64, IsingError> {
        Ok(-2 * self.site_energy(i)?)
    }

    /// Flips site `i` and returns the energy change that was applied.
    pub fn flip(&mut self, i: usize) -> Result<i64, IsingError> {
        let delta = self.flip_energy_change(i)?;
        let total = self.hamiltonian() + delta;
        let site = self.graph.vertex_mut(VertexId::new(i))?;
        site.spin = site.spin.flipped();
        self.hamiltonian = HamiltonianCache::Valid(total);
        Ok(delta)
    }

    /// Total energy, computed in full only when the cache is stale.
    pub fn hamiltonian(&mut self) -> i64 {
        match self.hamiltonian {
            HamiltonianCache::Valid(value) => value,
            HamiltonianCache::Stale => {
                let value = self.calculate_hamiltonian();
                self.hamiltonian = HamiltonianCache::Valid(value);
                value
            }
        }
    }

    /// Total energy summed over every interaction, ignoring the cache.
    pub fn calculate_hamiltonian(&self) -> i64 {
        let spins: Vec<Spin> = self.spins().collect();
        self.graph
            .edges()
            .map(|edge| edge.data.energy(spins[edge.head.index()], spins[edge.tail.index()]))
            .sum()
    }

    /// Current cache state.
    pub fn cached_hamiltonian(&self) -> HamiltonianCache {
        self.hamiltonian
    }

    /// Sum of all spin values.
    pub fn magnetization(&self) -> i64 {
        self.spins().map(Spin::value).sum()
    }

    /// Underlying graph, for inspection and visualization.
    pub fn graph(&self) -> &Graph<IsingSite, Interaction> {
        &self.graph
    }

    fn check_site(&self, i: usize) -> Result<(), IsingError> {
        if i < self.site_count() {
            Ok(())
        } else {
            Err(IsingError::out_of_range(
                "site-out-of-range",
                "site",
                i,
                self.site_count(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_conversions() {
        assert_eq!(Spin::try_from(1).unwrap(), Spin::Up);
        assert_eq!(Spin::try_from(-1).unwrap(), Spin::Down);
        assert_eq!(Spin::try_from(0).unwrap_err().code(), "invalid-spin");
        assert_eq!(i64::from(Spin::Down.flipped()), 1);
        assert_eq!(Spin::Up.to_string(), "+1");
    }

    #[test]
    fn cache_goes_stale_only_when_topology_changes() {
        let mut model = IsingModel::new([Spin::Up, Spin::Down, Spin::Up]);
        model.add_interaction(0, 1).unwrap();
        assert_eq!(model.hamiltonian(), 1);
        assert_eq!(model.cached_hamiltonian(), HamiltonianCache::Valid(1));

        let again = model.add_interaction(1, 0).unwrap();
        assert!(!again.is_added());
        assert_eq!(model.cached_hamiltonian(), HamiltonianCache::Valid(1));

        model.add_interaction(1, 2).unwrap();
        assert_eq!(model.cached_hamiltonian(), HamiltonianCache::Stale);
        assert_eq!(model.hamiltonian(), 2);
    }

    #[test]
    fn flip_materializes_a_stale_cache_first() {
        let mut model = IsingModel::new([Spin::Up, Spin::Up]);
        model.add_interaction(0, 1).unwrap();
        assert_eq!(model.cached_hamiltonian(), HamiltonianCache::Stale);

        assert_eq!(model.flip(0).unwrap(), 2);
        assert_eq!(model.cached_hamiltonian(), HamiltonianCache::Valid(1));
        assert_eq!(model.spin(0).unwrap(), Spin::Down);
    }

    #[test]
    fn out_of_range_site_is_an_index_error() {
        let mut model = IsingModel::new([Spin::Up; 2]);
        let err = model.flip(2).unwrap_err();
        assert!(matches!(err, IsingError::Index(_)));
        assert_eq!(err.code(), "site-out-of-range");
        assert_eq!(model.add_interaction(0, 5).unwrap_err().code(), "site-out-of-range");
        assert_eq!(model.interaction_count(), 0);
    }
}
