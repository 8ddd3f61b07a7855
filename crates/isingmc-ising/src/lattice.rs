use isingmc_core::errors::ErrorInfo;
use isingmc_core::IsingError;
use isingmc_graph::EdgeInsert;
use rand::Rng;
use tracing::debug;

use crate::model::{random_spin, IsingModel, Spin};

/// Square `side x side` lattice with periodic boundaries.
///
/// Sites are numbered row-major: site `row * side + col`.
#[derive(Debug, Clone)]
pub struct IsingModel2D {
    side: usize,
    model: IsingModel,
}

impl IsingModel2D {
    /// Builds the lattice, using `initial_spin` everywhere or drawing every
    /// spin uniformly from `rng` when it is `None`.
    pub fn new<R: Rng + ?Sized>(
        side: usize,
        initial_spin: Option<Spin>,
        rng: &mut R,
    ) -> Result<Self, IsingError> {
        check_side(side)?;
        let sites = side * side;
        let spins: Vec<Spin> = match initial_spin {
            Some(spin) => vec![spin; sites],
            None => (0..sites).map(|_| random_spin(rng)).collect(),
        };
        Self::from_spins(side, spins)
    }

    /// Builds the lattice from row-major spins.
    pub fn from_spins(side: usize, spins: Vec<Spin>) -> Result<Self, IsingError> {
        check_side(side)?;
        if spins.len() != side * side {
            return Err(IsingError::Config(
                ErrorInfo::new("invalid-config", "spin count must equal side * side")
                    .with_context("side", side)
                    .with_context("spins", spins.len()),
            ));
        }
        let mut lattice = Self {
            side,
            model: IsingModel::new(spins),
        };
        for row in 0..side {
            for col in 0..side {
                lattice.add_bond(row, col, row, (col + 1) % side)?;
                lattice.add_bond(row, col, (row + 1) % side, col)?;
            }
        }
        debug!(
            side,
            sites = lattice.model.site_count(),
            interactions = lattice.model.interaction_count(),
            "lattice built"
        );
        Ok(lattice)
    }

    /// Side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Linear index of `(row, col)`.
    pub fn site_index(&self, row: usize, col: usize) -> Result<usize, IsingError> {
        if row >= self.side || col >= self.side {
            return Err(IsingError::Index(
                ErrorInfo::new("site-out-of-range", "lattice coordinates out of range")
                    .with_context("row", row)
                    .with_context("col", col)
                    .with_context("side", self.side),
            ));
        }
        Ok(row * self.side + col)
    }

    /// `(row, col)` of a linear site index.
    pub fn coordinates(&self, index: usize) -> Result<(usize, usize), IsingError> {
        let sites = self.side * self.side;
        if index >= sites {
            return Err(IsingError::out_of_range(
                "site-out-of-range",
                "site",
                index,
                sites,
            ));
        }
        Ok((index / self.side, index % self.side))
    }

    /// Couples two sites given by coordinates; an existing bond is left as is.
    pub fn add_bond(
        &mut self,
        row_a: usize,
        col_a: usize,
        row_b: usize,
        col_b: usize,
    ) -> Result<EdgeInsert, IsingError> {
        let a = self.site_index(row_a, col_a)?;
        let b = self.site_index(row_b, col_b)?;
        self.model.add_interaction(a, b)
    }

    /// Spin at `(row, col)`.
    pub fn spin_at(&self, row: usize, col: usize) -> Result<Spin, IsingError> {
        self.model.spin(self.site_index(row, col)?)
    }

    /// Underlying model.
    pub fn model(&self) -> &IsingModel {
        &self.model
    }

    /// Underlying model for mutation (flips, energy reads).
    pub fn model_mut(&mut self) -> &mut IsingModel {
        &mut self.model
    }

    /// Consumes the lattice and returns the model.
    pub fn into_model(self) -> IsingModel {
        self.model
    }
}

fn check_side(side: usize) -> Result<(), IsingError> {
    if side == 0 {
        return Err(IsingError::Config(
            ErrorInfo::new("invalid-config", "side must be positive")
                .with_context("side", side)
                .with_hint("use a side length of at least 2"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_round_trip_row_major() {
        let lattice = IsingModel2D::from_spins(3, vec![Spin::Up; 9]).unwrap();
        assert_eq!(lattice.site_index(1, 2).unwrap(), 5);
        assert_eq!(lattice.coordinates(5).unwrap(), (1, 2));
        assert_eq!(lattice.coordinates(9).unwrap_err().code(), "site-out-of-range");
        assert_eq!(lattice.site_index(0, 3).unwrap_err().code(), "site-out-of-range");
    }

    #[test]
    fn out_of_order_bonds_are_deduplicated() {
        let mut lattice = IsingModel2D::from_spins(3, vec![Spin::Up; 9]).unwrap();
        let before = lattice.model().interaction_count();
        let insert = lattice.add_bond(0, 1, 0, 0).unwrap();
        assert!(!insert.is_added());
        assert_eq!(lattice.model().interaction_count(), before);
    }
}
