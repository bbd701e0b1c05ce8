//! RNG module - random piece generation
//!
//! Pieces are drawn uniformly from the catalog. The random source is injected
//! so that tests and training runs can replay the exact same piece sequence
//! from a seed; nothing here touches process-global randomness.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::pieces::{Piece, PieceCatalog};

/// Default random source for engines
pub type PieceRng = SmallRng;

/// Deterministic random source for a seed
pub fn seeded(seed: u64) -> PieceRng {
    SmallRng::seed_from_u64(seed)
}

/// Random source seeded from the operating system
pub fn from_entropy() -> PieceRng {
    SmallRng::from_entropy()
}

/// Catalog plus the random source that draws from it
#[derive(Debug, Clone)]
pub struct PieceSource<R = PieceRng> {
    catalog: PieceCatalog,
    rng: R,
}

impl<R: Rng> PieceSource<R> {
    pub fn new(catalog: PieceCatalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    /// Draw the next piece (an independent copy of a template)
    pub fn draw(&mut self) -> Piece {
        self.catalog.spawn(&mut self.rng)
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }
}

impl PieceSource<PieceRng> {
    /// Source with a deterministic piece sequence
    pub fn with_seed(catalog: PieceCatalog, seed: u64) -> Self {
        Self::new(catalog, seeded(seed))
    }
}
