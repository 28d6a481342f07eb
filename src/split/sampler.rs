use log::debug;
use rand::prelude::*;
use rand_chacha::ChaChaRng;

use crate::error::{Error, Result};
use crate::split::schema::CanonicalRow;

/// Default share of rows sent to the public split.
pub const DEFAULT_PUBLIC_PROPORTION: f64 = 0.3;

/// Default RNG seed, so that repeated runs give the same split.
pub const DEFAULT_SEED: u64 = 2;

/// The two halves of a split, each sorted ascending by id.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub public: Vec<CanonicalRow>,
    pub private: Vec<CanonicalRow>,
}

/// Number of rows that go to the public split.
///
/// Halfway cases round to even, so 1.5 rows becomes 2 and 4.5 becomes 4.
pub fn public_size(total: usize, proportion: f64) -> usize {
    let size = (proportion * total as f64).round_ties_even() as usize;
    size.min(total)
}

/// Draws a seeded sample of rows without replacement.
#[derive(Clone, Debug)]
pub struct Sampler {
    proportion: f64,
    seed: u64,
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler {
            proportion: DEFAULT_PUBLIC_PROPORTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl Sampler {
    pub fn new(proportion: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&proportion) {
            return Err(Error::InvalidProportion(proportion));
        }
        Ok(Sampler { proportion, seed })
    }

    /// Split rows into public and private sets.
    ///
    /// The result only depends on the seed, the proportion and the order of
    /// the input rows.
    pub fn split(&self, rows: Vec<CanonicalRow>) -> SplitResult {
        let total = rows.len();
        let amount = public_size(total, self.proportion);
        let mut rng = ChaChaRng::seed_from_u64(self.seed);

        let mut selected = vec![false; total];
        for index in rand::seq::index::sample(&mut rng, total, amount).into_vec() {
            selected[index] = true;
        }

        let mut result = SplitResult {
            public: Vec::with_capacity(amount),
            private: Vec::with_capacity(total - amount),
        };
        for (row, is_public) in rows.into_iter().zip(selected) {
            if is_public {
                result.public.push(row);
            } else {
                result.private.push(row);
            }
        }
        result.public.sort_by(|a, b| a.id.cmp(&b.id));
        result.private.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(
            "Sampled {} public and {} private rows from {} (seed {})",
            result.public.len(),
            result.private.len(),
            total,
            self.seed
        );
        result
    }
}
