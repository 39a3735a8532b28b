use pi_bench_shared::{BenchError, SampleCount};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::backend::{count_hits, Backend};

/// Single-threaded host backend. Points are drawn one pair at a time while
/// counting, so the batch is never materialized.
pub struct SequentialBackend {
    rng: Pcg64,
}

pub struct LazyPairs {
    len: u64,
    rng: Pcg64,
}

impl SequentialBackend {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl Backend for SequentialBackend {
    type Batch = LazyPairs;

    fn name(&self) -> &str {
        "host"
    }

    fn generate_uniform_pairs(&mut self, samples: SampleCount) -> Result<LazyPairs, BenchError> {
        Ok(LazyPairs {
            len: samples.get(),
            rng: Pcg64::seed_from_u64(self.rng.gen()),
        })
    }

    fn count_within_unit_circle(&mut self, mut batch: LazyPairs) -> Result<u64, BenchError> {
        Ok(count_hits(&mut batch.rng, batch.len))
    }
}
