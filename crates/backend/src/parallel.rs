use pi_bench_shared::{BenchError, SampleCount};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::backend::{count_hits, split_seeds, Backend};

/// Contiguous slice of the iteration range owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub len: u64,
    pub seed: u64,
}

pub struct PartitionedPairs {
    partitions: Vec<Partition>,
}

/// Multi-core host backend.
///
/// Each worker draws from its own generator and keeps a private count; the
/// partial counts are summed once every worker has joined. If the worker pool
/// cannot be built the same partitions are evaluated on the calling thread,
/// which yields the same estimate for the same seed.
pub struct ParallelBackend {
    pool: Option<rayon::ThreadPool>,
    workers: usize,
    rng: Pcg64,
}

impl ParallelBackend {
    pub fn new(seed: u64, n_workers: Option<usize>) -> Self {
        let workers = n_workers
            .unwrap_or_else(rayon::current_num_threads)
            .max(1);
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pi-worker-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!(
                    "Failed to start {} worker threads ({}); running parallel variant on one thread",
                    workers,
                    e
                );
                None
            }
        };
        Self::with_pool(pool, workers, seed)
    }

    /// Evaluate every partition on the calling thread.
    pub fn sequential_fallback(seed: u64, workers: usize) -> Self {
        Self::with_pool(None, workers.max(1), seed)
    }

    fn with_pool(pool: Option<rayon::ThreadPool>, workers: usize, seed: u64) -> Self {
        Self {
            pool,
            workers,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }
}

/// Split `samples` iterations into at most `workers` near-equal partitions.
pub fn partition(samples: u64, workers: usize, seed: u64) -> Vec<Partition> {
    let parts = (workers as u64).clamp(1, samples.max(1));
    let base = samples / parts;
    let rem = samples % parts;
    split_seeds(seed, parts as usize)
        .into_iter()
        .zip(0..parts)
        .map(|(seed, w)| Partition {
            len: base + u64::from(w < rem),
            seed,
        })
        .collect()
}

fn count_partition(p: &Partition) -> u64 {
    let mut rng = Pcg64::seed_from_u64(p.seed);
    count_hits(&mut rng, p.len)
}

impl Backend for ParallelBackend {
    type Batch = PartitionedPairs;

    fn name(&self) -> &str {
        "omp"
    }

    fn generate_uniform_pairs(
        &mut self,
        samples: SampleCount,
    ) -> Result<PartitionedPairs, BenchError> {
        Ok(PartitionedPairs {
            partitions: partition(samples.get(), self.workers, self.rng.gen()),
        })
    }

    fn count_within_unit_circle(&mut self, batch: PartitionedPairs) -> Result<u64, BenchError> {
        let partials: Vec<u64> = match &self.pool {
            Some(pool) => pool.install(|| batch.partitions.par_iter().map(count_partition).collect()),
            None => batch.partitions.iter().map(count_partition).collect(),
        };
        Ok(partials.iter().sum())
    }
}
