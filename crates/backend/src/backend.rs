use std::time::Instant;

use pi_bench_shared::result::EstimationResult;
use pi_bench_shared::sample::pi_from_count;
use pi_bench_shared::{BenchError, SampleCount};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// An execution strategy for the Monte Carlo estimator.
///
/// The estimator only ever asks a backend for a batch of uniform points in the
/// unit square and for the number of those points inside the unit circle. How
/// the batch is represented (materialized buffers, a lazily drawn stream, a
/// set of seeded partitions) is up to the backend.
pub trait Backend {
    type Batch;

    fn name(&self) -> &str;

    fn generate_uniform_pairs(&mut self, samples: SampleCount) -> Result<Self::Batch, BenchError>;

    fn count_within_unit_circle(&mut self, batch: Self::Batch) -> Result<u64, BenchError>;
}

#[inline(always)]
pub fn in_unit_circle(x: f32, y: f32) -> bool {
    x * x + y * y < 1.0
}

/// Draw `len` points from `rng` and count the hits. Shared by the CPU backends.
#[inline]
pub(crate) fn count_hits<R: Rng>(rng: &mut R, len: u64) -> u64 {
    let mut count = 0u64;
    for _ in 0..len {
        let x: f32 = rng.gen();
        let y: f32 = rng.gen();
        if in_unit_circle(x, y) {
            count += 1;
        }
    }
    count
}

/// Child seeds for `n` independent work items, drawn from a generator seeded
/// with `seed`.
pub(crate) fn split_seeds(seed: u64, n: usize) -> Vec<u64> {
    let mut seeder = Pcg64::seed_from_u64(seed);
    (0..n).map(|_| seeder.gen()).collect()
}

/// Time one end-to-end estimate (generation + reduction) on `backend`.
pub fn estimate<B: Backend>(
    backend: &mut B,
    samples: SampleCount,
) -> Result<EstimationResult, BenchError> {
    let start = Instant::now();
    let batch = backend.generate_uniform_pairs(samples)?;
    let in_circle = backend.count_within_unit_circle(batch)?;
    let elapsed = start.elapsed();

    let pi_estimate = pi_from_count(in_circle, samples);
    log::debug!(
        "{}: {} samples, {} in circle, pi ~ {:.6} in {:.5}s",
        backend.name(),
        samples,
        in_circle,
        pi_estimate,
        elapsed.as_secs_f64()
    );

    Ok(EstimationResult {
        elapsed,
        pi_estimate,
        in_circle,
        samples: samples.get(),
    })
}

/// Sample standard deviation of `reps` estimates of `samples` points each.
#[cfg(test)]
pub(crate) fn spread_of_estimates<B: Backend>(backend: &mut B, samples: u64, reps: usize) -> f64 {
    let n = SampleCount::new(samples).unwrap();
    let values: Vec<f64> = (0..reps)
        .map(|_| estimate(backend, n).unwrap().pi_estimate)
        .collect();
    let mean = values.iter().sum::<f64>() / reps as f64;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (reps - 1) as f64).sqrt()
}
