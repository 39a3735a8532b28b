use pi_bench_backend::{estimate, DeviceBackend, ParallelBackend, SequentialBackend};
use pi_bench_shared::config::{HarnessConfig, VariantSeeds};
use pi_bench_shared::result::{ConfigurationResult, EstimationResult, VariantSummary};
use pi_bench_shared::{BenchError, SampleCount};

use crate::report::ResultsWriter;

/// The three execution strategies, each owning its own random source.
pub struct Backends {
    pub device: DeviceBackend,
    pub host: SequentialBackend,
    pub parallel: ParallelBackend,
}

impl Backends {
    pub fn new(device_index: usize, seed: u64, n_workers: Option<usize>) -> Result<Self, BenchError> {
        let seeds = VariantSeeds::from_base(seed);
        Ok(Self {
            device: DeviceBackend::select(device_index, seeds.device)?,
            host: SequentialBackend::new(seeds.host),
            parallel: ParallelBackend::new(seeds.parallel, n_workers),
        })
    }
}

/// Run device, host and parallel `runs` times each (in that order per run)
/// and average their timings and estimates.
pub fn run_configuration(
    backends: &mut Backends,
    samples: SampleCount,
    runs: u32,
) -> Result<ConfigurationResult, BenchError> {
    if runs == 0 {
        return Err(BenchError::InvalidRunCount);
    }

    let capacity = runs as usize;
    let mut device: Vec<EstimationResult> = Vec::with_capacity(capacity);
    let mut host: Vec<EstimationResult> = Vec::with_capacity(capacity);
    let mut parallel: Vec<EstimationResult> = Vec::with_capacity(capacity);

    for _ in 0..runs {
        device.push(estimate(&mut backends.device, samples)?);
        host.push(estimate(&mut backends.host, samples)?);
        parallel.push(estimate(&mut backends.parallel, samples)?);
    }

    Ok(ConfigurationResult {
        samples: samples.get(),
        memory_gb: samples.memory_gb(),
        runs,
        device: VariantSummary::from_results(&device),
        host: VariantSummary::from_results(&host),
        parallel: VariantSummary::from_results(&parallel),
    })
}

/// Run every configured sample count, handing each result to `on_result`
/// before appending it to `writer`.
pub fn run_sweep<F>(
    config: &HarnessConfig,
    backends: &mut Backends,
    writer: &ResultsWriter,
    mut on_result: F,
) -> anyhow::Result<Vec<ConfigurationResult>>
where
    F: FnMut(&ConfigurationResult),
{
    config.validate()?;

    let mut results = Vec::with_capacity(config.sample_counts.len());
    for &n in &config.sample_counts {
        let samples = SampleCount::new(n)?;
        log::debug!("Running {} samples x {} runs", samples, config.runs);
        let result = run_configuration(backends, samples, config.runs)?;
        on_result(&result);
        writer.append(&result);
        results.push(result);
    }
    Ok(results)
}
