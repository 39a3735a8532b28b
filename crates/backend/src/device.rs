use std::fmt::Write as _;
use std::num::NonZeroUsize;

use pi_bench_shared::{BenchError, SampleCount};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::backend::{in_unit_circle, split_seeds, Backend};

/// Points generated per device work item. Each chunk has its own generator so
/// buffer contents depend only on the seed, not on scheduling.
pub const CHUNK_LEN: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub platform: String,
    pub toolkit: String,
    pub compute_units: usize,
}

/// Enumerate the compute devices visible to the device runtime.
///
/// Device 0 spans every hardware thread; device 1 is a single compute unit,
/// useful as a baseline for the kernel overhead.
pub fn available_devices() -> Vec<DeviceInfo> {
    let cores = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let toolkit = format!("pi-bench-backend {}", env!("CARGO_PKG_VERSION"));
    vec![
        DeviceInfo {
            index: 0,
            name: format!("{}-vector", std::env::consts::ARCH),
            platform: "rayon".to_string(),
            toolkit: toolkit.clone(),
            compute_units: cores,
        },
        DeviceInfo {
            index: 1,
            name: format!("{}-scalar", std::env::consts::ARCH),
            platform: "rayon".to_string(),
            toolkit,
            compute_units: 1,
        },
    ]
}

/// Human-readable capability dump, marking the active device with `*`.
pub fn devices_info_string(active: Option<usize>) -> String {
    let devices = available_devices();
    let mut out = String::new();
    if let Some(first) = devices.first() {
        let _ = writeln!(
            out,
            "Device runtime: {} ({} {})",
            first.toolkit,
            std::env::consts::OS,
            std::env::consts::ARCH
        );
    }
    for device in &devices {
        let marker = if Some(device.index) == active { "*" } else { "-" };
        let _ = writeln!(
            out,
            "[{}]{} {}: {}, {} compute unit(s)",
            device.index, marker, device.name, device.platform, device.compute_units
        );
    }
    out
}

/// Materialized sample batch: two `f32` buffers of equal length.
pub struct DeviceBuffer {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl DeviceBuffer {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }
}

pub struct DeviceBackend {
    info: DeviceInfo,
    pool: rayon::ThreadPool,
    rng: Pcg64,
}

impl DeviceBackend {
    pub fn select(index: usize, seed: u64) -> Result<Self, BenchError> {
        let devices = available_devices();
        let available = devices.len();
        let info = devices
            .into_iter()
            .find(|d| d.index == index)
            .ok_or(BenchError::DeviceUnavailable { index, available })?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(info.compute_units)
            .thread_name(|i| format!("pi-device-{i}"))
            .build()
            .map_err(|e| BenchError::DeviceInit(e.to_string()))?;

        log::info!(
            "Selected device [{}] {} ({}, {} compute units)",
            info.index,
            info.name,
            info.platform,
            info.compute_units
        );

        Ok(Self {
            info,
            pool,
            rng: Pcg64::seed_from_u64(seed),
        })
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn info_string(&self) -> String {
        devices_info_string(Some(self.info.index))
    }
}

fn alloc_buffer(len: usize, samples: u64) -> Result<Vec<f32>, BenchError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BenchError::DeviceAllocation { samples })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

impl Backend for DeviceBackend {
    type Batch = DeviceBuffer;

    fn name(&self) -> &str {
        "device"
    }

    fn generate_uniform_pairs(&mut self, samples: SampleCount) -> Result<DeviceBuffer, BenchError> {
        let len = usize::try_from(samples.get())
            .map_err(|_| BenchError::DeviceAllocation { samples: samples.get() })?;
        let mut xs = alloc_buffer(len, samples.get())?;
        let mut ys = alloc_buffer(len, samples.get())?;

        let chunk_seeds = split_seeds(self.rng.gen(), len.div_ceil(CHUNK_LEN));
        self.pool.install(|| {
            xs.par_chunks_mut(CHUNK_LEN)
                .zip(ys.par_chunks_mut(CHUNK_LEN))
                .enumerate()
                .for_each(|(chunk, (xc, yc))| {
                    let mut rng = Pcg64::seed_from_u64(chunk_seeds[chunk]);
                    for (x, y) in xc.iter_mut().zip(yc.iter_mut()) {
                        *x = rng.gen();
                        *y = rng.gen();
                    }
                });
        });

        Ok(DeviceBuffer { xs, ys })
    }

    fn count_within_unit_circle(&mut self, batch: DeviceBuffer) -> Result<u64, BenchError> {
        let count = self.pool.install(|| {
            batch
                .xs
                .par_iter()
                .zip(batch.ys.par_iter())
                .filter(|(x, y)| in_unit_circle(**x, **y))
                .count()
        });
        Ok(count as u64)
    }
}
