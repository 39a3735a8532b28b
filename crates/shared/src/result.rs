use std::time::Duration;

pub const CSV_HEADER: &str = "Samples,Memory_Required_GB,Num_Runs,Avg_Elapsed_Device,Avg_Val_Device,Avg_Elapsed_Host,Avg_Val_Host,Avg_Elapsed_OMP,Avg_Val_OMP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Device,
    Host,
    Parallel,
}

impl Variant {
    /// Execution order within a single run.
    pub const ALL: [Variant; 3] = [Variant::Device, Variant::Host, Variant::Parallel];

    pub fn label(self) -> &'static str {
        match self {
            Variant::Device => "device",
            Variant::Host => "host",
            Variant::Parallel => "omp",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EstimationResult {
    pub elapsed: Duration,
    pub pi_estimate: f64,
    pub in_circle: u64,
    pub samples: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VariantSummary {
    pub avg_elapsed_secs: f64,
    pub avg_pi: f64,
}

impl VariantSummary {
    pub fn from_results(results: &[EstimationResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len() as f64;
        let total_elapsed: f64 = results.iter().map(|r| r.elapsed.as_secs_f64()).sum();
        let total_pi: f64 = results.iter().map(|r| r.pi_estimate).sum();
        Self {
            avg_elapsed_secs: total_elapsed / n,
            avg_pi: total_pi / n,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigurationResult {
    pub samples: u64,
    pub memory_gb: f64,
    pub runs: u32,
    pub device: VariantSummary,
    pub host: VariantSummary,
    pub parallel: VariantSummary,
}

impl ConfigurationResult {
    pub fn summary(&self, variant: Variant) -> &VariantSummary {
        match variant {
            Variant::Device => &self.device,
            Variant::Host => &self.host,
            Variant::Parallel => &self.parallel,
        }
    }

    /// One CSV line matching `CSV_HEADER`, without the trailing newline.
    pub fn csv_row(&self) -> String {
        format!(
            "{:.1},{},{},{},{},{},{},{},{}",
            self.samples as f64,
            self.memory_gb,
            self.runs,
            self.device.avg_elapsed_secs,
            self.device.avg_pi,
            self.host.avg_elapsed_secs,
            self.host.avg_pi,
            self.parallel.avg_elapsed_secs,
            self.parallel.avg_pi,
        )
    }
}
