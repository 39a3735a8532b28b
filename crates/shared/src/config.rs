use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::error::BenchError;

// Baseline harness parameters
pub const DEFAULT_RUNS: u32 = 3;
pub const DEFAULT_MAX_EXPONENT: u32 = 9;
pub const BYTES_PER_SAMPLE: u64 = 8; // two f32 buffers
pub const DEFAULT_OUTPUT_DIR: &str = "./results";

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub sample_counts: Vec<u64>,
    pub runs: u32,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub output_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sample_counts: sample_counts_up_to(DEFAULT_MAX_EXPONENT),
            runs: DEFAULT_RUNS,
            seed: None,
            workers: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.runs == 0 {
            return Err(BenchError::InvalidRunCount);
        }
        if self.sample_counts.is_empty() {
            return Err(BenchError::NoSampleCounts);
        }
        if self.sample_counts.contains(&0) {
            return Err(BenchError::InvalidSampleCount(0));
        }
        Ok(())
    }

    /// Fixed seed if one was given, otherwise a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// 10^0, 10^1, ..., 10^max_exponent (capped at the largest power that fits u64).
pub fn sample_counts_up_to(max_exponent: u32) -> Vec<u64> {
    (0..=max_exponent)
        .map_while(|e| 10u64.checked_pow(e))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSeeds {
    pub device: u64,
    pub host: u64,
    pub parallel: u64,
}

impl VariantSeeds {
    /// Draw one seed per variant from a generator seeded with `seed`, so
    /// neighbouring base seeds never hand the same seed to two variants.
    pub fn from_base(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        Self {
            device: rng.gen(),
            host: rng.gen(),
            parallel: rng.gen(),
        }
    }

    pub fn all(&self) -> [u64; 3] {
        [self.device, self.host, self.parallel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = HarnessConfig::default();
        assert_eq!(config.runs, 3);
        assert_eq!(config.sample_counts.len(), 10);
        assert_eq!(config.sample_counts[0], 1);
        assert_eq!(config.sample_counts[9], 1_000_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_counts_capped() {
        let counts = sample_counts_up_to(25);
        assert_eq!(counts.len(), 20);
        assert_eq!(*counts.last().unwrap(), 10u64.pow(19));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let config = HarnessConfig { runs: 0, ..HarnessConfig::default() };
        assert!(matches!(config.validate(), Err(BenchError::InvalidRunCount)));

        let config = HarnessConfig { sample_counts: vec![], ..HarnessConfig::default() };
        assert!(matches!(config.validate(), Err(BenchError::NoSampleCounts)));

        let config = HarnessConfig { sample_counts: vec![10, 0], ..HarnessConfig::default() };
        assert!(matches!(config.validate(), Err(BenchError::InvalidSampleCount(0))));
    }

    #[test]
    fn test_fixed_seed_resolves_to_itself() {
        let config = HarnessConfig { seed: Some(99), ..HarnessConfig::default() };
        assert_eq!(config.resolve_seed(), 99);
    }

    #[test]
    fn test_variant_seeds_deterministic() {
        assert_eq!(VariantSeeds::from_base(7), VariantSeeds::from_base(7));
    }

    #[test]
    fn test_neighbouring_base_seeds_share_no_variant_seed() {
        let mut seen = std::collections::HashSet::new();
        for base in (0..64u64).chain([u64::MAX - 1, u64::MAX]) {
            for seed in VariantSeeds::from_base(base).all() {
                assert!(seen.insert(seed), "variant seed {} reused at base {}", seed, base);
            }
        }
    }
}
