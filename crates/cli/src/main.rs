mod commands;
mod output;

use std::path::PathBuf;

use clap::Parser;
use pi_bench_shared::config::{
    sample_counts_up_to, HarnessConfig, DEFAULT_MAX_EXPONENT, DEFAULT_OUTPUT_DIR, DEFAULT_RUNS,
};

#[derive(Parser)]
#[command(
    name = "pi-bench",
    about = "Monte Carlo pi benchmark: device vs single-core vs multi-core"
)]
struct Cli {
    /// Index of the device to run the device variant on
    #[arg(default_value = "0")]
    device: usize,
    /// Number of runs averaged per sample count
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: u32,
    /// Sweep sample counts 10^0 ..= 10^N
    #[arg(long, default_value_t = DEFAULT_MAX_EXPONENT)]
    max_exponent: u32,
    /// Explicit sample counts (overrides --max-exponent)
    #[arg(long, num_args = 1..)]
    samples: Vec<u64>,
    /// Base seed; a random one is chosen and logged if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Number of parallel workers (0 = auto)
    #[arg(long, default_value = "0")]
    workers: usize,
    /// Directory for the CSV and system configuration files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// List available devices and exit
    #[arg(long)]
    list_devices: bool,
}

impl Cli {
    fn harness_config(&self) -> HarnessConfig {
        let sample_counts = if self.samples.is_empty() {
            sample_counts_up_to(self.max_exponent)
        } else {
            self.samples.clone()
        };
        HarnessConfig {
            sample_counts,
            runs: self.runs,
            seed: self.seed,
            workers: if self.workers == 0 { None } else { Some(self.workers) },
            output_dir: self.output_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list_devices {
        return commands::devices::run();
    }
    commands::run::run(cli.device, cli.harness_config())
}
