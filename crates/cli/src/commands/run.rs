use anyhow::Context;
use pi_bench_harness::report::{results_file_name, system_config_file_name, ResultsWriter};
use pi_bench_harness::runner::{self, Backends};
use pi_bench_harness::sysinfo::{self, HostInfo};
use pi_bench_shared::config::HarnessConfig;

use crate::output;

pub fn run(device_index: usize, config: HarnessConfig) -> anyhow::Result<()> {
    config.validate()?;

    let seed = config.resolve_seed();
    log::info!("Base seed {} (pass --seed {} to reproduce)", seed, seed);

    let mut backends = Backends::new(device_index, seed, config.workers)
        .with_context(|| format!("Failed to initialize device {}", device_index))?;
    let device_info = backends.device.info_string();
    print!("{}", device_info);

    if let Err(e) = std::fs::create_dir_all(&config.output_dir) {
        log::warn!(
            "Unable to create output directory {}: {}",
            config.output_dir.display(),
            e
        );
    }

    let info = backends.device.info().clone();
    let sys_path = config
        .output_dir
        .join(system_config_file_name(&info.name, &info.platform));
    sysinfo::write_system_config(&sys_path, &device_info, &HostInfo::detect());

    let writer = ResultsWriter::create(
        config
            .output_dir
            .join(results_file_name(&info.name, &info.platform)),
    );

    println!(
        "Running {} sample counts ({} runs each, {} parallel workers)...\n",
        config.sample_counts.len(),
        config.runs,
        backends.parallel.workers(),
    );

    let start = std::time::Instant::now();
    runner::run_sweep(&config, &mut backends, &writer, output::print_configuration)?;
    log::info!("Benchmark finished in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
