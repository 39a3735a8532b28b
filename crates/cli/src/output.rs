use pi_bench_shared::result::{ConfigurationResult, Variant};

pub fn print_configuration(result: &ConfigurationResult) {
    println!("Estimating PI using Monte Carlo method with:");
    println!("Samples: {:.1e}, Runs: {}", result.samples as f64, result.runs);
    println!("Memory required: {:.2} GB", result.memory_gb);
    println!();

    for variant in Variant::ALL {
        let summary = result.summary(variant);
        println!(
            "{:>6}: {:.5} seconds to estimate pi = {:.6}",
            variant.label(),
            summary.avg_elapsed_secs,
            summary.avg_pi
        );
    }

    println!(
        "NOTE:  Device is the selected compute device, Host is single core performance, and OMP is multi-core performance"
    );
    println!();
}
