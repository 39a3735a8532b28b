use pi_bench_backend::available_devices;

pub fn run() -> anyhow::Result<()> {
    let devices = available_devices();
    println!("{} device(s) available:", devices.len());
    for device in &devices {
        println!(
            "  [{}] {} ({}, {} compute units, {})",
            device.index, device.name, device.platform, device.compute_units, device.toolkit
        );
    }
    Ok(())
}
