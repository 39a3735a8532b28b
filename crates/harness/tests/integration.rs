use pi_bench_backend::estimate;
use pi_bench_harness::report::{results_file_name, system_config_file_name, ResultsWriter};
use pi_bench_harness::runner::{run_sweep, Backends};
use pi_bench_harness::sysinfo::{write_system_config, HostInfo};
use pi_bench_shared::config::{sample_counts_up_to, HarnessConfig};
use pi_bench_shared::result::CSV_HEADER;
use pi_bench_shared::SampleCount;

fn small_config(dir: &std::path::Path, max_exponent: u32) -> HarnessConfig {
    HarnessConfig {
        sample_counts: sample_counts_up_to(max_exponent),
        runs: 3,
        seed: Some(42),
        workers: Some(2),
        output_dir: dir.to_path_buf(),
    }
}

#[test]
fn test_csv_has_header_and_one_row_per_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path(), 4);
    let mut backends = Backends::new(0, 42, config.workers).unwrap();
    let path = dir.path().join(results_file_name("dev", "plat"));
    let writer = ResultsWriter::create(&path);
    assert!(writer.is_enabled());
    assert_eq!(writer.path(), path);

    let mut printed = 0;
    let results = run_sweep(&config, &mut backends, &writer, |_| printed += 1).unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(printed, 5);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1 + config.sample_counts.len());
    assert_eq!(lines[0], CSV_HEADER);

    for (line, &n) in lines[1..].iter().zip(&config.sample_counts) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 9, "bad row: {}", line);
        assert_eq!(fields[0].parse::<f64>().unwrap(), n as f64);
        assert_eq!(fields[1].parse::<f64>().unwrap(), 8.0 * n as f64 / 1e9);
        assert_eq!(fields[2], "3");
        for value in &fields[3..] {
            let v: f64 = value.parse().unwrap();
            assert!(v.is_finite() && v >= 0.0, "bad value {} in {}", v, line);
        }
        for pi_col in [4, 6, 8] {
            let v: f64 = fields[pi_col].parse().unwrap();
            assert!((0.0..=4.0).contains(&v));
        }
    }
}

#[test]
fn test_recreating_writer_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path(), 1);
    let path = dir.path().join("results.csv");

    for _ in 0..2 {
        let mut backends = Backends::new(0, 7, config.workers).unwrap();
        let writer = ResultsWriter::create(&path);
        run_sweep(&config, &mut backends, &writer, |_| {}).unwrap();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert_eq!(contents.matches("Samples,").count(), 1);
}

#[test]
fn test_unwritable_output_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir").join("results.csv");
    let writer = ResultsWriter::create(&missing);
    assert!(!writer.is_enabled());

    let config = small_config(dir.path(), 1);
    let mut backends = Backends::new(0, 1, config.workers).unwrap();
    let results = run_sweep(&config, &mut backends, &writer, |_| {}).unwrap();
    assert_eq!(results.len(), 2);
    assert!(!missing.exists());
}

#[test]
fn test_fixed_seed_reproduces_estimates() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path(), 3);
    let writer = ResultsWriter::create(dir.path().join("r.csv"));

    let run = || {
        let mut backends = Backends::new(0, 42, config.workers).unwrap();
        run_sweep(&config, &mut backends, &writer, |_| {}).unwrap()
    };
    let a = run();
    let b = run();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.device.avg_pi, y.device.avg_pi);
        assert_eq!(x.host.avg_pi, y.host.avg_pi);
        assert_eq!(x.parallel.avg_pi, y.parallel.avg_pi);
    }
}

#[test]
fn test_invalid_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig { runs: 0, ..small_config(dir.path(), 1) };
    let mut backends = Backends::new(0, 1, Some(1)).unwrap();
    let writer = ResultsWriter::create(dir.path().join("r.csv"));
    assert!(run_sweep(&config, &mut backends, &writer, |_| {}).is_err());
}

#[test]
fn test_system_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let backends = Backends::new(0, 0, Some(1)).unwrap();
    let info = backends.device.info();
    let path = dir.path().join(system_config_file_name(&info.name, &info.platform));

    assert!(write_system_config(&path, &backends.device.info_string(), &HostInfo::detect()));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("System Configuration\n"));
    assert!(text.contains(&info.name));
    assert!(text.contains("Number of CPU cores:"));
}

#[test]
fn test_system_config_unwritable_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("systemConfig.txt");
    assert!(!write_system_config(&path, "device", &HostInfo::detect()));
}

/// In-circle counts of three successive calls per variant: device, host, omp.
fn stream_signatures(seed: u64) -> Vec<Vec<u64>> {
    let mut backends = Backends::new(0, seed, Some(1)).unwrap();
    let n = SampleCount::new(20_000).unwrap();
    let device = (0..3).map(|_| estimate(&mut backends.device, n).unwrap().in_circle).collect();
    let host = (0..3).map(|_| estimate(&mut backends.host, n).unwrap().in_circle).collect();
    let parallel = (0..3).map(|_| estimate(&mut backends.parallel, n).unwrap().in_circle).collect();
    vec![device, host, parallel]
}

#[test]
fn test_neighbouring_seeds_share_no_variant_stream() {
    for base in [1u64, 41, u64::MAX] {
        let mut all = stream_signatures(base);
        all.extend(stream_signatures(base.wrapping_add(1)));
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j], "streams {} and {} coincide for base seed {}", i, j, base);
            }
        }
    }
}
