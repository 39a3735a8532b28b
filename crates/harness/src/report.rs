use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use pi_bench_shared::result::{ConfigurationResult, CSV_HEADER};

/// CSV sink for per-configuration results.
///
/// The file is truncated and given its header on creation, then reopened in
/// append mode for every row. Failing to open it is not fatal: a warning is
/// logged and the writer turns into a no-op.
pub struct ResultsWriter {
    path: PathBuf,
    enabled: bool,
}

impl ResultsWriter {
    pub fn create(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let enabled = match File::create(&path).and_then(|mut f| writeln!(f, "{}", CSV_HEADER)) {
            Ok(()) => {
                log::info!("Writing results to {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("Unable to open file {}: {}", path.display(), e);
                false
            }
        };
        Self { path, enabled }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn append(&self, result: &ConfigurationResult) {
        if !self.enabled {
            return;
        }
        let written = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{}", result.csv_row()));
        if let Err(e) = written {
            log::warn!("Unable to append to {}: {}", self.path.display(), e);
        }
    }
}

fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

pub fn results_file_name(device: &str, platform: &str) -> String {
    format!("benchmarkResults_{}_{}.csv", sanitize(device), sanitize(platform))
}

pub fn system_config_file_name(device: &str, platform: &str) -> String {
    format!("systemConfig_{}_{}.txt", sanitize(device), sanitize(platform))
}
