use std::fmt;
use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

const UNKNOWN: &str = "unknown";

/// Host details recorded next to the benchmark results.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub system_name: String,
    pub node_name: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    pub cpu_cores: usize,
    pub hostname: String,
}

impl HostInfo {
    pub fn detect() -> Self {
        let cpu_cores = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let mut info = Self {
            system_name: std::env::consts::OS.to_string(),
            node_name: UNKNOWN.to_string(),
            release: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            machine: std::env::consts::ARCH.to_string(),
            cpu_cores,
            hostname: std::env::var("COMPUTERNAME")
                .or_else(|_| std::env::var("HOSTNAME"))
                .unwrap_or_else(|_| UNKNOWN.to_string()),
        };
        #[cfg(unix)]
        unix::fill(&mut info);
        info
    }
}

impl fmt::Display for HostInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System Name: {}", self.system_name)?;
        writeln!(f, "Node Name: {}", self.node_name)?;
        writeln!(f, "Release: {}", self.release)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Machine: {}", self.machine)?;
        writeln!(f, "Number of CPU cores: {}", self.cpu_cores)?;
        writeln!(f, "Hostname: {}", self.hostname)
    }
}

#[cfg(unix)]
mod unix {
    use std::ffi::CStr;

    use super::HostInfo;

    fn field(raw: &[libc::c_char]) -> String {
        // SAFETY: uname/gethostname NUL-terminate within the buffer.
        unsafe { CStr::from_ptr(raw.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    pub(super) fn fill(info: &mut HostInfo) {
        // SAFETY: utsname is plain C char arrays, so all-zero is a valid value.
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        // SAFETY: `uts` is a valid, writable utsname for the duration of the call.
        if unsafe { libc::uname(&mut uts) } == 0 {
            info.system_name = field(&uts.sysname);
            info.node_name = field(&uts.nodename);
            info.release = field(&uts.release);
            info.version = field(&uts.version);
            info.machine = field(&uts.machine);
        } else {
            log::warn!("uname failed: {}", std::io::Error::last_os_error());
        }

        let mut host: [libc::c_char; 256] = [0; 256];
        // SAFETY: the length excludes the last byte, which stays NUL for `field`.
        if unsafe { libc::gethostname(host.as_mut_ptr(), host.len() - 1) } == 0 {
            info.hostname = field(&host);
        }
    }
}

/// Write the system configuration dump. Returns `false` (after logging a
/// warning) if the file could not be written.
pub fn write_system_config(path: &Path, device_info: &str, host: &HostInfo) -> bool {
    let written = File::create(path).and_then(|mut f| {
        writeln!(f, "System Configuration")?;
        writeln!(f, "{}", device_info)?;
        write!(f, "{}", host)
    });
    match written {
        Ok(()) => {
            log::info!("Wrote system configuration to {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("Unable to open file {}: {}", path.display(), e);
            false
        }
    }
}
