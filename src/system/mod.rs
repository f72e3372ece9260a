//! Uptime and platform descriptors for the `/api/system` routes.
//!
//! None of the load figures are measured; see [`PLACEHOLDER_CPU_PERCENT`] and
//! friends. Only uptime and the platform strings reflect the real host.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, SystemTimeError};
use sysinfo::System;
use utoipa::ToSchema;

pub const PLACEHOLDER_CPU_PERCENT: f64 = 15.5;
pub const PLACEHOLDER_MEMORY_PERCENT: f64 = 42.3;
pub const PLACEHOLDER_DISK_PERCENT: f64 = 67.8;

pub const HEALTH_STATUS: &str = "EXCELLENT";
pub const HEALTH_SCORE: f64 = 92.5;
pub const HEALTH_RECOMMENDATION: &str = "System is running optimally";

/// Status reported for cpu, ram and disk by `/api/system/stats`.
pub const RESOURCE_OK: &str = "OK";

/// Uptime shown when it cannot be computed.
pub const UNKNOWN_UPTIME: &str = "Unknown";

/// `rustc --version` of the toolchain that built this binary.
pub const RUNTIME_VERSION: &str = env!("JOEYAI_RUSTC_VERSION");

const UNKNOWN: &str = "Unknown";

/// Host descriptors, detected once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlatformInfo {
    /// OS family: `Linux`, `Darwin`, `Windows`, ...
    pub system: String,
    /// Kernel release
    pub release: String,
    /// OS version
    pub version: String,
    /// CPU architecture
    pub machine: String,
    /// CPU brand string
    pub processor: String,
}

impl PlatformInfo {
    pub fn detect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        let processor = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            system: os_family(std::env::consts::OS),
            release: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            version: System::long_os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            machine: std::env::consts::ARCH.to_string(),
            processor,
        }
    }
}

/// Maps Rust's target OS names onto the conventional family names.
fn os_family(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => UNKNOWN.to_string(),
            }
        }
    }
}

/// Time since `started_at`. Fails when the wall clock is behind the start time.
pub fn uptime(started_at: SystemTime) -> Result<Duration, SystemTimeError> {
    SystemTime::now().duration_since(started_at)
}

/// `"<h>h <m>m <s>s"`, hours unbounded.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::ZERO), "0h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(59)), "0h 0m 59s");
        assert_eq!(format_uptime(Duration::from_secs(3_725)), "1h 2m 5s");
        assert_eq!(format_uptime(Duration::from_millis(90_999)), "0h 1m 30s");
        assert_eq!(format_uptime(Duration::from_secs(100 * 3600)), "100h 0m 0s");
    }

    #[test]
    fn test_uptime_since_past() {
        let started = SystemTime::now() - Duration::from_secs(10);
        let elapsed = uptime(started).unwrap();
        assert!(elapsed >= Duration::from_secs(10));
    }

    #[test]
    fn test_uptime_fails_for_future_start() {
        let started = SystemTime::now() + Duration::from_secs(3600);
        assert!(uptime(started).is_err());
    }

    #[test]
    fn test_os_family() {
        assert_eq!(os_family("linux"), "Linux");
        assert_eq!(os_family("macos"), "Darwin");
        assert_eq!(os_family("windows"), "Windows");
        assert_eq!(os_family("openbsd"), "Openbsd");
        assert_eq!(os_family(""), "Unknown");
    }

    #[test]
    fn test_detect_fills_every_field() {
        let info = PlatformInfo::detect();
        assert!(!info.system.is_empty());
        assert!(!info.release.is_empty());
        assert!(!info.version.is_empty());
        assert_eq!(info.machine, std::env::consts::ARCH);
        assert!(!info.processor.is_empty());
    }

    #[test]
    fn test_runtime_version_is_set() {
        assert!(!RUNTIME_VERSION.is_empty());
    }
}
