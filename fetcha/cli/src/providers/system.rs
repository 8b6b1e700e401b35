//! Facts read from `/proc`, `/sys`, `uname(2)` and `lspci`

use std::fs;
use std::process::Command;

use nix::sys::utsname::{uname, UtsName};

const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];
const DMI_DIR: &str = "/sys/devices/virtual/dmi/id";

/// Name used when os-release has no `PRETTY_NAME`
const UNKNOWN_OS: &str = "Unknown";

/// DMI strings that vendors leave in place of a real value
const DMI_PLACEHOLDERS: &[&str] = &[
    "To Be Filled By O.E.M.",
    "To be filled by O.E.M.",
    "Default string",
    "System Product Name",
    "System Version",
    "Not Applicable",
    "None",
];

fn read(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::debug!(path, error = %e, "Read failed");
            None
        }
    }
}

fn system_uname() -> Option<UtsName> {
    match uname() {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::debug!(error = %e, "uname failed");
            None
        }
    }
}

// ============================================================================
// OS
// ============================================================================

/// `PRETTY_NAME` from os-release text, unquoted
pub(crate) fn parse_os_release(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix("PRETTY_NAME=")?.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}

pub(super) fn os() -> Option<String> {
    let name = OS_RELEASE_PATHS
        .iter()
        .find_map(|path| fs::read_to_string(path).ok())
        .and_then(|content| parse_os_release(&content))
        .unwrap_or_else(|| UNKNOWN_OS.to_string());

    let info = system_uname()?;
    Some(format!("{name} {}", info.machine().to_string_lossy()))
}

// ============================================================================
// Host
// ============================================================================

/// Model name from DMI product name and version
pub(crate) fn format_host(name: &str, version: Option<&str>) -> Option<String> {
    let usable = |s: &str| {
        let s = s.trim();
        (!s.is_empty() && !DMI_PLACEHOLDERS.contains(&s)).then(|| s.to_string())
    };

    let name = usable(name)?;
    match version.and_then(usable) {
        Some(version) => Some(format!("{name} {version}")),
        None => Some(name),
    }
}

pub(super) fn host() -> Option<String> {
    let name = read(&format!("{DMI_DIR}/product_name"))?;
    let version = fs::read_to_string(format!("{DMI_DIR}/product_version")).ok();
    format_host(&name, version.as_deref())
}

// ============================================================================
// Kernel
// ============================================================================

pub(super) fn kernel() -> Option<String> {
    let info = system_uname()?;
    Some(info.release().to_string_lossy().into_owned())
}

// ============================================================================
// Uptime
// ============================================================================

/// Whole seconds from `/proc/uptime`
pub(crate) fn parse_uptime(content: &str) -> Option<u64> {
    let first = content.split_whitespace().next()?;
    let whole = first.split('.').next()?;
    whole.parse().ok()
}

/// `"2 days, 3 hours, 4 mins"`, dropping zero parts
pub(crate) fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let mins = seconds % 3_600 / 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (mins, "min")]
        .into_iter()
        .filter(|&(n, _)| n > 0)
        .map(|(n, unit)| {
            if n == 1 {
                format!("{n} {unit}")
            } else {
                format!("{n} {unit}s")
            }
        })
        .collect();

    if parts.is_empty() {
        "0 mins".to_string()
    } else {
        parts.join(", ")
    }
}

pub(super) fn uptime() -> Option<String> {
    let content = read("/proc/uptime")?;
    parse_uptime(&content).map(format_uptime)
}

// ============================================================================
// Memory
// ============================================================================

/// Total and available memory in KiB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemInfo {
    pub total_kib: u64,
    pub available_kib: u64,
}

impl MemInfo {
    /// `"used MiB / total MiB"`
    pub(crate) fn display(self) -> String {
        let used = self.total_kib.saturating_sub(self.available_kib) / 1024;
        let total = self.total_kib / 1024;
        format!("{used} MiB / {total} MiB")
    }
}

/// Parse `/proc/meminfo`
///
/// Kernels older than 3.14 lack `MemAvailable`; free + buffers + cached
/// stands in for it.
pub(crate) fn parse_meminfo(content: &str) -> Option<MemInfo> {
    let field = |key: &str| -> Option<u64> {
        content.lines().find_map(|line| {
            let rest = line.strip_prefix(key)?.strip_prefix(':')?;
            rest.split_whitespace().next()?.parse().ok()
        })
    };

    let total_kib = field("MemTotal")?;
    let available_kib = field("MemAvailable").or_else(|| {
        Some(field("MemFree")? + field("Buffers").unwrap_or(0) + field("Cached").unwrap_or(0))
    })?;

    Some(MemInfo {
        total_kib,
        available_kib,
    })
}

pub(super) fn memory() -> Option<String> {
    let content = read("/proc/meminfo")?;
    parse_meminfo(&content).map(MemInfo::display)
}

// ============================================================================
// CPU
// ============================================================================

/// One model name per physical package, in order of first appearance
///
/// Processors without a `physical id` (many ARM boards, some VMs) count as
/// one package.
pub(crate) fn parse_cpuinfo(content: &str) -> Vec<String> {
    let mut packages: Vec<(String, String)> = Vec::new();

    for block in content.split("\n\n") {
        let mut model = None;
        let mut package = String::from("0");

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim() {
                "model name" => {
                    model = Some(value.split_whitespace().collect::<Vec<_>>().join(" "));
                }
                "physical id" => package = value.trim().to_string(),
                _ => {}
            }
        }

        if let Some(model) = model.filter(|m| !m.is_empty()) {
            if !packages.iter().any(|(id, _)| *id == package) {
                packages.push((package, model));
            }
        }
    }

    packages.into_iter().map(|(_, model)| model).collect()
}

pub(super) fn cpu() -> Option<String> {
    let content = read("/proc/cpuinfo")?;
    let models = parse_cpuinfo(&content);
    (!models.is_empty()).then(|| models.join("\n"))
}

// ============================================================================
// GPU
// ============================================================================

/// Device classes that count as a GPU
const GPU_CLASSES: &[&str] = &["VGA", "3D", "Display"];

/// Quoted fields of one `lspci -mm` line
fn quoted_fields(line: &str) -> Vec<&str> {
    line.split('"')
        .skip(1)
        .step_by(2)
        .collect()
}

/// `vendor device` for each display controller in `lspci -mm` output
pub(crate) fn parse_lspci(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let fields = quoted_fields(line);
            let class = *fields.first()?;
            if !GPU_CLASSES.iter().any(|c| class.contains(c)) {
                return None;
            }
            let vendor = fields.get(1).copied().unwrap_or_default();
            let device = fields.get(2).copied().unwrap_or_default();
            let name = format!("{vendor} {device}");
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

pub(super) fn gpu() -> Option<String> {
    let output = match Command::new("lspci").arg("-mm").output() {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            tracing::debug!(status = %output.status, "lspci failed");
            return None;
        }
        Err(e) => {
            tracing::debug!(error = %e, "lspci unavailable");
            return None;
        }
    };

    let devices = parse_lspci(&String::from_utf8_lossy(&output.stdout));
    (!devices.is_empty()).then(|| devices.join("\n"))
}
