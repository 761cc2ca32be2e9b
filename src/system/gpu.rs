//! GPU detection and enumeration
//!
//! Detects attached NVIDIA GPUs and reports their names and device
//! memory statistics.

use serde::{Deserialize, Serialize};
use std::process::Command;

/// Bytes per mebibyte, the unit memory statistics are displayed in.
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Per-device GPU information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpuInfo {
    /// Device index as reported by the driver (0-based)
    pub index: u32,
    /// Device name, e.g. "NVIDIA GeForce RTX 4090"
    pub name: String,
    /// Device memory currently in use, in bytes
    pub memory_used_bytes: u64,
    /// Device memory reserved by the driver, in bytes
    pub memory_reserved_bytes: u64,
}

impl GpuInfo {
    /// Used device memory in mebibytes
    pub fn memory_used_mib(&self) -> f64 {
        self.memory_used_bytes as f64 / BYTES_PER_MIB as f64
    }

    /// Driver-reserved device memory in mebibytes
    pub fn memory_reserved_mib(&self) -> f64 {
        self.memory_reserved_bytes as f64 / BYTES_PER_MIB as f64
    }
}

/// Enumerate attached GPUs (best effort)
///
/// Returns an empty list when no GPU is present or the driver tooling
/// is unavailable; enumeration failures are never fatal.
pub fn detect_gpus() -> Vec<GpuInfo> {
    match query_nvidia_smi() {
        Some(gpus) => gpus,
        None => {
            tracing::warn!("nvidia-smi query failed, reporting no devices");
            Vec::new()
        }
    }
}

/// Query all devices through nvidia-smi in one CSV call
fn query_nvidia_smi() -> Option<Vec<GpuInfo>> {
    let output = Command::new("nvidia-smi")
        .args([
            "--query-gpu=index,name,memory.used,memory.reserved",
            "--format=csv,noheader,nounits",
        ])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(parse_query_output(&stdout))
}

/// Parse `nvidia-smi --query-gpu` CSV output, one device per line.
///
/// With `nounits`, memory values are plain MiB integers. Lines that do
/// not parse are skipped.
fn parse_query_output(raw: &str) -> Vec<GpuInfo> {
    let mut gpus = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
        if parts.len() < 4 {
            tracing::debug!("skipping malformed nvidia-smi line: {line}");
            continue;
        }

        let (Ok(index), Ok(used_mib), Ok(reserved_mib)) = (
            parts[0].parse::<u32>(),
            parts[2].parse::<u64>(),
            parts[3].parse::<u64>(),
        ) else {
            tracing::debug!("skipping malformed nvidia-smi line: {line}");
            continue;
        };

        if parts[1].is_empty() {
            continue;
        }

        gpus.push(GpuInfo {
            index,
            name: parts[1].to_string(),
            memory_used_bytes: used_mib * BYTES_PER_MIB,
            memory_reserved_bytes: reserved_mib * BYTES_PER_MIB,
        });
    }

    gpus
}
