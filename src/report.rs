//! Environment report
//!
//! Gathers the framework version, CUDA status, attached GPUs and a
//! small on-device tensor addition, and renders them as the fixed
//! line-oriented report this tool exists to print.

use crate::compute::{self, ComputeError};
use crate::system::gpu::{self, GpuInfo};
use std::io::{self, Write};
use thiserror::Error;

/// Errors that abort the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("GPU computation check failed: {0}")]
    Compute(#[from] ComputeError),
}

/// Everything the report prints, gathered up front
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    /// Whether the tensor backend can use CUDA
    pub cuda_available: bool,
    /// Enumerated GPUs, in device-index order
    pub gpus: Vec<GpuInfo>,
    /// Rendered sum tensor from the on-device addition check
    pub tensor: Option<String>,
}

/// Probe the environment and run the on-device addition check
pub fn gather() -> Result<EnvSnapshot, ReportError> {
    let cuda_available = compute::cuda_available();
    tracing::debug!("tensor backend reports CUDA available: {cuda_available}");

    let mut snapshot = EnvSnapshot {
        cuda_available,
        ..EnvSnapshot::default()
    };

    if cuda_available {
        snapshot.gpus = gpu::detect_gpus();
        let sum = compute::gpu_add_demo()?;
        snapshot.tensor = Some(sum.to_string());
    }

    Ok(snapshot)
}

/// Render a snapshot as the line-oriented report
pub fn render<W: Write>(out: &mut W, snapshot: &EnvSnapshot) -> io::Result<()> {
    writeln!(out, "gpucheck version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "CUDA available: {}", snapshot.cuda_available)?;

    if !snapshot.cuda_available {
        writeln!(out, "No GPU detected, running on CPU only.")?;
        return Ok(());
    }

    writeln!(out, "Number of GPUs: {}", snapshot.gpus.len())?;
    for gpu in &snapshot.gpus {
        writeln!(out, "GPU {}: {}", gpu.index, gpu.name)?;
        writeln!(out, "  Memory Allocated: {:.2} MB", gpu.memory_used_mib())?;
        writeln!(out, "  Memory Cached: {:.2} MB", gpu.memory_reserved_mib())?;
    }

    if let Some(tensor) = &snapshot.tensor {
        writeln!(out, "Tensor computation successful on GPU: {tensor}")?;
    }

    Ok(())
}

/// Gather and render in one call
pub fn run<W: Write>(out: &mut W) -> Result<(), ReportError> {
    let snapshot = gather()?;
    render(out, &snapshot)?;
    Ok(())
}
