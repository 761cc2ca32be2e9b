//! Tensor computation checks
//!
//! Thin layer over candle used to confirm that tensor math actually
//! runs on the selected device.

use candle_core::{Device, Tensor};
use thiserror::Error;

/// Errors from the tensor backend
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Tensor operation failed: {0}")]
    Tensor(#[from] candle_core::Error),
}

/// Whether the CUDA runtime is usable by the tensor backend
pub fn cuda_available() -> bool {
    candle_core::utils::cuda_is_available()
}

/// Add two independent uniform-random 3x3 matrices on the given device
pub fn add_random_matrices(device: &Device) -> Result<Tensor, ComputeError> {
    let x = Tensor::rand(0f32, 1f32, (3, 3), device)?;
    let y = Tensor::rand(0f32, 1f32, (3, 3), device)?;
    let z = (&x + &y)?;
    Ok(z)
}

/// Run the addition check on the first CUDA device
pub fn gpu_add_demo() -> Result<Tensor, ComputeError> {
    let device = Device::new_cuda(0)?;
    add_random_matrices(&device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_random_matrices_shape() {
        let sum = add_random_matrices(&Device::Cpu).expect("Failed to add matrices");
        assert_eq!(sum.dims(), &[3, 3]);
    }

    #[test]
    fn test_add_random_matrices_bounds() {
        // Each element is the sum of two values drawn from [0, 1).
        let sum = add_random_matrices(&Device::Cpu).expect("Failed to add matrices");
        let rows = sum.to_vec2::<f32>().expect("Failed to read tensor");
        for row in rows {
            for v in row {
                assert!((0.0..2.0).contains(&v), "element {v} out of range");
            }
        }
    }

    #[test]
    fn test_add_random_matrices_independent_draws() {
        let a = add_random_matrices(&Device::Cpu).expect("Failed to add matrices");
        let b = add_random_matrices(&Device::Cpu).expect("Failed to add matrices");
        // 9 fresh uniform draws per run; identical results would mean
        // the generator is not advancing.
        assert_ne!(
            a.to_vec2::<f32>().expect("Failed to read tensor"),
            b.to_vec2::<f32>().expect("Failed to read tensor"),
        );
    }
}
