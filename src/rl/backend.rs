//! Backend type alias and device helper for turning observations into tensors
//!
//! The CPU NdArray backend is enough for the board sizes this environment
//! serves.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used when feeding observations to a model
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
