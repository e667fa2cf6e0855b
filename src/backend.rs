//! Tensor library backend seam.
//!
//! The tensor library owns three process-wide knobs: the default device,
//! the default dtype, and the intra-op thread count. [`DeviceContext`]
//! never touches them directly; it calls a [`TensorBackend`], so callers
//! can bind a real library, do nothing, or record the calls.
//!
//! [`DeviceContext`]: crate::DeviceContext

use std::sync::Mutex;

use crate::device::Device;
use crate::dtype::DType;

/// Effects applied to the underlying tensor library on configuration.
pub trait TensorBackend: Send + Sync {
    /// Backend name for logging/debugging.
    fn name(&self) -> &str;

    /// Mirror the default device into the library.
    fn set_default_device(&self, device: Device);

    /// Set the default dtype for newly created tensors.
    fn set_default_dtype(&self, dtype: DType);

    /// Set the number of intra-op threads.
    fn set_num_threads(&self, num_threads: usize);
}

/// Backend that applies nothing. Used when no tensor library is bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBackend;

impl TensorBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    fn set_default_device(&self, _device: Device) {}

    fn set_default_dtype(&self, _dtype: DType) {}

    fn set_num_threads(&self, _num_threads: usize) {}
}

/// A single call made against a [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    DefaultDevice(Device),
    DefaultDType(DType),
    NumThreads(usize),
}

/// Backend that records every call, in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<BackendCall>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().clone()
    }

    /// Every dtype passed to `set_default_dtype`, in order.
    pub fn dtype_calls(&self) -> Vec<DType> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::DefaultDType(dtype) => Some(*dtype),
                _ => None,
            })
            .collect()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<BackendCall> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BackendCall>> {
        // A panic mid-push cannot leave the Vec inconsistent
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, call: BackendCall) {
        self.lock().push(call);
    }
}

impl TensorBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn set_default_device(&self, device: Device) {
        self.record(BackendCall::DefaultDevice(device));
    }

    fn set_default_dtype(&self, dtype: DType) {
        self.record(BackendCall::DefaultDType(dtype));
    }

    fn set_num_threads(&self, num_threads: usize) {
        self.record(BackendCall::NumThreads(num_threads));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_backend_keeps_order() {
        let backend = RecordingBackend::new();
        backend.set_default_device(Device::cpu());
        backend.set_default_dtype(DType::F32);
        backend.set_num_threads(2);

        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::DefaultDevice(Device::cpu()),
                BackendCall::DefaultDType(DType::F32),
                BackendCall::NumThreads(2),
            ]
        );
        assert_eq!(backend.dtype_calls(), vec![DType::F32]);
    }

    #[test]
    fn take_drains() {
        let backend = RecordingBackend::new();
        backend.set_num_threads(1);
        assert_eq!(backend.take().len(), 1);
        assert!(backend.calls().is_empty());
    }
}
