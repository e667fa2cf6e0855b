//! Explicit device configuration context.
//!
//! A [`DeviceContext`] owns the trainer's default device, dtype and thread
//! count, together with the [`TensorBackend`] those choices are mirrored
//! into. Code that needs the default device takes the context (or a
//! [`Device`] read from it) instead of consulting ambient state; the
//! [`global`](crate::global) module wraps one context for call sites that
//! cannot.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{NoopBackend, TensorBackend};
use crate::device::Device;
use crate::dtype::DType;
use crate::error::Result;
use crate::probe::{AcceleratorProbe, SystemProbe};
use crate::settings::TorchSettings;
use crate::telemetry;
use crate::threads;

/// Default device, dtype and thread count for a trainer.
pub struct DeviceContext {
    device: Device,
    dtype: DType,
    num_threads: Option<usize>,
    backend: Arc<dyn TensorBackend>,
    probe: Arc<dyn AcceleratorProbe>,
}

impl DeviceContext {
    /// Create a context on the probe's baseline device.
    ///
    /// Nothing is applied to the backend until [`configure`](Self::configure)
    /// is called.
    pub fn new(backend: Arc<dyn TensorBackend>, probe: Arc<dyn AcceleratorProbe>) -> Self {
        Self {
            device: probe.baseline_device(),
            dtype: DType::default(),
            num_threads: None,
            backend,
            probe,
        }
    }

    /// Context for the current host with no tensor library bound.
    pub fn system() -> Self {
        Self::new(Arc::new(NoopBackend), Arc::new(SystemProbe))
    }

    /// Apply `settings`, returning the installed device.
    ///
    /// An absent device resets to the baseline device. The default dtype is
    /// set to 32-bit float exactly once per call. On error nothing changes
    /// and the backend is not called.
    pub fn configure(&mut self, settings: &TorchSettings) -> Result<Device> {
        let (device, source) = match settings.device.as_deref() {
            Some(spec) => match spec.parse::<Device>() {
                Ok(device) => (device, "settings"),
                Err(e) => return Err(self.reject(e)),
            },
            None => (self.probe.baseline_device(), "baseline"),
        };
        let num_threads = match threads::resolve_num_threads(settings.num_threads) {
            Ok(n) => n,
            Err(e) => return Err(self.reject(e)),
        };

        // Every device kind trains in 32-bit float
        let dtype = DType::F32;

        self.backend.set_default_device(device);
        self.backend.set_default_dtype(dtype);
        if let Some(n) = num_threads {
            self.backend.set_num_threads(n);
        }

        self.device = device;
        self.dtype = dtype;
        self.num_threads = num_threads;

        debug!(
            %device,
            %dtype,
            ?num_threads,
            backend = self.backend.name(),
            "default torch device"
        );
        metrics::counter!(telemetry::DEVICE_CONFIGURATIONS_TOTAL,
            "kind" => device.kind().as_str(),
            "source" => source,
        )
        .increment(1);

        Ok(device)
    }

    /// Reset to the baseline device.
    pub fn reset(&mut self) -> Result<Device> {
        self.configure(&TorchSettings::default())
    }

    /// The installed default device.
    pub fn default_device(&self) -> Device {
        self.device
    }

    pub fn default_dtype(&self) -> DType {
        self.dtype
    }

    /// Thread count last applied, `None` if none was.
    pub fn num_threads(&self) -> Option<usize> {
        self.num_threads
    }

    /// Device installed when no device is configured.
    pub fn baseline_device(&self) -> Device {
        self.probe.baseline_device()
    }

    fn reject(&self, err: crate::DeviceError) -> crate::DeviceError {
        warn!(error = %err, current = %self.device, "rejected torch settings");
        metrics::counter!(telemetry::CONFIGURATION_ERRORS_TOTAL).increment(1);
        err
    }
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceContext")
            .field("device", &self.device)
            .field("dtype", &self.dtype)
            .field("num_threads", &self.num_threads)
            .field("backend", &self.backend.name())
            .finish_non_exhaustive()
    }
}
