//! tdev - device and tensor precision configuration for ML trainers
//!
//! Maps a device string such as `"cpu"`, `"cuda"` or `"cuda:42"` onto a
//! [`Device`] and installs it, together with a 32-bit float default dtype,
//! as the trainer's default. The tensor library is reached through the
//! [`TensorBackend`] trait.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tdev::{DType, DeviceContext, DeviceKind, RecordingBackend, StaticProbe, TorchSettings};
//!
//! # fn main() -> tdev::Result<()> {
//! let backend = Arc::new(RecordingBackend::new());
//! let mut ctx = DeviceContext::new(backend.clone(), Arc::new(StaticProbe::cpu_only()));
//!
//! ctx.configure(&TorchSettings::with_device("cuda:42"))?;
//! assert_eq!(ctx.default_device().kind(), DeviceKind::Cuda);
//! assert_eq!(ctx.default_device().index(), Some(42));
//! assert_eq!(backend.dtype_calls(), vec![DType::F32]);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod device;
pub mod dtype;
pub mod error;
pub mod global;
pub mod probe;
pub mod settings;
pub mod telemetry;
pub mod threads;
mod version;

// Re-export main types at crate root
pub use backend::{BackendCall, NoopBackend, RecordingBackend, TensorBackend};
pub use config::Config;
pub use context::DeviceContext;
pub use device::{Device, DeviceKind};
pub use dtype::DType;
pub use error::{DeviceError, Result};
pub use global::{default_device, set_torch_config};
pub use probe::{AcceleratorProbe, StaticProbe, SystemProbe};
pub use settings::TorchSettings;
pub use version::{PKG_VERSION, version_string};
