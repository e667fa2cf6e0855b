//! Process-wide default device.
//!
//! Wraps a single [`DeviceContext`] behind a lock for call sites that read
//! the default device as ambient state. The context is created lazily on
//! the host's baseline device with no tensor library bound; [`install`]
//! swaps in a caller-built context.

use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::context::DeviceContext;
use crate::device::Device;
use crate::dtype::DType;
use crate::error::Result;
use crate::settings::TorchSettings;

static CONTEXT: OnceLock<RwLock<DeviceContext>> = OnceLock::new();

fn context() -> &'static RwLock<DeviceContext> {
    CONTEXT.get_or_init(|| RwLock::new(DeviceContext::system()))
}

// `DeviceContext::configure` only writes its fields after every backend
// call has returned, so a panicking backend leaves the previous state
// intact and the lock can be recovered.
fn read() -> RwLockReadGuard<'static, DeviceContext> {
    context().read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, DeviceContext> {
    let lock = context();
    lock.write().unwrap_or_else(|poisoned| {
        tracing::warn!("recovering process-wide device context after a panic");
        lock.clear_poison();
        poisoned.into_inner()
    })
}

/// Apply `settings` to the process-wide context.
pub fn set_torch_config(settings: &TorchSettings) -> Result<Device> {
    write().configure(settings)
}

/// Reset the process-wide default device to the baseline.
pub fn reset() -> Result<Device> {
    set_torch_config(&TorchSettings::default())
}

/// The process-wide default device.
pub fn default_device() -> Device {
    read().default_device()
}

pub fn default_dtype() -> DType {
    read().default_dtype()
}

pub fn num_threads() -> Option<usize> {
    read().num_threads()
}

/// Replace the process-wide context, returning the previous one.
pub fn install(ctx: DeviceContext) -> DeviceContext {
    std::mem::replace(&mut *write(), ctx)
}
