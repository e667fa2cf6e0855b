//! Tests for the process-wide default device.
//!
//! All tests share one process-wide context, so each one holds `LOCK` and
//! restores the defaults through `Restore` even when an assertion fails.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tdev::global;
use tdev::{DType, Device, DeviceContext, RecordingBackend, StaticProbe, TorchSettings};

static LOCK: Mutex<()> = Mutex::new(());

/// Installs a recording context; resets the defaults on drop.
struct Restore {
    _guard: MutexGuard<'static, ()>,
}

impl Restore {
    fn install(backend: Arc<RecordingBackend>) -> Self {
        let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        global::install(DeviceContext::new(backend, Arc::new(StaticProbe::cpu_only())));
        Self { _guard: guard }
    }
}

impl Drop for Restore {
    fn drop(&mut self) {
        // Baseline settings carry no thread count, so reset cannot fail here
        let reset = global::reset();
        debug_assert!(reset.is_ok(), "reset failed: {reset:?}");
    }
}

#[test]
fn set_torch_device() {
    let cases = [
        ("cpu", "cpu", None),
        ("cuda", "cuda", None),
        ("cuda:42", "cuda", Some(42)),
        ("opengl", "opengl", None),
    ];

    for (device_str, expected_type, expected_index) in cases {
        let backend = Arc::new(RecordingBackend::new());
        let _restore = Restore::install(backend.clone());

        tdev::set_torch_config(&TorchSettings::with_device(device_str)).unwrap();

        assert_eq!(tdev::default_device().kind().as_str(), expected_type);
        match expected_index {
            None => assert!(tdev::default_device().index().is_none()),
            Some(index) => assert_eq!(tdev::default_device().index(), Some(index)),
        }
        assert_eq!(backend.dtype_calls(), vec![DType::F32]);
    }
}

#[test]
fn reset_restores_baseline() {
    let backend = Arc::new(RecordingBackend::new());
    let _restore = Restore::install(backend);

    tdev::set_torch_config(&TorchSettings::with_device("cuda:1")).unwrap();
    global::set_torch_config(&TorchSettings { device: None, ..Default::default() }).unwrap();

    assert_eq!(tdev::default_device(), Device::cpu());
}

#[test]
fn failed_configuration_keeps_previous_device() {
    let backend = Arc::new(RecordingBackend::new());
    let _restore = Restore::install(backend);

    tdev::set_torch_config(&TorchSettings::with_device("cuda:3")).unwrap();
    assert!(tdev::set_torch_config(&TorchSettings::with_device("cuda:-3")).is_err());

    assert_eq!(tdev::default_device(), Device::cuda().with_index(3));
}

#[test]
fn accessors_reflect_last_configuration() {
    let backend = Arc::new(RecordingBackend::new());
    let _restore = Restore::install(backend);

    tdev::set_torch_config(&TorchSettings::with_device("cpu").num_threads(3)).unwrap();

    assert_eq!(global::default_dtype(), DType::F32);
    assert_eq!(global::num_threads(), Some(3));
}

#[test]
fn install_returns_previous_context() {
    let first = Arc::new(RecordingBackend::new());
    let _restore = Restore::install(first);
    tdev::set_torch_config(&TorchSettings::with_device("opengl")).unwrap();

    let previous = global::install(DeviceContext::new(
        Arc::new(RecordingBackend::new()),
        Arc::new(StaticProbe::cpu_only()),
    ));

    assert_eq!(previous.default_device().kind().as_str(), "opengl");
    assert_eq!(tdev::default_device(), Device::cpu());
}
