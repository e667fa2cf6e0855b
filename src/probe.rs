//! Accelerator detection for the baseline device.
//!
//! When no device is configured, the trainer runs on `cuda` if an NVIDIA
//! driver is usable and on `cpu` otherwise.

use std::path::Path;

use crate::device::Device;

/// Decides whether CUDA is usable on this host.
pub trait AcceleratorProbe: Send + Sync {
    fn cuda_available(&self) -> bool;

    /// Device installed when settings carry no device string.
    fn baseline_device(&self) -> Device {
        if self.cuda_available() {
            Device::cuda()
        } else {
            Device::cpu()
        }
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProbe {
    pub cuda: bool,
}

impl StaticProbe {
    pub fn cpu_only() -> Self {
        Self { cuda: false }
    }

    pub fn with_cuda() -> Self {
        Self { cuda: true }
    }
}

impl AcceleratorProbe for StaticProbe {
    fn cuda_available(&self) -> bool {
        self.cuda
    }
}

/// Driver files exposed by the NVIDIA kernel module.
const NVIDIA_DRIVER_PATHS: &[&str] = &["/proc/driver/nvidia/version", "/dev/nvidiactl"];

/// Probe that inspects the host.
///
/// CUDA counts as available when `CUDA_VISIBLE_DEVICES` does not hide every
/// device and the NVIDIA driver is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl SystemProbe {
    /// `CUDA_VISIBLE_DEVICES=""` or `"-1"` hides all GPUs.
    fn devices_hidden(visible: Option<&str>) -> bool {
        matches!(visible.map(str::trim), Some("") | Some("-1"))
    }
}

impl AcceleratorProbe for SystemProbe {
    fn cuda_available(&self) -> bool {
        let visible = std::env::var("CUDA_VISIBLE_DEVICES").ok();
        if Self::devices_hidden(visible.as_deref()) {
            tracing::trace!("CUDA_VISIBLE_DEVICES hides all devices");
            return false;
        }
        let found = NVIDIA_DRIVER_PATHS
            .iter()
            .any(|path| Path::new(path).exists());
        tracing::trace!(found, "probed NVIDIA driver");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_follows_probe() {
        assert_eq!(StaticProbe::cpu_only().baseline_device(), Device::cpu());
        assert_eq!(StaticProbe::with_cuda().baseline_device(), Device::cuda());
    }

    #[test]
    fn baseline_has_no_index() {
        assert_eq!(StaticProbe::with_cuda().baseline_device().index(), None);
    }

    #[test]
    fn hidden_devices() {
        assert!(SystemProbe::devices_hidden(Some("")));
        assert!(SystemProbe::devices_hidden(Some("-1")));
        assert!(!SystemProbe::devices_hidden(Some("0,1")));
        assert!(!SystemProbe::devices_hidden(None));
    }
}
