//! Trainer torch settings.

use serde::{Deserialize, Serialize};

/// Device and threading settings, as found under `[torch_settings]`.
///
/// The device is kept as the raw user string and only parsed when the
/// settings are applied, so a bad value surfaces at configuration time
/// with the offending input in the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorchSettings {
    /// Device string such as `"cpu"` or `"cuda:1"`; absent means the
    /// baseline device.
    #[serde(default)]
    pub device: Option<String>,

    /// Intra-op thread count; absent means derive from available CPUs.
    #[serde(default)]
    pub num_threads: Option<usize>,
}

impl TorchSettings {
    /// Settings selecting `device`.
    pub fn with_device(device: impl Into<String>) -> Self {
        Self {
            device: Some(device.into()),
            ..Default::default()
        }
    }

    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }
}
