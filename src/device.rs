//! Device descriptors and device string parsing.
//!
//! A device string has the form `"<kind>"` or `"<kind>:<index>"`, e.g.
//! `"cpu"`, `"cuda"`, `"cuda:42"`. The index is only present when the
//! string carries a colon suffix; `"cuda"` and `"cuda:0"` are different
//! descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, Result};

/// Kind of compute target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum DeviceKind {
    /// Host CPU (default).
    #[default]
    Cpu,
    Cuda,
    /// Apple Metal Performance Shaders.
    Mps,
    Xpu,
    Hip,
    OpenGl,
    OpenCl,
    Vulkan,
    Ideep,
    Mkldnn,
    Fpga,
    Ve,
    Xla,
    Lazy,
    /// Shape-only tensors with no backing storage.
    Meta,
    Hpu,
    Mtia,
    Ipu,
    Maia,
    /// Out-of-tree backend registered under the first private-use key.
    PrivateUseOne,
}

impl DeviceKind {
    /// Every known device kind, in declaration order.
    pub const ALL: [DeviceKind; 20] = [
        DeviceKind::Cpu,
        DeviceKind::Cuda,
        DeviceKind::Mps,
        DeviceKind::Xpu,
        DeviceKind::Hip,
        DeviceKind::OpenGl,
        DeviceKind::OpenCl,
        DeviceKind::Vulkan,
        DeviceKind::Ideep,
        DeviceKind::Mkldnn,
        DeviceKind::Fpga,
        DeviceKind::Ve,
        DeviceKind::Xla,
        DeviceKind::Lazy,
        DeviceKind::Meta,
        DeviceKind::Hpu,
        DeviceKind::Mtia,
        DeviceKind::Ipu,
        DeviceKind::Maia,
        DeviceKind::PrivateUseOne,
    ];

    /// Canonical lowercase name, as accepted by the parser.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::Mps => "mps",
            Self::Xpu => "xpu",
            Self::Hip => "hip",
            Self::OpenGl => "opengl",
            Self::OpenCl => "opencl",
            Self::Vulkan => "vulkan",
            Self::Ideep => "ideep",
            Self::Mkldnn => "mkldnn",
            Self::Fpga => "fpga",
            Self::Ve => "ve",
            Self::Xla => "xla",
            Self::Lazy => "lazy",
            Self::Meta => "meta",
            Self::Hpu => "hpu",
            Self::Mtia => "mtia",
            Self::Ipu => "ipu",
            Self::Maia => "maia",
            Self::PrivateUseOne => "privateuseone",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = DeviceError;

    /// Matching is exact: `"CUDA"` is not a device kind.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DeviceError::UnknownKind(s.to_string()))
    }
}

/// A compute device: a kind plus an optional index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Device {
    kind: DeviceKind,
    index: Option<u32>,
}

impl Device {
    /// Create a device from its parts.
    pub fn new(kind: DeviceKind, index: Option<u32>) -> Self {
        Self { kind, index }
    }

    /// CPU device with no index.
    pub fn cpu() -> Self {
        Self::new(DeviceKind::Cpu, None)
    }

    /// CUDA device with no index (the current CUDA device).
    pub fn cuda() -> Self {
        Self::new(DeviceKind::Cuda, None)
    }

    /// Same kind, with the given index.
    pub fn with_index(self, index: u32) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    /// Parse a device string. Equivalent to `s.parse::<Device>()`.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Device index, `None` when the device string had no `:<index>` suffix.
    pub fn index(&self) -> Option<u32> {
        self.index
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}:{index}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for Device {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(DeviceError::EmptyDevice);
        }

        let Some((kind, index)) = s.split_once(':') else {
            return Ok(Self::new(s.parse()?, None));
        };

        if kind.is_empty() {
            return Err(DeviceError::EmptyDevice);
        }
        let kind: DeviceKind = kind.parse()?;

        let invalid = |reason: &str| DeviceError::InvalidIndex {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if index.is_empty() {
            return Err(invalid("missing index after ':'"));
        }
        // u32::from_str accepts a leading '+', so check digits ourselves
        if !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a non-negative integer"));
        }
        if index.len() > 1 && index.starts_with('0') {
            return Err(invalid("leading zeros"));
        }
        let index: u32 = index.parse().map_err(|_| invalid("index out of range"))?;

        Ok(Self::new(kind, Some(index)))
    }
}

impl TryFrom<String> for Device {
    type Error = DeviceError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Device> for String {
    fn from(device: Device) -> Self {
        device.to_string()
    }
}
