//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! All metrics are prefixed with `tdev_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `kind` — device kind (e.g. "cpu", "cuda")
//! - `source` — where the device came from: "settings" or "baseline"

/// Successful device configurations.
///
/// Labels: `kind`, `source` ("settings" | "baseline").
pub const DEVICE_CONFIGURATIONS_TOTAL: &str = "tdev_device_configurations_total";

/// Configuration attempts rejected before any state changed.
pub const CONFIGURATION_ERRORS_TOTAL: &str = "tdev_configuration_errors_total";
