//! tdev — resolve and show the trainer's default device.
//!
//! Reads `[torch_settings]` from the config file, applies command-line
//! overrides, and prints the device, dtype and thread count a trainer on
//! this host would use.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::info;

use tdev::{Config, DeviceContext, TorchSettings};

/// tdev — trainer device configuration
#[derive(Parser)]
#[command(name = "tdev")]
#[command(version = tdev::PKG_VERSION)]
#[command(about = "Resolve the default torch device and precision")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device string, e.g. "cpu", "cuda" or "cuda:1" (overrides config).
    #[arg(short, long, env = "TDEV_DEVICE")]
    device: Option<String>,

    /// Intra-op thread count (overrides config).
    #[arg(short = 't', long)]
    num_threads: Option<usize>,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    device: tdev::Device,
    kind: &'static str,
    index: Option<u32>,
    dtype: tdev::DType,
    num_threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(version = tdev::version_string(), "tdev starting");

    let config = Config::load_or_default(args.config.as_deref())?;
    let settings = merge_settings(config.torch_settings, args.device, args.num_threads);

    let mut ctx = DeviceContext::system();
    let device = ctx.configure(&settings)?;

    let report = Report {
        device,
        kind: device.kind().as_str(),
        index: device.index(),
        dtype: ctx.default_dtype(),
        num_threads: ctx.num_threads(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("device:      {}", report.device);
        println!("kind:        {}", report.kind);
        println!(
            "index:       {}",
            report
                .index
                .map_or_else(|| "none".to_string(), |i| i.to_string())
        );
        println!("dtype:       {}", report.dtype);
        println!(
            "num_threads: {}",
            report
                .num_threads
                .map_or_else(|| "unset".to_string(), |n| n.to_string())
        );
    }

    Ok(())
}

/// Command-line values take precedence over the config file.
fn merge_settings(
    from_config: TorchSettings,
    device: Option<String>,
    num_threads: Option<usize>,
) -> TorchSettings {
    TorchSettings {
        device: device.or(from_config.device),
        num_threads: num_threads.or(from_config.num_threads),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let from_config = TorchSettings::with_device("cpu").num_threads(2);
        let merged = merge_settings(from_config, Some("cuda:1".to_string()), Some(8));
        assert_eq!(merged, TorchSettings::with_device("cuda:1").num_threads(8));
    }

    #[test]
    fn config_fills_missing_flags() {
        let from_config = TorchSettings::with_device("opengl").num_threads(3);
        let merged = merge_settings(from_config.clone(), None, None);
        assert_eq!(merged, from_config);
    }

    #[test]
    fn flags_merge_per_field() {
        let merged = merge_settings(TorchSettings::with_device("cuda"), None, Some(4));
        assert_eq!(merged, TorchSettings::with_device("cuda").num_threads(4));
    }
}
