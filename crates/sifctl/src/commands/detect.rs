//! Detect command

use crate::cli::DetectArgs;
use crate::output;
use anyhow::Result;
use camino::Utf8Path;
use serde::Serialize;
use sifctl_runtime::{Runtime, RuntimeClient};

/// What discovery settled on
#[derive(Debug, Serialize)]
struct DetectReport {
    executable: String,
    runtime: Runtime,
    version: String,
    fakeroot: bool,
}

impl DetectReport {
    fn from_client(client: &RuntimeClient) -> Option<Self> {
        let version = client.version()?;
        Some(Self {
            executable: client.executable().to_string(),
            runtime: version.runtime,
            version: version.version.to_string(),
            fakeroot: client.supports_fakeroot(),
        })
    }
}

pub fn run(args: DetectArgs, settings: Option<&Utf8Path>) -> Result<()> {
    let settings = super::load_settings(settings)?;
    let client = super::discover_client(&settings)?;
    let report = DetectReport::from_client(&client)
        .ok_or_else(|| anyhow::anyhow!("runtime client is not ready: {}", client.state()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header("Container runtime");
    output::kv("Executable", &report.executable);
    output::kv("Runtime", report.runtime.name());
    output::kv("Version", &report.version);
    output::kv("Fakeroot", if report.fakeroot { "supported" } else { "not supported" });
    Ok(())
}
