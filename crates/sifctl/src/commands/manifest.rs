//! Manifest command

use crate::cli::ManifestArgs;
use anyhow::{Context, Result};
use camino::Utf8Path;
use sifctl_registry::{DockerHubClient, ImageReference};
use tracing::debug;

pub fn run(args: ManifestArgs, settings: Option<&Utf8Path>) -> Result<()> {
    let settings = super::load_settings(settings)?;
    let reference = ImageReference::parse(&args.reference)?;
    debug!("Resolved image reference: {}", reference);

    let client = DockerHubClient::new()?.with_timeout(settings.timeouts().http_timeout())?;
    let manifest = client
        .get_manifest_for(&reference)
        .with_context(|| format!("Failed to fetch manifest for {}", reference))?;

    let rendered = if args.compact {
        serde_json::to_string(&manifest)?
    } else {
        serde_json::to_string_pretty(&manifest)?
    };
    println!("{}", rendered);
    Ok(())
}
