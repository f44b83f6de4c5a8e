//! Inspect command

use crate::cli::InspectArgs;
use anyhow::Result;
use camino::Utf8Path;
use sifctl_runtime::ImageSpec;

pub fn run(args: InspectArgs, settings: Option<&Utf8Path>) -> Result<()> {
    // Docker references are classified without a runtime
    let spec = match ImageSpec::from_scheme(&args.uri) {
        Some(spec) => spec,
        None => {
            let settings = super::load_settings(settings)?;
            super::discover_client(&settings)?.image_spec(&args.uri)
        }
    };

    println!("{}", spec);
    Ok(())
}
