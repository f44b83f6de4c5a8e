//! Build command

use crate::cli::BuildArgs;
use crate::output;
use anyhow::Result;
use camino::Utf8Path;
use sifctl_runtime::BuildOutcome;

pub fn run(args: BuildArgs, settings: Option<&Utf8Path>) -> Result<()> {
    let settings = super::load_settings(settings)?;
    let client = super::discover_client(&settings)?;

    let outcome = client.build(
        &args.build_dir,
        &args.recipe,
        &args.image_dir,
        &args.image_name,
        &args.build_args,
    )?;

    match outcome {
        BuildOutcome::Built(path) => output::success(&format!("Built {}", path.display())),
        BuildOutcome::AlreadyExists(path) => {
            output::info(&format!("Image already exists: {}", path.display()))
        }
    }
    Ok(())
}
