//! Run command

use crate::cli::RunArgs;
use crate::output;
use anyhow::Result;
use camino::Utf8Path;

const FAKEROOT: &str = "--fakeroot";

pub fn run(args: RunArgs, settings: Option<&Utf8Path>) -> Result<()> {
    let settings = super::load_settings(settings)?;
    let client = super::discover_client(&settings)?;

    let supports_fakeroot = client.supports_fakeroot();
    if args.fakeroot && !supports_fakeroot {
        output::warning(&format!(
            "{} does not support --fakeroot, running without it",
            client.executable()
        ));
    }

    let run_args = run_arguments(&args.run_args, args.fakeroot && supports_fakeroot);
    let volumes = bind_arguments(&args.volumes);

    client.run(
        &run_args,
        &volumes,
        &args.image,
        &args.args,
        args.entrypoint.as_deref(),
    )?;
    Ok(())
}

/// `--fakeroot` first (once) when requested, then the user's run arguments
fn run_arguments(run_args: &[String], fakeroot: bool) -> Vec<String> {
    let mut out = Vec::with_capacity(run_args.len() + 1);
    if fakeroot && !run_args.iter().any(|a| a == FAKEROOT) {
        out.push(FAKEROOT.to_string());
    }
    out.extend(run_args.iter().cloned());
    out
}

/// `--bind <volume>` pairs
fn bind_arguments(volumes: &[String]) -> Vec<String> {
    volumes
        .iter()
        .flat_map(|v| ["--bind".to_string(), v.clone()])
        .collect()
}
