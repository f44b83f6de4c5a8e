//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// sifctl - Build and run Singularity/Apptainer images
#[derive(Parser, Debug)]
#[command(name = "sifctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the system settings file (default: $SIFCTL_SETTINGS, then ~/.sifctl/settings.yaml)
    #[arg(long, global = true)]
    pub settings: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Find a working singularity/apptainer invocation
    Detect(DetectArgs),

    /// Build a SIF image from a recipe or docker image
    Build(BuildArgs),

    /// Run a container from a SIF image
    Run(RunArgs),

    /// Classify an image reference or file
    Inspect(InspectArgs),

    /// Fetch a Docker Hub image manifest
    Manifest(ManifestArgs),
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Definition file (relative to --build-dir) or docker://, docker-archive: reference
    #[arg(long)]
    pub recipe: String,

    /// Directory receiving the image
    #[arg(long)]
    pub image_dir: Utf8PathBuf,

    /// Image file name (e.g. mnist.sif)
    #[arg(long)]
    pub image_name: String,

    /// Working directory for the build
    #[arg(long, default_value = ".")]
    pub build_dir: Utf8PathBuf,

    /// Extra argument passed to `build` (repeatable)
    #[arg(long = "build-arg", allow_hyphen_values = true)]
    pub build_args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// SIF image to run
    #[arg(long)]
    pub image: String,

    /// Extra argument passed to `run`/`exec` (repeatable)
    #[arg(long = "run-arg", allow_hyphen_values = true)]
    pub run_args: Vec<String>,

    /// Bind mount, passed as `--bind <volume>` (repeatable)
    #[arg(long = "volume")]
    pub volumes: Vec<String>,

    /// Program to exec inside the container instead of its runscript
    #[arg(long)]
    pub entrypoint: Option<String>,

    /// Request --fakeroot when the runtime supports it
    #[arg(long)]
    pub fakeroot: bool,

    /// Arguments for the container
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image reference or local file
    pub uri: String,
}

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Image reference, `[docker:][//]namespace/repository:tag`
    pub reference: String,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}
