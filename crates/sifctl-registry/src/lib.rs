//! Docker Hub registry client for sifctl
//!
//! This crate provides functionality for:
//! - Parsing `[docker:][/]*namespace/repository:tag` image references
//! - Obtaining anonymous pull tokens from the Docker Hub token service
//! - Fetching v2 image manifests as raw JSON
//!
//! # Example
//!
//! ```no_run
//! use sifctl_registry::DockerHubClient;
//!
//! fn main() -> anyhow::Result<()> {
//!     let client = DockerHubClient::new()?;
//!     let manifest = client.get_manifest("docker://mlcommons/mnist:0.0.1")?;
//!
//!     println!("{}", manifest["config"]["digest"]);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod reference;

pub use client::{
    DockerHubClient, DEFAULT_AUTH_URL, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT,
    MANIFEST_V2_MEDIA_TYPE, REGISTRY_SERVICE,
};
pub use error::{RegistryError, Result};
pub use reference::ImageReference;
