//! Singularity-family container runtime client for sifctl
//!
//! This crate provides functionality for:
//! - Parsing `singularity`/`singularity-ce`/`apptainer` version banners
//! - Discovering a working runtime invocation (configured, plain, or `sudo`)
//! - Building SIF images and running containers through the runtime CLI
//! - Classifying image references (`docker://`, `docker-archive:`, SIF files)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sifctl_core::{DuctRunner, SystemSettings};
//! use sifctl_runtime::discover;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = SystemSettings::load(None)?;
//!     let client = discover(&settings, Arc::new(DuctRunner::new()))?;
//!
//!     let args = if client.supports_fakeroot() {
//!         vec!["--fakeroot".to_string()]
//!     } else {
//!         Vec::new()
//!     };
//!     client.run(&args, &[], "mnist.sif", &["train".to_string()], None)?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod discovery;
pub mod error;
pub mod executable;
pub mod image;
pub mod version;

pub use client::{BuildOutcome, ClientState, RuntimeClient};
pub use discovery::{discover, ClientDiscovery, DEFAULT_CANDIDATES, SETTINGS_PLATFORM};
pub use error::{Result, RuntimeError};
pub use executable::Executable;
pub use image::{ImageSpec, RecipeSource, DOCKER_ARCHIVE_SCHEME, DOCKER_SCHEME};
pub use version::{Runtime, Version};
