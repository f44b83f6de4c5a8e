//! Common test utilities for sifctl-runtime
//!
//! This module provides shared test infrastructure including:
//! - A scripted, invocation-recording process runner
//! - Version banners of real runtime releases

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mocks;

pub use mocks::*;

pub const SINGULARITY_3_9: &str = "singularity version 3.9.2\n";
pub const SINGULARITY_CE_3_11: &str = "singularity-ce version 3.11.4-jammy\n";
pub const SINGULARITY_3_4: &str = "singularity version 3.4.2-1.el7\n";
pub const APPTAINER_1_1: &str = "apptainer version 1.1.0\n";
pub const LEGACY_BUILD: &str = "3.5.3-pull/123-0a5d\n";
