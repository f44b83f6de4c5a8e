//! Runtime version banner parsing
//!
//! `singularity --version` and `apptainer --version` print differently
//! shaped banners depending on the release line:
//!
//! | Banner                               | Runtime       |
//! |--------------------------------------|---------------|
//! | `singularity version 3.7.4`          | Singularity   |
//! | `singularity-ce version 3.9.2`       | Singularity   |
//! | `apptainer version 1.1.0`            | Apptainer     |
//! | `3.5.3-pull/123-0a5d` (legacy build) | Singularity   |
//!
//! SingularityCE forked from Singularity at 3.7.4 and continued the same
//! version line, so both are reported as [`Runtime::Singularity`].

use crate::error::{Result, RuntimeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Banner prefixes, checked in order
const BANNER_PREFIXES: &[(&str, Runtime)] = &[
    ("singularity version ", Runtime::Singularity),
    ("singularity-ce version ", Runtime::Singularity),
    ("apptainer version ", Runtime::Apptainer),
];

/// Container runtime family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    /// Banner not recognized
    Unknown,
    /// Apptainer (the Linux Foundation continuation of Singularity)
    Apptainer,
    /// Singularity or SingularityCE
    Singularity,
}

impl Runtime {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Apptainer => "apptainer",
            Self::Singularity => "singularity",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime family plus its semantic version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub runtime: Runtime,
    pub version: semver::Version,
}

impl Version {
    pub fn new(runtime: Runtime, version: semver::Version) -> Self {
        Self { runtime, version }
    }

    /// Parse the output of `<exe> --version`.
    ///
    /// Unrecognized banners are parsed as a bare version with
    /// [`Runtime::Unknown`] and a warning is logged. Legacy build strings
    /// (`x.y.z-pull/123-0a5d`) have their first `/` turned into the semver
    /// build-metadata separator `+`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        let (mut runtime, mut rest) = BANNER_PREFIXES
            .iter()
            .find_map(|(prefix, runtime)| {
                trimmed
                    .strip_prefix(prefix)
                    .map(|rest| (*runtime, rest.trim().to_string()))
            })
            .unwrap_or((Runtime::Unknown, trimmed.to_string()));

        if rest.contains('/') {
            rest = rest.replacen('/', "+", 1);
            if runtime == Runtime::Unknown {
                runtime = Runtime::Singularity;
            }
        }

        if runtime == Runtime::Unknown {
            warn!(
                "Unrecognized container runtime version string: {}",
                trimmed
            );
        }

        let version =
            semver::Version::parse(&rest).map_err(|source| RuntimeError::MalformedVersion {
                raw: trimmed.to_string(),
                source,
            })?;

        Ok(Self { runtime, version })
    }

    /// True if `(runtime, version)` is at least `major.minor.patch` of `runtime`
    pub fn is_at_least(&self, runtime: Runtime, major: u64, minor: u64, patch: u64) -> bool {
        self.runtime == runtime && self.version >= semver::Version::new(major, minor, patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.runtime, self.version)
    }
}

impl std::str::FromStr for Version {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
