//! Image reference classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// URI scheme of images pulled from a Docker registry
pub const DOCKER_SCHEME: &str = "docker://";

/// URI scheme of local `docker save` archives
pub const DOCKER_ARCHIVE_SCHEME: &str = "docker-archive:";

/// How an image reference or file should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSpec {
    /// Anything not covered by the other variants
    Other,
    /// Docker registry image (`docker://`)
    Docker,
    /// Local tar archive (`docker-archive:`)
    DockerArchive,
    /// Local Singularity Image File
    SingularityImageFile,
}

impl ImageSpec {
    /// Classify by URI scheme alone; `None` when the scheme is not a Docker one
    pub fn from_scheme(uri: &str) -> Option<Self> {
        if uri.starts_with(DOCKER_SCHEME) {
            Some(Self::Docker)
        } else if uri.starts_with(DOCKER_ARCHIVE_SCHEME) {
            Some(Self::DockerArchive)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Docker => "docker",
            Self::DockerArchive => "docker-archive",
            Self::SingularityImageFile => "sif",
        }
    }
}

impl fmt::Display for ImageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a build recipe comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSource {
    /// Pulled or unpacked by the runtime itself (`docker://`, `docker-archive:`)
    Remote,
    /// Definition file relative to the build directory
    File,
}

impl RecipeSource {
    pub fn classify(recipe: &str) -> Self {
        if ImageSpec::from_scheme(recipe).is_some() {
            Self::Remote
        } else {
            Self::File
        }
    }
}
