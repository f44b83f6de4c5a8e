use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix accepted in front of a reference (`docker:` or `docker://`)
const DOCKER_PREFIX: &str = "docker:";

/// Docker Hub image reference: `namespace/repository:tag`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference {
    /// User or organization (e.g., "mlcommons")
    pub namespace: String,
    /// Repository within the namespace (e.g., "mnist")
    pub repository: String,
    /// Tag (e.g., "0.0.1")
    pub tag: String,
}

impl ImageReference {
    /// Parse `[docker:][/]*namespace/repository:tag`.
    ///
    /// Exactly one `:` and exactly one `/` must remain after stripping the
    /// optional `docker:` prefix and leading slashes, so `docker://ns/repo:tag`
    /// is accepted while registry hosts, ports, digests, nested paths, and
    /// missing tags are rejected.
    pub fn parse(name: &str) -> Result<Self> {
        let stripped = name.strip_prefix(DOCKER_PREFIX).unwrap_or(name);
        let stripped = stripped.trim_start_matches('/');

        let invalid = || RegistryError::invalid_reference(stripped);

        let name_tag: Vec<&str> = stripped.split(':').collect();
        let [path, tag] = name_tag.as_slice() else {
            return Err(invalid());
        };

        let namespace_repository: Vec<&str> = path.split('/').collect();
        let [namespace, repository] = namespace_repository.as_slice() else {
            return Err(invalid());
        };

        if namespace.is_empty() || repository.is_empty() || tag.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            namespace: namespace.to_string(),
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }

    /// `namespace/repository`
    pub fn path(&self) -> String {
        format!("{}/{}", self.namespace, self.repository)
    }
}

impl FromStr for ImageReference {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.namespace, self.repository, self.tag)
    }
}
