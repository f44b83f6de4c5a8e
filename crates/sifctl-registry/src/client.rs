use crate::error::{RegistryError, Result};
use crate::reference::ImageReference;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Docker Hub token service
pub const DEFAULT_AUTH_URL: &str = "https://auth.docker.io";

/// Docker Hub registry API
pub const DEFAULT_REGISTRY_URL: &str = "https://registry-1.docker.io";

/// `service` parameter sent to the token endpoint
pub const REGISTRY_SERVICE: &str = "registry.docker.io";

/// Media type requested from the manifest endpoint
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Default timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anonymous Docker Hub client.
///
/// Every manifest lookup fetches a fresh pull token; nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct DockerHubClient {
    client: Client,
    auth_url: String,
    registry_url: String,
}

impl DockerHubClient {
    /// Client against the public Docker Hub endpoints
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_AUTH_URL, DEFAULT_REGISTRY_URL)
    }

    /// Client against custom token and registry base URLs
    pub fn with_endpoints(
        auth_url: impl Into<String>,
        registry_url: impl Into<String>,
    ) -> Result<Self> {
        Self::build(auth_url.into(), registry_url.into(), DEFAULT_TIMEOUT)
    }

    /// Rebuild the client with a different request timeout
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        Self::build(self.auth_url, self.registry_url, timeout)
    }

    fn build(auth_url: String, registry_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sifctl/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            auth_url: auth_url.trim_end_matches('/').to_string(),
            registry_url: registry_url.trim_end_matches('/').to_string(),
        })
    }

    /// Token service base URL
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Registry API base URL
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Obtain an anonymous pull token for `namespace/repository`
    pub fn get_token(&self, namespace: &str, repository: &str) -> Result<String> {
        let url = format!(
            "{}/token?service={}&scope=repository:{}/{}:pull",
            self.auth_url, REGISTRY_SERVICE, namespace, repository
        );
        debug!("Requesting pull token from: {}", url);

        let response = self.client.get(&url).send()?;
        let body = expect_ok(response, &url, |status, url, body| {
            RegistryError::TokenRequestFailed { status, url, body }
        })?;

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| RegistryError::invalid_response(&url, e.to_string()))?;
        trace!("Received pull token for {}/{}", namespace, repository);

        Ok(token.token)
    }

    /// Fetch the v2 manifest of `[docker:][/]*namespace/repository:tag`
    pub fn get_manifest(&self, reference: &str) -> Result<serde_json::Value> {
        let reference = ImageReference::parse(reference)?;
        self.get_manifest_for(&reference)
    }

    /// Fetch the v2 manifest of an already parsed reference
    pub fn get_manifest_for(&self, reference: &ImageReference) -> Result<serde_json::Value> {
        let token = self.get_token(&reference.namespace, &reference.repository)?;

        let url = format!(
            "{}/v2/{}/{}/manifests/{}",
            self.registry_url, reference.namespace, reference.repository, reference.tag
        );
        debug!("Fetching manifest from: {}", url);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| RegistryError::invalid_response(&url, format!("unusable token: {}", e)))?;

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, bearer)
            .header(ACCEPT, HeaderValue::from_static(MANIFEST_V2_MEDIA_TYPE))
            .send()?;
        let body = expect_ok(response, &url, |status, url, body| {
            RegistryError::ManifestRequestFailed { status, url, body }
        })?;

        serde_json::from_str(&body).map_err(|e| RegistryError::invalid_response(&url, e.to_string()))
    }
}

/// Return the body of a 200 response, or build an error from status, url, and body
fn expect_ok(
    response: Response,
    url: &str,
    rejected: impl FnOnce(u16, String, String) -> RegistryError,
) -> Result<String> {
    let status = response.status();
    let body = response.text()?;

    if status != StatusCode::OK {
        debug!("{} answered {}", url, status);
        return Err(rejected(status.as_u16(), url.to_string(), body));
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}
