//! Wiremock helpers mimicking the Docker Hub token and manifest endpoints

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-pull-token";
pub const MANIFEST_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";
pub const CONFIG_DIGEST: &str =
    "sha256:1f4a5e0c3b2d9f8e7a6b5c4d3e2f1a0b9c8d7e6f5a4b3c2d1e0f9a8b7c6d5e4f";

/// A minimal schema 2 manifest body
pub fn sample_manifest() -> serde_json::Value {
    json!({
        "schemaVersion": 2,
        "mediaType": MANIFEST_MEDIA_TYPE,
        "config": {
            "mediaType": "application/vnd.docker.container.image.v1+json",
            "size": 1457,
            "digest": CONFIG_DIGEST
        },
        "layers": [{
            "mediaType": "application/vnd.docker.image.rootfs.diff.tar.gzip",
            "size": 2811321,
            "digest": "sha256:31e352740f534f9ad170f75378a84fe453d6156e40700b882d737a8f4a6988a3"
        }]
    })
}

/// Token endpoint answering 200 with `{"token": TEST_TOKEN}` for `namespace/repository`
pub async fn mock_token(server: &MockServer, namespace: &str, repository: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/token"))
        .and(query_param("service", "registry.docker.io"))
        .and(query_param(
            "scope",
            format!("repository:{}/{}:pull", namespace, repository),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": TEST_TOKEN, "expires_in": 300 })),
        )
        .expect(expected)
        .mount(server)
        .await;
}

/// Token endpoint answering `status` with a plain body
pub async fn mock_token_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Token endpoint answering 200 with an arbitrary body
pub async fn mock_token_body(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Manifest endpoint requiring the test bearer token and the v2 media type
pub async fn mock_manifest(
    server: &MockServer,
    image_path: &str,
    response: ResponseTemplate,
    expected: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{}", image_path)))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header("Accept", MANIFEST_MEDIA_TYPE))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

/// Manifest endpoint that must never be hit
pub async fn forbid_manifest_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex("^/v2/.*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
