//! Media extraction integration tests.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;
    use signfetch_media::{ArtifactSource, MediaError, TransportError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{generate, test_config};

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01\x00\x00\x00\x01";
    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00";

    /// A PNG whose base64 encoding is long enough to be found without a key hint.
    fn large_png() -> Vec<u8> {
        let mut png = PNG.to_vec();
        png.resize(1024, 0);
        png
    }

    async fn mount_response(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_should_save_inline_base64_image() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let png = large_png();

        mount_response(
            &server,
            200,
            json!({"code": 10000, "data": {"binary_data_base64": [STANDARD.encode(&png)]}}),
        )
        .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), "{}")
            .await
            .unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.source, Some(ArtifactSource::Base64));
        assert_eq!(outcome.saved.len(), 1);
        assert_eq!(outcome.saved[0].extension().unwrap(), "png");
        assert_eq!(fs::read(&outcome.saved[0]).unwrap(), png);
    }

    #[tokio::test]
    async fn test_should_not_download_urls_when_base64_was_saved() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        mount_response(
            &server,
            200,
            json!({
                "data": {
                    "image_base64": STANDARD.encode(GIF),
                    "image_urls": [format!("{}/img/a.png", server.uri())],
                },
            }),
        )
        .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), "{}")
            .await
            .unwrap();

        assert_eq!(outcome.source, Some(ArtifactSource::Base64));
        assert_eq!(outcome.saved.len(), 1);
        assert_eq!(outcome.saved[0].extension().unwrap(), "gif");
    }

    #[tokio::test]
    async fn test_should_download_url_candidates_in_order() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        mount_response(
            &server,
            200,
            json!({
                "data": {
                    "image_urls": [
                        format!("{}/img/a.png", server.uri()),
                        format!("{}/img/missing.jpg", server.uri()),
                        format!("{}/img/b", server.uri()),
                    ],
                },
            }),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/img/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/img/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/img/b"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(GIF))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), "{}")
            .await
            .unwrap();

        assert_eq!(outcome.source, Some(ArtifactSource::Url));
        let names: Vec<String> = outcome
            .saved
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("downloaded_") && names[0].ends_with("_0.png"));
        assert!(names[1].starts_with("downloaded_") && names[1].ends_with("_1.gif"));
        assert_eq!(fs::read(&outcome.saved[1]).unwrap(), GIF);
    }

    #[tokio::test]
    async fn test_should_fail_when_only_url_returns_404() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        mount_response(
            &server,
            200,
            json!({"image_url": format!("{}/gone.png", server.uri())}),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/gone.png"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), "{}")
            .await
            .unwrap();

        assert!(!outcome.success());
        assert_eq!(outcome.source, None);
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_should_scan_body_of_non_200_response() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        mount_response(
            &server,
            500,
            json!({"error": "partial", "image": STANDARD.encode(PNG)}),
        )
        .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), "{}")
            .await
            .unwrap();

        assert!(outcome.success());
        assert_eq!(file_names(dir.path()).len(), 1);
    }

    #[tokio::test]
    async fn test_should_fail_on_non_json_response() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), "{}")
            .await
            .unwrap();

        assert!(!outcome.success());
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_should_report_timeout_of_signed_request() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri(), dir.path());
        config.request_timeout_secs = 1;

        let result = generate(config, "{}").await;
        assert!(matches!(
            result,
            Err(MediaError::Transport {
                source: TransportError::Timeout,
                ..
            })
        ));
    }
}
