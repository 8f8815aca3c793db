//! Signed request integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use signfetch_auth::{Credential, RequestSigner, SigningRequest, format_query};
    use signfetch_media::MediaError;
    use wiremock::matchers::{body_string, header, header_regex, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{TEST_ACCESS_KEY, TEST_SECRET_KEY, fixed_time, generate, test_config};

    const BODY: &str = r#"{"req_key":"jimeng_t2i_v40","prompt":"a red fox"}"#;

    #[tokio::test]
    async fn test_should_send_signed_headers_to_endpoint() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let host = server.address().to_string();
        let query = format_query([("Action", "CVProcess"), ("Version", "2022-08-31")]);
        let expected = RequestSigner::new("cn-north-1", "cv").sign(
            &Credential::new(TEST_ACCESS_KEY, TEST_SECRET_KEY).unwrap(),
            &fixed_time(),
            &SigningRequest {
                method: "POST",
                path: "/",
                query: &query,
                host: &host,
                body: BODY,
            },
        );

        Mock::given(method("POST"))
            .and(path("/"))
            .and(query_param("Action", "CVProcess"))
            .and(query_param("Version", "2022-08-31"))
            .and(header("x-date", "20240301T120000Z"))
            .and(header("x-content-sha256", expected.x_content_sha256.as_str()))
            .and(header("content-type", "application/json"))
            .and(header_regex("user-agent", "^signfetch/"))
            .and(body_string(BODY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 10000})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = generate(test_config(&server.uri(), dir.path()), BODY)
            .await
            .expect("request should be sent");

        assert!(!outcome.success());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let authorization = requests[0]
            .headers
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(authorization, expected.authorization);
        assert!(authorization.contains(&format!("Signature={}", expected.signature)));
    }

    #[tokio::test]
    async fn test_should_not_send_request_without_secret_key() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri(), dir.path());
        config.secret_key = None;

        let result = generate(config, BODY).await;
        assert!(matches!(result, Err(MediaError::Auth(_))));
    }
}
