#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use leadwire_config::{AppConfig, TwilioConfig};
    use leadwire_credentials::{CredentialRecord, CredentialStore, MemoryCredentialStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER: &str = "user-1";

    fn test_config(api_base: &str) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            use_twilio: true,
            twilio: Some(TwilioConfig {
                api_base: Some(api_base.to_string()),
            }),
            ..AppConfig::default()
        })
    }

    async fn seeded_store() -> Arc<MemoryCredentialStore> {
        let store = Arc::new(MemoryCredentialStore::new());
        store
            .store(
                "leadwire",
                USER,
                "twilio",
                CredentialRecord::from_fields([
                    ("accountSid", "AC1"),
                    ("authToken", "tok"),
                    ("phoneNumber", "+15550100"),
                ]),
            )
            .await
            .unwrap();
        store
    }

    fn make_call_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/make-call")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn successful_call_returns_sid_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
            .and(body_string_contains("To=%2B15550199"))
            .and(body_string_contains("From=%2B15550100"))
            .and(body_string_contains("Twiml="))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sid": "CA123",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        let app = routes(test_config(&server.uri()), seeded_store().await);
        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+15550199",
                "script": "Hello from leadwire"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["callSid"], "CA123");
        assert_eq!(body["status"], "queued");
        assert_eq!(body["message"], "Call initiated successfully to +15550199");
    }

    #[tokio::test]
    async fn missing_fields_are_reported_in_declared_order() {
        let server = MockServer::start().await;
        let app = routes(test_config(&server.uri()), seeded_store().await);

        let response = app
            .clone()
            .oneshot(make_call_request(json!({
                "targetPhoneNumber": "+15550199",
                "script": "hi"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Missing required parameter: userId");

        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "script": "hi"
            })))
            .await
            .unwrap();
        let body = response_json(response).await;
        assert_eq!(body["error"], "Missing required parameter: targetPhoneNumber");
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let server = MockServer::start().await;
        let app = routes(
            test_config(&server.uri()),
            Arc::new(MemoryCredentialStore::new()),
        );

        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+15550199",
                "script": "hi"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response_json(response).await;
        assert_eq!(
            body["error"],
            "Twilio credentials not found for this user. Please connect your account in Settings."
        );
    }

    #[tokio::test]
    async fn record_missing_auth_token_is_incomplete() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryCredentialStore::new());
        store
            .store(
                "leadwire",
                USER,
                "twilio",
                CredentialRecord::from_fields([
                    ("accountSid", "AC1"),
                    ("phoneNumber", "+15550100"),
                ]),
            )
            .await
            .unwrap();

        let app = routes(test_config(&server.uri()), store);
        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+15550199",
                "script": "hi"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(
            body["error"],
            "Incomplete Twilio credentials. Please reconnect your account in Settings."
        );
        assert_eq!(body["details"], "missing credential field: authToken");
    }

    #[tokio::test]
    async fn invalid_destination_code_maps_to_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 21211,
                "message": "The 'To' number +1 is not a valid phone number.",
                "status": 400
            })))
            .mount(&server)
            .await;

        let app = routes(test_config(&server.uri()), seeded_store().await);
        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+1",
                "script": "hi"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Invalid phone number format");
        assert_eq!(body["providerCode"], 21211);
        assert_eq!(
            body["details"],
            "The 'To' number +1 is not a valid phone number."
        );
    }

    #[tokio::test]
    async fn auth_failure_code_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 20003,
                "message": "Authenticate",
                "status": 401
            })))
            .mount(&server)
            .await;

        let app = routes(test_config(&server.uri()), seeded_store().await);
        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+15550199",
                "script": "hi"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response_json(response).await;
        assert_eq!(
            body["error"],
            "Authentication failed - please check your Twilio credentials"
        );
        assert_eq!(body["providerCode"], 20003);
    }

    #[tokio::test]
    async fn unknown_provider_code_is_a_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 13224,
                "message": "Call rejected",
                "status": 400
            })))
            .mount(&server)
            .await;

        let app = routes(test_config(&server.uri()), seeded_store().await);
        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+15550199",
                "script": "hi"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Failed to initiate call");
        assert_eq!(body["providerCode"], 13224);
        assert_eq!(body["details"], "Call rejected");
    }

    #[tokio::test]
    async fn tone_and_language_reach_the_voice_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
            // form-encoded TwiML: `voice="alice" language="en-GB"`
            .and(body_string_contains("voice%3D%22alice%22"))
            .and(body_string_contains("language%3D%22en-GB%22"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sid": "CA124",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        let app = routes(test_config(&server.uri()), seeded_store().await);
        let response = app
            .oneshot(make_call_request(json!({
                "userId": USER,
                "targetPhoneNumber": "+15550199",
                "script": "Guten Tag",
                "tone": "alice",
                "language": "en-GB"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
