#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use leadwire_config::AppConfig;
    use leadwire_credentials::{CredentialRecord, CredentialStore, MemoryCredentialStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const USER: &str = "user-1";

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            use_crm: true,
            ..AppConfig::default()
        })
    }

    fn sync_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sync-crm")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn store_with(service: &str, record: CredentialRecord) -> Arc<MemoryCredentialStore> {
        let store = Arc::new(MemoryCredentialStore::new());
        store.store("leadwire", USER, service, record).await.unwrap();
        store
    }

    #[tokio::test]
    async fn hubspot_sync_returns_the_provider_outcome() {
        let store = store_with("hubspot", CredentialRecord::from_fields([("apiKey", "k")])).await;
        let app = routes(test_config(), store);

        let response = app
            .oneshot(sync_request(json!({
                "userId": USER,
                "callRecord": { "summary": "called the lead", "durationSecs": 42 },
                "crmType": "hubspot"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Call record synced to hubspot.");
        assert_eq!(body["response"]["service"], "HubSpot");
        assert_eq!(body["response"]["recordId"], "12345");
        assert_eq!(body["response"]["status"], "success");
    }

    #[tokio::test]
    async fn bitrix_requires_a_webhook_url() {
        let store = store_with("bitrix", CredentialRecord::from_fields([("apiKey", "k")])).await;
        let app = routes(test_config(), store);

        let response = app
            .oneshot(sync_request(json!({
                "userId": USER,
                "callRecord": {},
                "crmType": "bitrix"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(
            body["error"],
            "Incomplete Bitrix24 credentials. Please reconnect your account in Settings."
        );
    }

    #[tokio::test]
    async fn unknown_crm_type_without_record_is_not_found() {
        // Fetch-first ordering: with nothing stored under the unknown name the
        // lookup fails before the membership check runs.
        let app = routes(test_config(), Arc::new(MemoryCredentialStore::new()));

        let response = app
            .oneshot(sync_request(json!({
                "userId": USER,
                "callRecord": {},
                "crmType": "salesforce"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response_json(response).await;
        assert_eq!(body["error"], "CRM credentials not found for salesforce.");
    }

    #[tokio::test]
    async fn unknown_crm_type_with_record_is_unsupported() {
        let store = store_with(
            "salesforce",
            CredentialRecord::from_fields([("apiKey", "k")]),
        )
        .await;
        let app = routes(test_config(), store);

        let response = app
            .oneshot(sync_request(json!({
                "userId": USER,
                "callRecord": {},
                "crmType": "salesforce"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Unsupported CRM type.");
    }

    #[tokio::test]
    async fn missing_call_record_is_reported_by_name() {
        let app = routes(test_config(), Arc::new(MemoryCredentialStore::new()));

        let response = app
            .oneshot(sync_request(json!({
                "userId": USER,
                "crmType": "hubspot"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Missing required parameter: callRecord");
    }

    #[tokio::test]
    async fn zoho_and_bitrix_report_their_own_record_ids() {
        let store = store_with("zoho", CredentialRecord::from_fields([("apiKey", "k")])).await;
        store
            .store(
                "leadwire",
                USER,
                "bitrix",
                CredentialRecord::from_fields([("webhookUrl", "https://b24.example/hook")]),
            )
            .await
            .unwrap();
        let app = routes(test_config(), store);

        let response = app
            .clone()
            .oneshot(sync_request(json!({
                "userId": USER,
                "callRecord": {},
                "crmType": "zoho"
            })))
            .await
            .unwrap();
        let body = response_json(response).await;
        assert_eq!(body["response"]["service"], "Zoho");
        assert_eq!(body["response"]["recordId"], "67890");

        let response = app
            .oneshot(sync_request(json!({
                "userId": USER,
                "callRecord": {},
                "crmType": "bitrix"
            })))
            .await
            .unwrap();
        let body = response_json(response).await;
        assert_eq!(body["response"]["service"], "Bitrix24");
        assert_eq!(body["response"]["recordId"], "abcde");
    }
}
