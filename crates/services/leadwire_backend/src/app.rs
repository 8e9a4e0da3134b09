// --- File: crates/services/leadwire_backend/src/app.rs ---
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use leadwire_common::http::method_not_allowed;
use leadwire_config::AppConfig;
use leadwire_credentials::CredentialStore;

/// Builds the full application router.
///
/// The credential store is constructed once by the caller and the same handle
/// is injected into every feature router. The Twilio and CRM surfaces are
/// mounted only when their runtime flags are set; credential management is
/// always available.
pub fn app(config: Arc<AppConfig>, store: Arc<dyn CredentialStore>) -> Router {
    let mut api_router = Router::new()
        .route("/", get(|| async { "Welcome to Leadwire API!" }))
        .merge(leadwire_credentials::routes(config.clone(), store.clone()));

    if config.use_twilio {
        api_router = api_router.merge(leadwire_twilio::routes(config.clone(), store.clone()));
    }
    if config.use_crm {
        api_router = api_router.merge(leadwire_crm::routes(config.clone(), store.clone()));
    }

    // Wrong-method requests get the JSON envelope instead of a bare 405
    let api_router = api_router.method_not_allowed_fallback(method_not_allowed);

    #[allow(unused_mut)] // mutated only when the openapi feature is enabled
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use leadwire_credentials::openapi::CredentialsApiDoc;
        use leadwire_crm::openapi::CrmApiDoc;
        use leadwire_twilio::doc::TwilioApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Leadwire API",
                version = "0.1.0",
                description = "Leadwire Service API Docs",
            ),
            components(),
            tags( (name = "Leadwire", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CredentialsApiDoc::openapi());
        openapi_doc.merge(TwilioApiDoc::openapi());
        openapi_doc.merge(CrmApiDoc::openapi());

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    app
}
