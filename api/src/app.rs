//! Application factory
//!
//! Builds the Actix-web application from already-constructed services so
//! that `main` and the integration tests share the same wiring.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    middleware::Logger,
    web, App, HttpResponse,
};

use crate::handlers::error::{error_response, json_error_handler};
use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes::auth::{self, AppState};

use mv_core::repositories::UserRepository;
use mv_core::services::verification::EmailServiceTrait;
use mv_infra::database::DatabasePool;
use mv_shared::{config::AppConfig, error_codes};

/// Create and configure the application with all dependencies
///
/// `database` is only used by the health check; tests running on in-memory
/// repositories pass `None`.
pub fn create_app<U, E>(
    app_state: web::Data<AppState<U, E>>,
    config: &AppConfig,
    database: Option<web::Data<DatabasePool>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    let mut app = App::new()
        .app_data(app_state)
        .app_data(web::Data::new(config.auth.session.clone()))
        .app_data(json_config);

    if let Some(database) = database {
        app = app.app_data(database);
    }

    // Registered last runs first: security, then CORS, then logging
    app.wrap(Logger::default())
        .wrap(create_cors(&config.cors))
        .wrap(SecurityMiddleware::new(config.environment))
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(auth::configure::<U, E>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check(database: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let database_status = match database {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "up",
            Ok(false) => "down",
            Err(e) => {
                log::error!("Database health check failed: {}", e);
                "down"
            }
        },
        None => "not_configured",
    };

    let status = if database_status == "down" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    HttpResponse::build(status).json(serde_json::json!({
        "status": if status.is_success() { "healthy" } else { "degraded" },
        "service": "mailverify-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
}
