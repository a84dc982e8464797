use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mv_api::{create_app, AppState};
use mv_core::services::{
    AuthService, AuthServiceConfig, TokenService, TokenServiceConfig, VerificationService,
    VerificationServiceConfig,
};
use mv_infra::database::{DatabasePool, MySqlUserRepository};
use mv_infra::email::create_email_service;
use mv_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.environment);

    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        "Starting MailVerify API server"
    );

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;
    tracing::info!(pool = %pool.get_statistics(), "Database ready");

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    if config.environment.is_production() && config.email.is_mock() {
        tracing::warn!("EMAIL_PROVIDER is mock in production; verification codes are only logged");
    }
    let email_service =
        create_email_service(&config.email).context("failed to configure the email transport")?;

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        token_service,
        AuthServiceConfig::from(&config.auth),
    ));
    let verification_service = Arc::new(
        VerificationService::new(
            user_repository,
            email_service,
            VerificationServiceConfig::from_app_config(&config.verification, &config.email),
        )
        .context("failed to configure the verification service")?,
    );

    let app_state = web::Data::new(AppState::new(
        auth_service,
        verification_service,
        config.auth.session.clone(),
    ));
    let database = web::Data::new(pool.clone());
    let app_config = config.clone();

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &app_config, Some(database.clone()))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// `RUST_LOG` wins; otherwise the environment's default level.
/// `log` records from actix and the handlers are captured as well.
fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
