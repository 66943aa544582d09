//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::keycloak::KeycloakClient;
use crate::middleware::ObservabilityLayer;
use crate::repository::{SchoolRepository, SchoolRepositoryImpl};
use crate::service::{SchoolRegistry, StudentProvisioner};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
///
/// Built once at startup; the store pool and identity provider client are
/// shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub school_repo: Arc<SchoolRepositoryImpl>,
    pub school_registry: Arc<SchoolRegistry<SchoolRepositoryImpl>>,
    pub student_provisioner: Arc<StudentProvisioner<SchoolRepositoryImpl, KeycloakClient>>,
}

impl HasServices for AppState {
    type SchoolRepo = SchoolRepositoryImpl;
    type Provider = KeycloakClient;

    fn config(&self) -> &Config {
        &self.config
    }

    fn school_registry(&self) -> &SchoolRegistry<Self::SchoolRepo> {
        &self.school_registry
    }

    fn student_provisioner(&self) -> &StudentProvisioner<Self::SchoolRepo, Self::Provider> {
        &self.student_provisioner
    }

    async fn check_ready(&self) -> bool {
        self.school_repo.ping().await.is_ok()
    }
}

/// Run the server
pub async fn run(config: Config, prometheus: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let keycloak_client = Arc::new(KeycloakClient::new(config.keycloak.clone())?);
    info!(
        "Identity provider: Keycloak realm '{}' at {}",
        keycloak_client.realm(),
        config.keycloak.url
    );

    let school_repo = Arc::new(SchoolRepositoryImpl::new(db_pool));
    let school_registry = Arc::new(SchoolRegistry::new(school_repo.clone()));
    let student_provisioner = Arc::new(StudentProvisioner::new(
        school_repo.clone(),
        keycloak_client,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        school_repo,
        school_registry,
        student_provisioner,
    };

    let app = build_router(state, prometheus);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!(
        "HTTP server started on {} (max {} concurrent requests)",
        http_addr, config.max_instances
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so tests can drive the same routes with in-memory
/// collaborators.
pub fn build_router<S: HasServices>(state: S, prometheus: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_instances = state.config().max_instances;

    let metrics_router = Router::new()
        .route("/metrics", get(api::health::scrape))
        .with_state(Arc::new(prometheus));

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Operations accept every method and reject non-POST with a 400 body
        .route("/registerSchool", any(api::school::register::<S>))
        .route("/createStudentAccount", any(api::student::create::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(GlobalConcurrencyLimitLayer::new(max_instances))
        .layer(TraceLayer::new_for_http())
        .layer(ObservabilityLayer)
        .layer(cors)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
