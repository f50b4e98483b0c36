use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};

use carelink_identity::config::IdentityConfig;
use carelink_identity::domain::repository::AccessCodeRepository as _;
use carelink_identity::domain::types::{CODE_SWEEP_RETENTION_DAYS, PasswordPolicy};
use carelink_identity::infra::fhir::HttpResourceLinker;
use carelink_identity::router::build_router;
use carelink_identity::state::AppState;

#[tokio::main]
async fn main() {
    carelink_core::tracing::init();

    let config = IdentityConfig::from_env();

    let mut options = ConnectOptions::new(&config.database_url);
    options
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300));
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let linker = HttpResourceLinker::new(
        &config.fhir_base_url,
        Duration::from_secs(config.fhir_timeout_secs),
    )
    .expect("failed to build clinical-data client");

    let state = AppState {
        db,
        linker,
        jwt_secret: config.jwt_secret,
        code_ttl_secs: config.code_ttl_secs,
        code_ttl_max_secs: config.code_ttl_max_secs,
        password_policy: PasswordPolicy {
            min_len: config.password_min_len,
        },
    };

    // Hourly sweep of never-consumed expired codes past retention.
    // Consumed codes are audit tombstones and stay forever.
    let sweep_repo = state.access_code_repo();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(3600));
        loop {
            tick.tick().await;
            match sweep_repo
                .sweep_expired(chrono::Duration::days(CODE_SWEEP_RETENTION_DAYS))
                .await
            {
                Ok(0) => {}
                Ok(removed) => info!(removed, "swept expired access codes"),
                Err(e) => warn!(error = %e, "access code sweep failed"),
            }
        }
    });

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
