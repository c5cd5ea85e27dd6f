use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schedule_portal::api::router;
use schedule_portal::auth::CredentialVerifier;
use schedule_portal::config::{AppConfig, AuthMode};
use schedule_portal::firebase::FirebaseRestStore;
use schedule_portal::firebase::auth::FirebasePasswordAuth;
use schedule_portal::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "schedule_portal=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    let form_kind = config.auth.form_kind();

    let verifier: Arc<dyn CredentialVerifier> = match config.auth {
        AuthMode::Static(credentials) => Arc::new(credentials),
        AuthMode::Firebase(auth_config) => Arc::new(FirebasePasswordAuth::new(auth_config)?),
    };
    let schedule_path = config.firebase.schedule_path.clone();
    let remote = Arc::new(FirebaseRestStore::new(config.firebase)?);

    let state = AppState::new(remote, verifier, form_kind, schedule_path);
    let app = router(state);

    info!("listening on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
