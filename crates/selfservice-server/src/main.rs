//! Self-service Onboarding Server
//!
//! Axum-based server for the Stripe setup wizard. Runs against the
//! connector service when `CONNECTOR_URL` is set; otherwise falls back to
//! in-memory stores and a mock PSP client for local development.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend_clients::{HttpProgressStore, HttpPspClient};
use psp_onboarding::{stripe_setup_plan, MockPspClient, PspClient};
use selfservice_server::config::ServerConfig;
use selfservice_server::state::AppState;
use wizard_core::{
    DraftStore, MemoryDraftStore, MemoryProgressStore, ProgressFlags, ProgressStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // Wire backends: connector-backed when configured, in-memory otherwise
    let (progress, psp): (Arc<dyn ProgressStore>, Arc<dyn PspClient>) =
        if config.connector_url.is_some() {
            tracing::info!("✓ Connector configured");
            (
                Arc::new(HttpProgressStore::from_env()?),
                Arc::new(HttpPspClient::from_env()?),
            )
        } else {
            tracing::warn!("⚠ CONNECTOR_URL not set - using in-memory stores");
            tracing::warn!("  Accounts must be seeded before the wizard will serve them");
            let memory = MemoryProgressStore::new();
            // A demo account so local runs have something to click through
            memory.insert_account("demo", ProgressFlags::new());
            (Arc::new(memory), Arc::new(MockPspClient::new()))
        };

    let drafts: Arc<dyn DraftStore> = Arc::new(MemoryDraftStore::new());
    let plan = Arc::new(stripe_setup_plan());

    tracing::info!("Wizard steps ({}):", plan.steps().len());
    for step in plan.steps() {
        tracing::info!("  • {}", step.name);
    }
    tracing::info!("Completion routing: {:?}", config.wizard.completion_routing);

    let state = AppState {
        progress,
        psp,
        drafts,
        plan,
        wizard_config: config.wizard,
    };

    let app = selfservice_server::app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("🚀 selfservice server running on http://{}", config.bind_addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                                    - Health check");
    tracing::info!("  GET  /account/{{id}}/stripe-setup                 - Task list");
    tracing::info!("  GET  /account/{{id}}/stripe-setup/{{step}}          - Step form");
    tracing::info!("  POST /account/{{id}}/stripe-setup/{{step}}          - Submit step");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
