//! # selfservice-server
//!
//! Axum server for the payments platform self-service Stripe onboarding
//! wizard. One GET and one POST route per wizard step under
//! `/account/{account_id}/stripe-setup/<step>`, plus a task-list overview
//! and a completion page. Every response is server-rendered HTML; POST
//! responds with either a redirect or the re-rendered form.

pub mod config;
pub mod handlers;
pub mod session;
pub mod state;
pub mod views;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{complete_page, get_step, health_check, post_step, task_list};
use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Wizard surface
        .route("/account/{account_id}/stripe-setup", get(task_list))
        .route("/account/{account_id}/stripe-setup/complete", get(complete_page))
        .route(
            "/account/{account_id}/stripe-setup/{step}",
            get(get_step).post(post_step),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
