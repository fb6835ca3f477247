//! Main webserver implementation
//!
//! Owns the configuration and shared state, builds the axum router and runs
//! the HTTP server until Ctrl+C.

use axum::Router;
use axum::routing::get;
use shared::{Company, Evaluation, Judge, Problem, Submission, Team, component_info, logging};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::{analytics, records};

/// Main webserver struct
#[derive(Clone)]
pub struct WebServer {
    config: ServerConfig,
    state: Arc<WebServerState>,
}

impl WebServer {
    pub fn new(config: ServerConfig, state: WebServerState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Get server state for external access
    pub fn state(&self) -> Arc<WebServerState> {
        self.state.clone()
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let address = self.config.bind_address();
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {address}: {e}")))?;

        component_info!(
            shared::Component::Server,
            backend = self.state.repository.backend_name(),
            "🌐 Web server listening on http://{}",
            address
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        logging::log_success(shared::Component::Server, "WebServer stopped gracefully");
        Ok(())
    }
}

/// Every route of the REST API over the given state
pub fn build_router(state: Arc<WebServerState>) -> Router {
    Router::new()
        // Teams
        .route("/api/teams", get(records::list::<Team>).post(records::create::<Team>))
        .route(
            "/api/teams/:id",
            get(records::get::<Team>)
                .put(records::update::<Team>)
                .delete(records::delete::<Team>),
        )
        .route("/api/teams/:id/submissions", get(records::team_submissions))
        // Companies
        .route(
            "/api/companies",
            get(records::list::<Company>).post(records::create::<Company>),
        )
        .route(
            "/api/companies/:id",
            get(records::get::<Company>)
                .put(records::update::<Company>)
                .delete(records::delete::<Company>),
        )
        .route("/api/companies/:id/problems", get(records::company_problems))
        // Problems
        .route(
            "/api/problems",
            get(records::list::<Problem>).post(records::create::<Problem>),
        )
        .route(
            "/api/problems/:id",
            get(records::get::<Problem>)
                .put(records::update::<Problem>)
                .delete(records::delete::<Problem>),
        )
        .route("/api/problems/:id/submissions", get(records::problem_submissions))
        // Judges
        .route("/api/judges", get(records::list::<Judge>).post(records::create::<Judge>))
        .route(
            "/api/judges/:id",
            get(records::get::<Judge>)
                .put(records::update::<Judge>)
                .delete(records::delete::<Judge>),
        )
        // Submissions
        .route(
            "/api/submissions",
            get(records::list::<Submission>).post(records::create::<Submission>),
        )
        .route(
            "/api/submissions/:id",
            get(records::get::<Submission>)
                .put(records::update::<Submission>)
                .delete(records::delete::<Submission>),
        )
        .route("/api/submissions/:id/rollup", get(analytics::rollup))
        // Evaluations
        .route(
            "/api/evaluations",
            get(records::list::<Evaluation>).post(records::create::<Evaluation>),
        )
        .route(
            "/api/evaluations/:id",
            get(records::get::<Evaluation>)
                .put(records::update::<Evaluation>)
                .delete(records::delete::<Evaluation>),
        )
        .route("/api/evaluations/submission/:id", get(records::submission_evaluations))
        .route("/api/evaluations/judge/:id", get(records::judge_evaluations))
        // Aggregates
        .route("/api/stats", get(analytics::stats))
        .route("/api/analytics", get(analytics::analytics))
        .route("/api/analytics/teams", get(analytics::team_summaries))
        .route("/api/analytics/recent-submissions", get(analytics::recent_submissions))
        .route("/api/dashboard", get(analytics::dashboard))
        // Health check
        .route("/health", get(analytics::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(shared::Component::Server, "Received Ctrl+C signal"),
        Err(err) => logging::log_error(shared::Component::Server, "Signal handling", &err),
    }
}
