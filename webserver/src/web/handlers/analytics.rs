//! Aggregate and dashboard endpoints

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};
use shared::component_debug;
use std::sync::Arc;

use crate::core::analytics::{RecentSubmission, TeamSummary};
use crate::core::presentation::{AnalyticsView, DashboardView};
use crate::core::{DashboardStats, EvaluationRollup};
use crate::error::WebServerResult;
use crate::state::WebServerState;

pub async fn stats(State(state): State<Arc<WebServerState>>) -> WebServerResult<Json<DashboardStats>> {
    let snapshot = state.repository.snapshot().await?;
    Ok(Json(state.analytics.dashboard_stats(&snapshot)))
}

pub async fn rollup(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<EvaluationRollup>> {
    Ok(Json(state.repository.rollup(&id).await?))
}

pub async fn analytics(State(state): State<Arc<WebServerState>>) -> WebServerResult<Json<AnalyticsView>> {
    let snapshot = state.repository.snapshot().await?;
    let report = state.analytics.report(&snapshot);
    component_debug!(
        shared::Component::Analytics,
        submissions = report.stats.total_submissions,
        "📊 Built analytics report"
    );
    Ok(Json(state.presenter.analytics(report)))
}

pub async fn team_summaries(State(state): State<Arc<WebServerState>>) -> WebServerResult<Json<Vec<TeamSummary>>> {
    let snapshot = state.repository.snapshot().await?;
    Ok(Json(state.analytics.team_summaries(&snapshot)))
}

pub async fn recent_submissions(
    State(state): State<Arc<WebServerState>>,
) -> WebServerResult<Json<Vec<RecentSubmission>>> {
    let snapshot = state.repository.snapshot().await?;
    Ok(Json(state.analytics.recent_submissions(&snapshot)))
}

pub async fn dashboard(State(state): State<Arc<WebServerState>>) -> WebServerResult<Json<DashboardView>> {
    let snapshot = state.repository.snapshot().await?;
    let engine = &state.analytics;
    let view = state.presenter.dashboard(
        engine.dashboard_stats(&snapshot),
        engine.team_leaderboard(&snapshot),
        engine.recent_submissions(&snapshot),
        &engine.award_distribution(&snapshot),
    );
    Ok(Json(view))
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<WebServerState>>) -> Json<Value> {
    let thresholds = state.presenter.thresholds();
    Json(json!({
        "status": "healthy",
        "service": "hackathon-webserver",
        "backend": state.repository.backend_name(),
        "uptime_seconds": state.get_uptime_seconds(),
        "score_thresholds": thresholds,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
