//! Generic CRUD handlers shared by the six collections
//!
//! Bodies are taken as raw bytes and parsed here so every malformed payload,
//! whatever the reason, comes back as a 400 with a JSON message.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use shared::{Entity, Evaluation, ListQuery, Problem, Submission, parse_payload};
use std::sync::Arc;

use crate::error::WebServerResult;
use crate::state::WebServerState;

pub async fn list<E: Entity>(
    State(state): State<Arc<WebServerState>>,
    Query(query): Query<ListQuery>,
) -> WebServerResult<Json<Vec<E>>> {
    Ok(Json(state.repository.list::<E>(&query).await?))
}

pub async fn get<E: Entity>(State(state): State<Arc<WebServerState>>, Path(id): Path<String>) -> WebServerResult<Json<E>> {
    Ok(Json(state.repository.get::<E>(&id).await?))
}

pub async fn create<E: Entity>(
    State(state): State<Arc<WebServerState>>,
    body: Bytes,
) -> WebServerResult<(StatusCode, Json<E>)> {
    let new: E::New = parse_payload(E::COLLECTION, &body)?;
    let created = state.repository.create::<E>(new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<E: Entity>(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> WebServerResult<Json<E>> {
    let patch: E::Patch = parse_payload(E::COLLECTION, &body)?;
    Ok(Json(state.repository.update::<E>(&id, patch).await?))
}

pub async fn delete<E: Entity>(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<StatusCode> {
    state.repository.delete::<E>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn company_problems(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Vec<Problem>>> {
    Ok(Json(state.repository.list_by("companyId", &id).await?))
}

pub async fn team_submissions(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Vec<Submission>>> {
    Ok(Json(state.repository.list_by("teamId", &id).await?))
}

pub async fn problem_submissions(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Vec<Submission>>> {
    Ok(Json(state.repository.list_by("problemId", &id).await?))
}

pub async fn submission_evaluations(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Vec<Evaluation>>> {
    Ok(Json(state.repository.list_by("submissionId", &id).await?))
}

pub async fn judge_evaluations(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Vec<Evaluation>>> {
    Ok(Json(state.repository.list_by("judgeId", &id).await?))
}
