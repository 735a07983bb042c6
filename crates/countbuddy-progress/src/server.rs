//! HTTP routes for the progress service.

use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ProgressError;
use crate::record::{NewKid, ProgressRecord, ProgressUpdate};
use crate::store::ProgressStore;

type SharedStore = Arc<dyn ProgressStore>;

/// Build the service router over `store`.
pub fn router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/kids", get(list_kids).post(create_kid))
        .route("/api/kids/{id}", get(get_kid))
        .route("/api/kids/{id}/progress", put(update_progress))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(store)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, store: SharedStore) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("progress service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down progress service");
        })
        .await
        .context("progress service failed")?;
    Ok(())
}

// Malformed ids cannot match a record.
fn parse_id(raw: &str) -> Result<Uuid, ProgressError> {
    Uuid::parse_str(raw).map_err(|_| ProgressError::NotFound)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ProgressError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ProgressError::Validation(rejection.body_text()))
}

async fn list_kids(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<ProgressRecord>>, ProgressError> {
    Ok(Json(store.list().await?))
}

async fn get_kid(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<ProgressRecord>, ProgressError> {
    Ok(Json(store.get(parse_id(&id)?).await?))
}

async fn create_kid(
    State(store): State<SharedStore>,
    payload: Result<Json<NewKid>, JsonRejection>,
) -> Result<(StatusCode, Json<ProgressRecord>), ProgressError> {
    let new_kid = body(payload)?;
    let record = store.create(new_kid.validated_name()?).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_progress(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<ProgressUpdate>, JsonRejection>,
) -> Result<Json<ProgressRecord>, ProgressError> {
    let id = parse_id(&id)?;
    let update = body(payload)?;
    Ok(Json(store.update_progress(id, &update).await?))
}
