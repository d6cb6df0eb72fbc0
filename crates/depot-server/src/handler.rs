use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use depot_protocol::{ExtractBody, MessageBody, UpsertBody};
use depot_types::{DocumentKey, NamespaceName};

use crate::dispatch::{self, DispatchOutcome};
use crate::error::ApiError;
use crate::router::AppState;

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `PUT /{namespace}` — create a namespace.
pub async fn create_namespace(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(%namespace, "creating namespace");
    let namespace = NamespaceName::new(namespace)?;
    state.store.create_namespace(&namespace).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::success("namespace correctly created")),
    ))
}

/// `DELETE /{namespace}` — delete a namespace and, by cascade, all of its
/// documents.
pub async fn delete_namespace(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    tracing::info!(%namespace, "deleting namespace");
    let namespace = NamespaceName::new(namespace)?;
    if state.store.delete_namespace(&namespace).await? {
        Ok(Json(MessageBody::success("namespace deleted")))
    } else {
        Err(ApiError::NamespaceNotFound(namespace.to_string()))
    }
}

/// `GET /{namespace}/{object}` — fetch the raw document.
pub async fn get_object(
    State(state): State<AppState>,
    Path((namespace, object)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let key = DocumentKey::new(namespace, object)?;
    match state.store.get_object(&key).await? {
        Some(doc) => Ok(Json(doc)),
        None => Err(ApiError::ObjectNotFound {
            namespace: key.namespace.to_string(),
            object: key.object.to_string(),
        }),
    }
}

/// `PUT /{namespace}/{object}` — full replace-or-insert of the document.
pub async fn put_object(
    State(state): State<AppState>,
    Path((namespace, object)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let key = DocumentKey::new(namespace, object)?;
    tracing::info!(key = %key, "upserting object");
    state.store.upsert_object(&key, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(UpsertBody::created(
            key.namespace.as_str(),
            key.object.as_str(),
            body,
        )),
    ))
}

/// `PATCH /{namespace}/{object}` — apply one mutation-protocol action.
pub async fn patch_object(
    State(state): State<AppState>,
    Path((namespace, object)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let key = DocumentKey::new(namespace, object)?;
    match dispatch::dispatch(state.store.as_ref(), &key, &body).await? {
        DispatchOutcome::Extracted(value) => Ok(Json(ExtractBody::success(value)).into_response()),
        DispatchOutcome::Confirmed(message) => {
            Ok(Json(MessageBody::success(message)).into_response())
        }
    }
}
