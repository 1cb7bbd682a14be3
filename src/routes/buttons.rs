use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::caller::Caller;
use crate::db;
use crate::db::buttons::NewButton;
use crate::error::AppError;
use crate::execution::Outcome;
use crate::models::button::encode_map;
use crate::models::{ActionKind, ControlButton, ExecutionLog, HttpMethod, OutputFormat};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateButton {
    pub label: String,
    pub icon: Option<String>,
    pub kind: ActionKind,
    pub target_endpoint: String,
    pub http_method: HttpMethod,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub payload_parameters: Map<String, Value>,
    pub output_format: OutputFormat,
    pub validation_enabled: Option<bool>,
    pub validation_schema: Option<String>,
    pub preview_enabled: Option<bool>,
    pub category: Option<String>,
}

/// Partial update: absent fields leave the stored value untouched.
#[derive(Deserialize)]
pub struct UpdateButton {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub kind: Option<ActionKind>,
    pub target_endpoint: Option<String>,
    pub http_method: Option<HttpMethod>,
    pub headers: Option<HashMap<String, String>>,
    pub payload_parameters: Option<Map<String, Value>>,
    pub output_format: Option<OutputFormat>,
    pub validation_enabled: Option<bool>,
    pub validation_schema: Option<String>,
    pub preview_enabled: Option<bool>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ExecuteButton {
    pub input_parameters: Option<Map<String, Value>>,
    #[serde(default)]
    pub is_preview: bool,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub creator: Option<String>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct LogParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Button as exposed over the API: the stored header/payload text blobs are
/// surfaced as real mappings.
#[derive(Serialize)]
pub struct ButtonResponse {
    pub id: i64,
    pub label: String,
    pub icon: Option<String>,
    pub kind: ActionKind,
    pub target_endpoint: String,
    pub http_method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub payload_parameters: Map<String, Value>,
    pub output_format: OutputFormat,
    pub validation_enabled: bool,
    pub validation_schema: Option<String>,
    pub preview_enabled: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_executed_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub active: bool,
}

impl From<ControlButton> for ButtonResponse {
    fn from(button: ControlButton) -> Self {
        let headers = button.header_map();
        let payload_parameters = button.payload_map();
        ButtonResponse {
            id: button.id,
            label: button.label,
            icon: button.icon,
            kind: button.kind,
            target_endpoint: button.target_endpoint,
            http_method: button.http_method,
            headers,
            payload_parameters,
            output_format: button.output_format,
            validation_enabled: button.validation_enabled,
            validation_schema: button.validation_schema,
            preview_enabled: button.preview_enabled,
            created_by: button.created_by,
            created_at: button.created_at,
            updated_at: button.updated_at,
            last_executed_at: button.last_executed_at,
            category: button.category,
            active: button.active,
        }
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ButtonResponse>>, AppError> {
    let buttons = match (params.creator.as_deref(), params.category.as_deref(), params.active) {
        (Some(creator), _, Some(true)) => {
            db::buttons::list_by_creator_active(&state.pool, creator).await?
        }
        (Some(creator), _, _) => db::buttons::list_by_creator(&state.pool, creator).await?,
        (None, Some(category), _) => db::buttons::list_by_category(&state.pool, category).await?,
        (None, None, Some(true)) => db::buttons::list_active(&state.pool).await?,
        _ => db::buttons::list_all(&state.pool).await?,
    };

    Ok(Json(buttons.into_iter().map(ButtonResponse::from).collect()))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ButtonResponse>, AppError> {
    let button = db::buttons::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Button not found with id: {id}")))?;

    Ok(Json(button.into()))
}

pub async fn create(
    caller: Caller,
    State(state): State<SharedState>,
    Json(req): Json<CreateButton>,
) -> Result<(StatusCode, Json<ButtonResponse>), AppError> {
    if req.label.trim().is_empty() {
        return Err(AppError::BadRequest("Label is required".to_string()));
    }
    if req.target_endpoint.trim().is_empty() {
        return Err(AppError::BadRequest("Target endpoint is required".to_string()));
    }

    let headers = encode_map(&req.headers);
    let payload_parameters = encode_map(&req.payload_parameters);

    let button = db::buttons::create(
        &state.pool,
        NewButton {
            label: &req.label,
            icon: req.icon.as_deref(),
            kind: req.kind,
            target_endpoint: &req.target_endpoint,
            http_method: req.http_method,
            headers: &headers,
            payload_parameters: &payload_parameters,
            output_format: req.output_format,
            validation_enabled: req.validation_enabled.unwrap_or(true),
            validation_schema: req.validation_schema.as_deref(),
            preview_enabled: req.preview_enabled.unwrap_or(true),
            created_by: caller.as_str(),
            category: req.category.as_deref(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(button.into())))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateButton>,
) -> Result<Json<ButtonResponse>, AppError> {
    let mut button = db::buttons::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Button not found with id: {id}")))?;

    if let Some(label) = req.label {
        if label.trim().is_empty() {
            return Err(AppError::BadRequest("Label is required".to_string()));
        }
        button.label = label;
    }
    if let Some(icon) = req.icon {
        button.icon = Some(icon);
    }
    if let Some(kind) = req.kind {
        button.kind = kind;
    }
    if let Some(target_endpoint) = req.target_endpoint {
        button.target_endpoint = target_endpoint;
    }
    if let Some(http_method) = req.http_method {
        button.http_method = http_method;
    }
    if let Some(headers) = &req.headers {
        button.headers = encode_map(headers);
    }
    if let Some(payload_parameters) = &req.payload_parameters {
        button.payload_parameters = encode_map(payload_parameters);
    }
    if let Some(output_format) = req.output_format {
        button.output_format = output_format;
    }
    if let Some(validation_enabled) = req.validation_enabled {
        button.validation_enabled = validation_enabled;
    }
    if let Some(validation_schema) = req.validation_schema {
        button.validation_schema = Some(validation_schema);
    }
    if let Some(preview_enabled) = req.preview_enabled {
        button.preview_enabled = preview_enabled;
    }
    if let Some(category) = req.category {
        button.category = Some(category);
    }
    if let Some(active) = req.active {
        button.active = active;
    }

    let updated = db::buttons::update(&state.pool, &button).await?;
    Ok(Json(updated.into()))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::buttons::exists(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("Button not found with id: {id}")));
    }

    db::buttons::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn execute(
    caller: Caller,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<ExecuteButton>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state
        .executor
        .execute(
            &state.pool,
            id,
            req.input_parameters,
            req.is_preview,
            caller.as_str(),
        )
        .await?;

    Ok(Json(outcome))
}

pub async fn log(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<LogParams>,
) -> Result<Json<Vec<ExecutionLog>>, AppError> {
    if !db::buttons::exists(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("Button not found with id: {id}")));
    }

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).min(100).max(1);
    let offset = (page - 1) * per_page;

    let logs = db::execution_log::list_by_button(&state.pool, id, per_page, offset).await?;
    Ok(Json(logs))
}
