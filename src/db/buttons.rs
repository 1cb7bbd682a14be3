use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{ActionKind, ControlButton, HttpMethod, OutputFormat};

/// Field set for inserting a new button. Storage-text fields (`headers`,
/// `payload_parameters`) are already serialized by the caller.
pub struct NewButton<'a> {
    pub label: &'a str,
    pub icon: Option<&'a str>,
    pub kind: ActionKind,
    pub target_endpoint: &'a str,
    pub http_method: HttpMethod,
    pub headers: &'a str,
    pub payload_parameters: &'a str,
    pub output_format: OutputFormat,
    pub validation_enabled: bool,
    pub validation_schema: Option<&'a str>,
    pub preview_enabled: bool,
    pub created_by: &'a str,
    pub category: Option<&'a str>,
}

pub async fn create(pool: &SqlitePool, new: NewButton<'_>) -> Result<ControlButton, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, ControlButton>(
        "INSERT INTO control_buttons (label, icon, kind, target_endpoint, http_method, headers,
             payload_parameters, output_format, validation_enabled, validation_schema,
             preview_enabled, created_by, created_at, updated_at, category, active)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, TRUE) RETURNING *",
    )
    .bind(new.label)
    .bind(new.icon)
    .bind(new.kind)
    .bind(new.target_endpoint)
    .bind(new.http_method)
    .bind(new.headers)
    .bind(new.payload_parameters)
    .bind(new.output_format)
    .bind(new.validation_enabled)
    .bind(new.validation_schema)
    .bind(new.preview_enabled)
    .bind(new.created_by)
    .bind(now)
    .bind(now)
    .bind(new.category)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ControlButton>, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>("SELECT * FROM control_buttons WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM control_buttons WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map(|count| count > 0)
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ControlButton>, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>("SELECT * FROM control_buttons ORDER BY id ASC")
        .fetch_all(pool)
        .await
}

pub async fn list_active(pool: &SqlitePool) -> Result<Vec<ControlButton>, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>(
        "SELECT * FROM control_buttons WHERE active = TRUE ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_creator(
    pool: &SqlitePool,
    created_by: &str,
) -> Result<Vec<ControlButton>, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>(
        "SELECT * FROM control_buttons WHERE created_by = ? ORDER BY id ASC",
    )
    .bind(created_by)
    .fetch_all(pool)
    .await
}

pub async fn list_by_creator_active(
    pool: &SqlitePool,
    created_by: &str,
) -> Result<Vec<ControlButton>, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>(
        "SELECT * FROM control_buttons WHERE created_by = ? AND active = TRUE ORDER BY id ASC",
    )
    .bind(created_by)
    .fetch_all(pool)
    .await
}

pub async fn list_by_category(
    pool: &SqlitePool,
    category: &str,
) -> Result<Vec<ControlButton>, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>(
        "SELECT * FROM control_buttons WHERE category = ? ORDER BY id ASC",
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Full-row write used by the partial-update path. Bumps `updated_at`;
/// leaves `created_at`, `created_by` and `last_executed_at` alone.
pub async fn update(
    pool: &SqlitePool,
    button: &ControlButton,
) -> Result<ControlButton, sqlx::Error> {
    sqlx::query_as::<_, ControlButton>(
        "UPDATE control_buttons SET label = ?, icon = ?, kind = ?, target_endpoint = ?,
             http_method = ?, headers = ?, payload_parameters = ?, output_format = ?,
             validation_enabled = ?, validation_schema = ?, preview_enabled = ?,
             category = ?, active = ?, updated_at = ?
         WHERE id = ? RETURNING *",
    )
    .bind(&button.label)
    .bind(&button.icon)
    .bind(button.kind)
    .bind(&button.target_endpoint)
    .bind(button.http_method)
    .bind(&button.headers)
    .bind(&button.payload_parameters)
    .bind(button.output_format)
    .bind(button.validation_enabled)
    .bind(&button.validation_schema)
    .bind(button.preview_enabled)
    .bind(&button.category)
    .bind(button.active)
    .bind(Utc::now())
    .bind(button.id)
    .fetch_one(pool)
    .await
}

/// Single-field write used by the execution path after a non-preview call.
pub async fn touch_last_executed(
    pool: &SqlitePool,
    id: i64,
    at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE control_buttons SET last_executed_at = ? WHERE id = ?")
        .bind(at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM control_buttons WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
