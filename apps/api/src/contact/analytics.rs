use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;

use crate::backend::BackendError;
use crate::models::contact::AnalyticsEvent;
use crate::state::AppState;

pub async fn insert_event(pool: &PgPool, event: &AnalyticsEvent) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO analytics (event_type, page_url, event_data, user_agent, referrer)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&event.event_type)
    .bind(&event.page_url)
    .bind(&event.event_data)
    .bind(&event.user_agent)
    .bind(&event.referrer)
    .execute(pool)
    .await?;
    Ok(())
}

/// Records an event without letting a failure reach the caller.
pub async fn track(state: &AppState, event: AnalyticsEvent) {
    let result = match state.backend.pool() {
        Ok(pool) => insert_event(pool, &event).await.map_err(BackendError::from),
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        warn!("Failed to track analytics event '{}': {e}", event.event_type);
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub event_type: String,
    pub page_url: Option<String>,
    pub event_data: Option<Value>,
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// POST /api/v1/analytics
pub async fn handle_track(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TrackRequest>,
) -> StatusCode {
    let event = AnalyticsEvent {
        event_type: req.event_type,
        page_url: req.page_url,
        event_data: req.event_data,
        user_agent: header_value(&headers, header::USER_AGENT),
        referrer: header_value(&headers, header::REFERER),
    };
    track(&state, event).await;
    StatusCode::ACCEPTED
}
