use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::contact::analytics;
use crate::contact::validation::{validate_contact_form, ContactForm};
use crate::errors::AppError;
use crate::interaction::form_status::STATUS_RESET_AFTER;
use crate::interaction::millis;
use crate::models::contact::{AnalyticsEvent, ContactMessageRow, MessageStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: Uuid,
    pub status: &'static str,
    /// How long the page shows its success banner before returning to idle.
    pub reset_after_ms: u64,
}

/// Stores a validated message as unread. Blank subjects are stored as NULL.
pub async fn insert_message(pool: &PgPool, form: &ContactForm) -> Result<ContactMessageRow, sqlx::Error> {
    let subject = Some(form.subject.trim()).filter(|s| !s.is_empty());
    sqlx::query_as::<_, ContactMessageRow>(
        r#"
        INSERT INTO contact_messages (name, email, subject, message, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(form.name.trim())
    .bind(form.email.trim())
    .bind(subject)
    .bind(form.message.trim())
    .bind(MessageStatus::Unread.as_str())
    .fetch_one(pool)
    .await
}

/// POST /api/v1/contact
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let errors = validate_contact_form(&form);
    if !errors.is_empty() {
        return Err(AppError::InvalidForm(errors));
    }

    let pool = state.backend.pool().map_err(|_| {
        error!("Contact form submitted but no backend is configured");
        AppError::Unavailable
    })?;

    let row = insert_message(pool, &form).await?;
    info!("Stored contact message {}", row.id);

    analytics::track(
        &state,
        AnalyticsEvent {
            event_type: "contact_form_submission".to_string(),
            page_url: Some("/contact".to_string()),
            event_data: Some(json!({ "subject": form.subject })),
            user_agent: None,
            referrer: None,
        },
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            id: row.id,
            status: MessageStatus::Unread.as_str(),
            reset_after_ms: millis(STATUS_RESET_AFTER),
        }),
    ))
}
