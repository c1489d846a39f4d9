use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::content::{Certificate, HeroSetting, Project, WorkExperience};
use crate::realtime::Table;

/// Featured projects only, in display order.
pub async fn fetch_featured_projects(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE featured = $1 ORDER BY order_index ASC",
    )
    .bind(true)
    .fetch_all(pool)
    .await
}

pub async fn fetch_certificates(pool: &PgPool) -> Result<Vec<Certificate>, sqlx::Error> {
    sqlx::query_as::<_, Certificate>("SELECT * FROM certificates ORDER BY order_index ASC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_work_experience(pool: &PgPool) -> Result<Vec<WorkExperience>, sqlx::Error> {
    sqlx::query_as::<_, WorkExperience>(
        "SELECT * FROM work_experience ORDER BY order_index ASC, start_date DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_active_hero_settings(pool: &PgPool) -> Result<Vec<HeroSetting>, sqlx::Error> {
    sqlx::query_as::<_, HeroSetting>(
        "SELECT * FROM hero_settings WHERE is_active = $1 ORDER BY order_index ASC",
    )
    .bind(true)
    .fetch_all(pool)
    .await
}

/// One row by id, regardless of the section's visibility filter.
pub async fn fetch_by_id<T>(pool: &PgPool, table: Table, id: Uuid) -> Result<Option<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    // table names come from the closed `Table` enum, never from input
    let sql = format!("SELECT * FROM {} WHERE id = $1", table.as_str());
    sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(pool).await
}
