use tracing::{info, warn};

use crate::backend::{Backend, BackendError};
use crate::content::mirror::{Mirror, MirrorRow};
use crate::content::queries;
use crate::models::content::{Certificate, HeroSetting, Project, WorkExperience};
use crate::realtime::{Table, TableChange};

/// Local mirrors of every database-backed section.
#[derive(Default)]
pub struct ContentStore {
    pub projects: Mirror<Project>,
    pub certificates: Mirror<Certificate>,
    pub experience: Mirror<WorkExperience>,
    pub hero_settings: Mirror<HeroSetting>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches every section concurrently. A failed fetch keeps that section's
    /// current rows (empty until the first success). Returns `true` when every
    /// section was fetched.
    pub async fn hydrate(&self, backend: &Backend) -> bool {
        let (projects, certificates, experience, hero_settings) = tokio::join!(
            backend.safe_query("projects", None, |pool| async move {
                queries::fetch_featured_projects(&pool).await.map(Some)
            }),
            backend.safe_query("certificates", None, |pool| async move {
                queries::fetch_certificates(&pool).await.map(Some)
            }),
            backend.safe_query("work_experience", None, |pool| async move {
                queries::fetch_work_experience(&pool).await.map(Some)
            }),
            backend.safe_query("hero_settings", None, |pool| async move {
                queries::fetch_active_hero_settings(&pool).await.map(Some)
            }),
        );

        let fetched = [
            refresh(&self.projects, projects).await,
            refresh(&self.certificates, certificates).await,
            refresh(&self.experience, experience).await,
            refresh(&self.hero_settings, hero_settings).await,
        ];
        let complete = fetched.iter().all(|ok| *ok);

        if complete {
            info!(
                "Content hydrated: {} projects, {} certificates, {} experiences, {} hero settings",
                self.projects.len().await,
                self.certificates.len().await,
                self.experience.len().await,
                self.hero_settings.len().await
            );
        } else {
            warn!("Content hydration incomplete; failed sections keep their current rows");
        }
        complete
    }

    /// Routes a change event to the mirror for its table.
    pub async fn apply(&self, change: &TableChange) -> Result<(), BackendError> {
        match change.table {
            Table::Projects => self.projects.apply(change).await,
            Table::Certificates => self.certificates.apply(change).await,
            Table::WorkExperience => self.experience.apply(change).await,
            Table::HeroSettings => self.hero_settings.apply(change).await,
        }
    }
}

async fn refresh<T: MirrorRow>(mirror: &Mirror<T>, rows: Option<Vec<T>>) -> bool {
    match rows {
        Some(rows) => {
            mirror.replace(rows).await;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::fixtures::{certificate, project};
    use crate::realtime::ChangeKind;

    #[tokio::test]
    async fn test_failed_hydrate_keeps_current_rows() {
        let store = ContentStore::new();
        store.projects.replace(vec![project(0, true)]).await;
        assert!(!store.hydrate(&Backend::unavailable()).await);
        assert_eq!(store.projects.snapshot().await.len(), 1);
        assert!(store.certificates.snapshot().await.is_empty());
        assert!(store.experience.snapshot().await.is_empty());
        assert!(store.hero_settings.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_apply_routes_by_table() {
        let store = ContentStore::new();
        let cert = certificate(2);
        store
            .apply(&TableChange {
                table: Table::Certificates,
                kind: ChangeKind::Insert,
                id: None,
                record: Some(serde_json::to_value(&cert).unwrap()),
                old_record: None,
            })
            .await
            .unwrap();

        assert_eq!(store.certificates.snapshot().await, vec![cert]);
        assert!(store.projects.snapshot().await.is_empty());
    }
}
