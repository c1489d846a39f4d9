use std::sync::Arc;

use crate::backend::Backend;
use crate::content::store::ContentStore;
use crate::interaction::orbit::OrbitLayout;
use crate::models::profile::Profile;
use crate::realtime::RealtimeHub;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub store: Arc<ContentStore>,
    pub hub: RealtimeHub,
    pub profile: Arc<Profile>,
    /// Layout used to pre-place the tool icons served by `/api/v1/tools`.
    pub orbit: Arc<OrbitLayout>,
}

impl AppState {
    pub fn new(backend: Backend, profile: Profile) -> Self {
        Self {
            backend,
            store: Arc::new(ContentStore::new()),
            hub: RealtimeHub::new(),
            profile: Arc::new(profile),
            orbit: Arc::new(OrbitLayout::default()),
        }
    }
}
