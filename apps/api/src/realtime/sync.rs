use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{Backend, BackendError};
use crate::content::queries;
use crate::content::store::ContentStore;
use crate::models::content::{Certificate, HeroSetting, Project, WorkExperience};
use crate::realtime::feed::{ChangeFeed, PgChangeFeed};
use crate::realtime::{ChangeKind, RealtimeHub, Subscription, Table, TableChange};

/// Where the sync task reloads content from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Reloads every section into `store`. `true` when no section failed.
    async fn hydrate(&self, store: &ContentStore) -> bool;

    /// Current row as JSON, `None` when it no longer exists.
    async fn fetch_record(&self, table: Table, id: Uuid) -> Result<Option<Value>, BackendError>;
}

#[async_trait]
impl ContentSource for Backend {
    async fn hydrate(&self, store: &ContentStore) -> bool {
        store.hydrate(self).await
    }

    async fn fetch_record(&self, table: Table, id: Uuid) -> Result<Option<Value>, BackendError> {
        let pool = self.pool()?;
        match table {
            Table::Projects => to_record(queries::fetch_by_id::<Project>(pool, table, id).await?),
            Table::Certificates => {
                to_record(queries::fetch_by_id::<Certificate>(pool, table, id).await?)
            }
            Table::WorkExperience => {
                to_record(queries::fetch_by_id::<WorkExperience>(pool, table, id).await?)
            }
            Table::HeroSettings => {
                to_record(queries::fetch_by_id::<HeroSetting>(pool, table, id).await?)
            }
        }
    }
}

fn to_record<T: Serialize>(row: Option<T>) -> Result<Option<Value>, BackendError> {
    Ok(row.map(serde_json::to_value).transpose()?)
}

/// Fills in the row for a notification that arrived without one. A row that is
/// gone by now becomes a DELETE. `None` when the row could not be fetched.
async fn complete_change<S: ContentSource>(
    source: &S,
    mut change: TableChange,
) -> Option<TableChange> {
    if !change.needs_record() {
        return Some(change);
    }
    let Some(id) = change.row_id() else {
        warn!("Dropping {} change on {} without a row id", change.kind.as_str(), change.table);
        return None;
    };

    match source.fetch_record(change.table, id).await {
        Ok(Some(record)) => {
            change.record = Some(record);
            Some(change)
        }
        Ok(None) => {
            change.kind = ChangeKind::Delete;
            change.id = Some(id);
            change.old_record = Some(json!({ "id": id }));
            Some(change)
        }
        Err(e) => {
            warn!("Could not load {} row {id} for a change notification: {e}", change.table);
            None
        }
    }
}

async fn apply_and_publish<S: ContentSource>(
    source: &S,
    store: &ContentStore,
    hub: &RealtimeHub,
    change: TableChange,
) {
    let Some(change) = complete_change(source, change).await else {
        return;
    };
    if let Err(e) = store.apply(&change).await {
        warn!("Dropping {} change on {}: {e}", change.kind.as_str(), change.table);
        return;
    }
    debug!("Applied {} on {}", change.kind.as_str(), change.table);
    hub.publish(change);
}

/// Hydrates the mirrors, then applies every change from `feed` and rebroadcasts it.
///
/// The feed is attached before the first read, so nothing committed in between is
/// lost. A partial hydrate is retried every `refresh_every` while the feed is up.
/// Returns when the feed ends or fails; a bad payload is skipped.
pub async fn run_sync<F, S>(
    mut feed: F,
    source: &S,
    store: &ContentStore,
    hub: &RealtimeHub,
    refresh_every: Duration,
) where
    F: ChangeFeed,
    S: ContentSource,
{
    let mut hydrated = source.hydrate(store).await;
    hub.set_connected(hydrated);

    let mut refresh = tokio::time::interval_at(Instant::now() + refresh_every, refresh_every);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = refresh.tick(), if !hydrated => {
                hydrated = source.hydrate(store).await;
                hub.set_connected(hydrated);
            }
            next = feed.next_change() => match next {
                Ok(Some(change)) => apply_and_publish(source, store, hub, change).await,
                Ok(None) => {
                    info!("Change feed closed");
                    break;
                }
                Err(BackendError::Decode(e)) => {
                    warn!("Skipping undecodable change notification: {e}");
                }
                Err(e) => {
                    warn!("Change feed stopped: {e}");
                    break;
                }
            }
        }
    }

    hub.set_connected(false);
}

/// Keeps a change feed attached for the life of the task. After a lost feed or a
/// failed connect it waits `retry_every` and tries again; every new feed starts with
/// a full hydrate. While no feed can be attached, content is reloaded on each attempt.
pub async fn supervise<C, Fut, F, S>(
    mut connect: C,
    source: S,
    store: Arc<ContentStore>,
    hub: RealtimeHub,
    retry_every: Duration,
) where
    C: FnMut() -> Fut,
    Fut: Future<Output = Result<F, BackendError>>,
    F: ChangeFeed,
    S: ContentSource,
{
    loop {
        match connect().await {
            Ok(feed) => {
                run_sync(feed, &source, &store, &hub, retry_every).await;
                warn!("Change feed lost, resubscribing in {}ms", retry_every.as_millis());
            }
            Err(e) => {
                warn!(
                    "Realtime subscription unavailable, retrying in {}ms: {e}",
                    retry_every.as_millis()
                );
                source.hydrate(&store).await;
            }
        }
        tokio::time::sleep(retry_every).await;
    }
}

pub fn spawn_supervised<C, Fut, F, S>(
    connect: C,
    source: S,
    store: Arc<ContentStore>,
    hub: RealtimeHub,
    retry_every: Duration,
) -> Subscription
where
    C: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<F, BackendError>> + Send + 'static,
    F: ChangeFeed + 'static,
    S: ContentSource + 'static,
{
    Subscription::new(tokio::spawn(supervise(connect, source, store, hub, retry_every)))
}

/// Starts the background sync against the database change channel.
/// `None` when there is no backend; the sections then stay empty.
pub fn subscribe(
    backend: &Backend,
    channel: &str,
    store: Arc<ContentStore>,
    hub: RealtimeHub,
    retry_every: Duration,
) -> Option<Subscription> {
    let pool = backend.pool().ok()?.clone();
    let channel = channel.to_string();
    let connect = move || {
        let pool = pool.clone();
        let channel = channel.clone();
        async move { PgChangeFeed::connect(&pool, &channel).await }
    };
    Some(spawn_supervised(connect, backend.clone(), store, hub, retry_every))
}
