use async_trait::async_trait;
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::backend::BackendError;
use crate::realtime::TableChange;

/// A source of row-change events.
#[async_trait]
pub trait ChangeFeed: Send {
    /// Waits for the next change. `Ok(None)` means the feed has ended.
    async fn next_change(&mut self) -> Result<Option<TableChange>, BackendError>;
}

/// `LISTEN` on the change channel fed by the schema's notify trigger.
pub struct PgChangeFeed {
    listener: PgListener,
}

impl PgChangeFeed {
    pub async fn connect(pool: &PgPool, channel: &str) -> Result<Self, BackendError> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(channel).await?;
        info!("Listening for content changes on channel '{channel}'");
        Ok(Self { listener })
    }
}

#[async_trait]
impl ChangeFeed for PgChangeFeed {
    /// Ends the feed when the listener connection drops, since notifications sent
    /// while it was down are gone and the mirrors must be reloaded.
    async fn next_change(&mut self) -> Result<Option<TableChange>, BackendError> {
        let Some(notification) = self.listener.try_recv().await? else {
            warn!("Change listener connection lost");
            return Ok(None);
        };
        debug!("Change notification: {}", notification.payload());
        let change = serde_json::from_str(notification.payload())?;
        Ok(Some(change))
    }
}
