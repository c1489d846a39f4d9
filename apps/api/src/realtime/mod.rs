//! Push subscription: row-change events from the database, fanned out to the
//! in-memory mirrors and to browser subscribers.

pub mod feed;
pub mod stream;
pub mod sync;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Capacity of the browser fan-out channel; slower subscribers skip ahead.
const HUB_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Projects,
    Certificates,
    WorkExperience,
    HeroSettings,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Projects => "projects",
            Table::Certificates => "certificates",
            Table::WorkExperience => "work_experience",
            Table::HeroSettings => "hero_settings",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" => Ok(Table::Projects),
            "certificates" => Ok(Table::Certificates),
            "work_experience" => Ok(Table::WorkExperience),
            "hero_settings" => Ok(Table::HeroSettings),
            other => Err(format!("Unknown table '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Insert => "INSERT",
            ChangeKind::Update => "UPDATE",
            ChangeKind::Delete => "DELETE",
        }
    }
}

/// One row change as emitted by the `notify_portfolio_change` trigger.
/// Rows too large for a notification arrive with `record: None` and only `id` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableChange {
    pub table: Table,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub record: Option<Value>,
    #[serde(default)]
    pub old_record: Option<Value>,
}

impl TableChange {
    /// Id of the changed row, from the payload or from `old_record`.
    pub fn row_id(&self) -> Option<Uuid> {
        self.id.or_else(|| {
            self.old_record
                .as_ref()
                .and_then(|old| old.get("id"))
                .and_then(|id| serde_json::from_value(id.clone()).ok())
        })
    }

    /// True for an INSERT or UPDATE whose row was left out of the notification.
    pub fn needs_record(&self) -> bool {
        self.kind != ChangeKind::Delete && self.record.is_none()
    }
}

/// Fan-out of applied changes to any number of listeners.
#[derive(Clone)]
pub struct RealtimeHub {
    tx: broadcast::Sender<TableChange>,
    connected: Arc<AtomicBool>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        Self {
            tx,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a change feed is currently attached and the mirrors are current.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    pub fn publish(&self, change: TableChange) {
        // No receivers is fine; nobody is watching right now.
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.tx.subscribe()
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running sync task. Dropping it unsubscribes.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
