use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::BackendError;
use crate::models::content::{Certificate, HeroSetting, Project, WorkExperience};
use crate::realtime::{ChangeKind, TableChange};

/// A row that can live in a [`Mirror`].
pub trait MirrorRow: Clone + DeserializeOwned + Send + Sync {
    fn id(&self) -> Uuid;
    fn order_index(&self) -> i32;

    /// Rows failing this are kept out of the mirror.
    fn is_visible(&self) -> bool {
        true
    }

    /// Secondary ordering among rows with equal `order_index`.
    fn tie_break(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

impl MirrorRow for Project {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order_index(&self) -> i32 {
        self.order_index
    }
    fn is_visible(&self) -> bool {
        self.featured
    }
}

impl MirrorRow for Certificate {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order_index(&self) -> i32 {
        self.order_index
    }
}

impl MirrorRow for WorkExperience {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order_index(&self) -> i32 {
        self.order_index
    }
    // newest role first within the same slot
    fn tie_break(&self, other: &Self) -> Ordering {
        other.start_date.cmp(&self.start_date)
    }
}

impl MirrorRow for HeroSetting {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order_index(&self) -> i32 {
        self.order_index
    }
    fn is_visible(&self) -> bool {
        self.is_active
    }
}

/// A decoded row change for one table.
#[derive(Debug, Clone, PartialEq)]
pub enum RowChange<T> {
    Insert(T),
    Update(T),
    Delete(Uuid),
}

#[derive(Deserialize)]
struct RowId {
    id: Uuid,
}

impl<T: MirrorRow> RowChange<T> {
    pub fn decode(change: &TableChange) -> Result<Self, BackendError> {
        let record = || -> Result<T, BackendError> {
            let value = change.record.clone().unwrap_or_default();
            Ok(serde_json::from_value(value)?)
        };
        Ok(match change.kind {
            ChangeKind::Insert => RowChange::Insert(record()?),
            ChangeKind::Update => RowChange::Update(record()?),
            ChangeKind::Delete => match change.id {
                Some(id) => RowChange::Delete(id),
                None => {
                    let old = change.old_record.clone().unwrap_or_default();
                    let RowId { id } = serde_json::from_value(old)?;
                    RowChange::Delete(id)
                }
            },
        })
    }
}

/// Sorts ascending by `order_index`, stable for equal keys.
pub fn sort_rows<T: MirrorRow>(rows: &mut [T]) {
    rows.sort_by(|a, b| {
        a.order_index()
            .cmp(&b.order_index())
            .then_with(|| a.tie_break(b))
    });
}

/// Applies one change in place. Last write wins; the list stays sorted and filtered.
pub fn apply_change<T: MirrorRow>(rows: &mut Vec<T>, change: RowChange<T>) {
    match change {
        RowChange::Insert(row) => {
            rows.retain(|r| r.id() != row.id());
            rows.push(row);
        }
        RowChange::Update(row) => match rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        },
        RowChange::Delete(id) => rows.retain(|r| r.id() != id),
    }
    rows.retain(|r| r.is_visible());
    sort_rows(rows);
}

/// In-memory ordered copy of one table's visible rows.
pub struct Mirror<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: MirrorRow> Mirror<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    pub async fn replace(&self, mut rows: Vec<T>) {
        rows.retain(|r| r.is_visible());
        sort_rows(&mut rows);
        *self.rows.write().await = rows;
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn apply(&self, change: &TableChange) -> Result<(), BackendError> {
        let change = RowChange::decode(change)?;
        apply_change(&mut *self.rows.write().await, change);
        Ok(())
    }
}

impl<T: MirrorRow> Default for Mirror<T> {
    fn default() -> Self {
        Self::new()
    }
}
