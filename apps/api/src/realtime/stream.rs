use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::errors::AppError;
use crate::realtime::{Table, TableChange};
use crate::state::AppState;

fn to_event(change: &TableChange) -> Event {
    let event = Event::default().event(change.kind.as_str());
    match serde_json::to_string(change) {
        Ok(data) => event.data(data),
        Err(e) => {
            warn!("Failed to encode change event: {e}");
            event.data("{}")
        }
    }
}

/// GET /api/v1/realtime/:table
/// Server-sent events for one table's INSERT/UPDATE/DELETE changes.
pub async fn handle_subscribe(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let table: Table = table.parse().map_err(AppError::Validation)?;
    let rx = state.hub.subscribe();

    let events = stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(change) if change.table == table => return Some((Ok(to_event(&change)), rx)),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Realtime subscriber on {table} lagged, skipped {skipped} events");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
