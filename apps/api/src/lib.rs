//! Folio: content service behind a single-page portfolio site.
//!
//! Section content is mirrored from a hosted Postgres database, kept current via
//! `LISTEN/NOTIFY`, and served as JSON plus a server-sent event stream. The
//! [`interaction`] module holds the page's client-side behaviors as plain state machines.

pub mod backend;
pub mod config;
pub mod contact;
pub mod content;
pub mod db;
pub mod errors;
pub mod interaction;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod state;
