pub mod handlers;
pub mod hero;
pub mod mirror;
pub mod queries;
pub mod store;
