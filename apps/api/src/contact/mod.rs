pub mod analytics;
pub mod handlers;
pub mod validation;
