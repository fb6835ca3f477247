//! Axum request handlers

pub mod analytics;
pub mod records;
