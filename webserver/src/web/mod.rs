//! HTTP surface: route handlers for the REST API

pub mod handlers;
