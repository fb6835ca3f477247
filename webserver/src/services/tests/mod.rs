//! Service tests for webserver
//!
//! Store backends are exercised through the `EntityStore` trait so both
//! implementations are held to the same contract.

pub mod helpers;
pub mod memory_store;
