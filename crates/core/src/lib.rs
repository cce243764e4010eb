//! Core types and shared functionality for wikicache.
//!
//! This crate provides:
//! - The registry of mirrored wikis
//! - Page records and the JSON cache store
//! - Staleness policy and cache search
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod wiki;

pub use cache::{CacheStats, CacheStore, PageRecord, SearchHit, WikiCache};
pub use config::AppConfig;
pub use error::Error;
pub use wiki::{WikiDescriptor, WikiKey};
