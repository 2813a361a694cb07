//! capkv - A bounded key-value cache server
//!
//! Serves point lookups with miss-triggered value generation over a
//! capacity-limited store with FIFO eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use api::AppState;
pub use config::Config;
