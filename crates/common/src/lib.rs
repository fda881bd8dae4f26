//! CiteScope Common Library
//!
//! Shared code for the CiteScope workspace including:
//! - Input-contract records and the research snapshot
//! - The snapshot-store read boundary
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod metrics;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AnalyticsConfig, AppConfig};
pub use errors::{AppError, Result};
pub use store::{MemoryStore, ResearchSnapshot, SnapshotStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
