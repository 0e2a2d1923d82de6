//! Business logic services.

pub mod ingestion;
pub mod stats;
