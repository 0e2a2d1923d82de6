//! Database models for the order domain.

pub mod order;
