//! HTTP adapters - the Axum surface over the orchestration core.

pub mod problems;
