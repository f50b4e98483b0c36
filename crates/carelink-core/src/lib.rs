//! Shared plumbing for Carelink services: tracing setup, liveness handlers,
//! and common middleware.

pub mod health;
pub mod middleware;
pub mod tracing;
