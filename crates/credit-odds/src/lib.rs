//! Approval-likelihood estimation for credit card and loan products.
//!
//! The [`estimator`] module holds the scoring model: static rule tables per
//! product, the normalizing score engine, tiered feedback, and the
//! questionnaire flow that collects one answer per factor before scoring.

pub mod config;
pub mod error;
pub mod estimator;
pub mod telemetry;
