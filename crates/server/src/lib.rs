//! Server crate for the HIR recommendation engine.
//!
//! This crate contains the service that builds the model once and answers
//! per-user recommendation requests against it.

pub mod service;

pub use service::{ItemRecommendation, RecommendationService, UserProfile};
