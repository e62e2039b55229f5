//! Mindgate - Multimodal Emotion Fusion and Crisis Routing Engine
//!
//! This crate implements the decision core of a mental-health support chat
//! application: per-modality emotion estimation, weighted multi-source fusion,
//! tiered risk routing with hard crisis overrides, and longitudinal per-user
//! emotional profiles.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
