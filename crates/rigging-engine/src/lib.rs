//! Rigging Engine - synthesizes Kubernetes documents from workload models
//!
//! This crate provides:
//! - `Synthesizer`: one resource per workload kind, sharing a single pod template
//! - `exposure`: the Service fronting exposed workloads and every StatefulSet
//! - `Chart`: ordered registration and YAML emission of resources
//! - `web_service`: the fixed-shape Service + Deployment pair

pub mod chart;
pub mod error;
pub mod exposure;
pub mod pod_template;
pub mod resource;
pub mod synthesizer;
pub mod web_service;

pub use chart::{Chart, DOCUMENT_SEPARATOR};
pub use error::{EngineError, Result};
pub use pod_template::WORKLOAD_LABEL;
pub use resource::Resource;
pub use synthesizer::{Synthesized, Synthesizer};
pub use web_service::WebServiceProps;
