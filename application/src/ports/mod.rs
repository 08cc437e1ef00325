//! Ports (interfaces) for external dependencies
//!
//! These traits define the boundaries between the application layer
//! and the infrastructure layer.

pub mod clock;
pub mod decision_logger;
pub mod guardian_model;
pub mod llm_gateway;
