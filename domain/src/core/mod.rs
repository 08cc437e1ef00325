//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the policy-evaluation model reference
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
