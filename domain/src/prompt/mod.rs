//! Prompt domain
//!
//! Templates for the guardian review prompts.

pub mod guardian;

pub use guardian::GuardianPromptTemplate;
