//! Verdict parsing for guardian model output.

pub mod parsing;

pub use parsing::{DEFAULT_BLOCK_REASON, parse_verdict};
