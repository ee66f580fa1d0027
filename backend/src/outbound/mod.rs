//! Outbound adapters: persistence and the external content generator.

pub mod mistral;
pub mod persistence;
