//! DigitalMe - Writing Style Profiling Backend
//!
//! This crate builds and maintains per-user writing style profiles from
//! text samples and ongoing conversation, using LLM-backed analysis with
//! deterministic merge and refinement rules.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
