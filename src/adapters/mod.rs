//! Adapters: concrete implementations of the ports.

pub mod ai;
pub mod analyzer;
pub mod http;
pub mod rate_limiter;
pub mod storage;
