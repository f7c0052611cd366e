//! Domain layer: pure types and algorithms, free of I/O.

pub mod foundation;
pub mod style;
