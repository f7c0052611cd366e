//! Profile storage adapters.

pub mod file_store;
pub mod in_memory;

pub use file_store::FileProfileStore;
pub use in_memory::InMemoryProfileStore;
