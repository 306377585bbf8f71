//! Session storage adapters.

pub(crate) mod atomic;
mod file_session_store;
mod memory_session_store;

pub use file_session_store::FileSessionStore;
pub use memory_session_store::MemorySessionStore;
