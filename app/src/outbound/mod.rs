//! Driven adapters implementing the domain ports.

pub mod backend;
pub mod export;
pub mod http;
pub mod memory;
pub mod storage;
