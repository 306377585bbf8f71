//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The command line is the only transport; see [`cli`].

pub mod cli;
