//! Teaching Buddy core: teaching records, lesson plans and subject report
//! export for teachers.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, pure
//! aggregation and rendering, and the services; [`outbound`] implements the
//! domain ports; [`inbound`] drives the services from the command line.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
