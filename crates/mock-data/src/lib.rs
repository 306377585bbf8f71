//! Bundled mock dataset for Teaching Buddy's offline mode.
//!
//! This crate owns the fixture data the app falls back to when no remote API
//! is configured: two teacher accounts, the subject reference list, a few
//! teaching records and a lesson plan. It stays independent of the app's
//! domain types so the app can map it into validated entities on load.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Parsing and cross-checking datasets from JSON
//! - Loading the dataset bundled at compile time
//! - Deterministic generation of extra teaching records from a seed
//!
//! # Example
//!
//! ```
//! use mock_data::MockDataset;
//!
//! let dataset = MockDataset::bundled().expect("bundled dataset is valid");
//! let john = dataset.find_user_by_email("teacher1@example.com").expect("user");
//! assert_eq!(john.name, "John Doe");
//! ```

mod dataset;
mod error;
mod generator;

pub use dataset::{MockDataset, MockLessonPlan, MockSubject, MockTeachingRecord, MockUser};
pub use error::{DatasetError, GenerationError};
pub use generator::{RecordGenerationRequest, generate_teaching_records};
