//! White House visitor-log questions.
//!
//! - [`patterns`]: question shapes and name extraction
//! - [`lookup`]: strategy selection and the [`VisitorSource`] seam
//! - [`client`]: HTTP implementation of [`VisitorSource`]
//! - [`normalize`]: display-ready records
//! - [`recognizer`]: ties the above into a [`crate::query::Recognizer`]

pub mod client;
pub mod error;
pub mod lookup;
pub mod normalize;
pub mod patterns;
pub mod recognizer;

pub use client::VisitorLogClient;
pub use error::LookupError;
pub use lookup::{LookupStrategy, VisitorFilter, VisitorSource};
pub use normalize::{NormalizedVisitRecord, RawVisitRecord, RecordNormalizer};
pub use patterns::{VisitorPatterns, VisitorQuery};
pub use recognizer::{VisitorAnswer, VisitorLogRecognizer};

/// Registry name of the visitor-log recognizer.
pub const RECOGNIZER_NAME: &str = "visitor_white_house_log_search";
