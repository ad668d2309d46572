//! Question dispatch framework.
//!
//! A question is tried against every registered [`Recognizer`] in
//! registration order; the first one that produces an [`Answer`] wins.
//! - [`Registry`]: ordered name → recognizer table, built once at startup
//! - [`Dispatcher`]: runs a question through the registry
//! - [`error`]: registration and dispatch failures

pub mod dispatcher;
pub mod error;
pub mod registry;

pub use dispatcher::{Dispatched, Dispatcher};
pub use error::{DispatchError, RecognizerError, RegistryError};
pub use registry::Registry;

use std::fmt;

use async_trait::async_trait;

/// Normalized data produced by a successful recognizer match.
pub trait Answer: fmt::Debug + Send + Sync {
    /// Short label naming the answer shape (used in logs and responses).
    fn kind(&self) -> &'static str;

    /// Export the answer as plain structured data.
    ///
    /// Must not perform I/O; repeated calls return equal values.
    fn export(&self) -> serde_json::Value;
}

/// A pattern recognizer for one family of question shapes.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Test `text` and, when it matches, produce an answer.
    ///
    /// `Ok(None)` means the question is not one this recognizer handles.
    ///
    /// # Errors
    /// Returns an error only when the question matched but answering it
    /// failed (for example the external source could not be reached).
    async fn search(&self, text: &str) -> Result<Option<Box<dyn Answer>>, RecognizerError>;
}
