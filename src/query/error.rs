//! Error types for the dispatch framework.

use thiserror::Error;

use crate::visitors::error::LookupError;

/// Errors raised while building a [`Registry`](super::Registry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A recognizer with this name is already registered.
    #[error("recognizer already registered: {0}")]
    DuplicateName(String),
}

/// Failure raised inside a recognizer after its pattern matched.
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// The external records source could not be queried.
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),
    /// Any other fault inside the recognizer.
    #[error("internal recognizer error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors surfaced to the caller of [`Dispatcher::answer`](super::Dispatcher::answer).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A recognizer failed; no later recognizer was tried.
    #[error("recognizer `{name}` failed: {source}")]
    RecognizerFailure {
        /// Registered name of the failing recognizer.
        name: String,
        /// Underlying cause.
        #[source]
        source: RecognizerError,
    },
}

impl DispatchError {
    /// Name of the recognizer that failed.
    #[must_use]
    pub fn recognizer(&self) -> &str {
        match self {
            Self::RecognizerFailure { name, .. } => name,
        }
    }

    /// Whether the failure came from the external data source rather than
    /// from a fault in the recognizer itself.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RecognizerFailure {
                source: RecognizerError::Lookup(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let transport = DispatchError::RecognizerFailure {
            name: "visitors".to_string(),
            source: RecognizerError::Lookup(LookupError::Timeout),
        };
        assert!(transport.is_transport());
        assert_eq!(transport.recognizer(), "visitors");

        let internal = DispatchError::RecognizerFailure {
            name: "broken".to_string(),
            source: RecognizerError::Internal(anyhow::anyhow!("boom")),
        };
        assert!(!internal.is_transport());
        assert!(internal.to_string().contains("`broken`"));
    }
}
