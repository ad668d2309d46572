//! Ordered table of named recognizers.

use std::sync::Arc;

use super::Recognizer;
use super::error::RegistryError;

/// Named recognizers kept in registration order.
///
/// Built once at startup and shared read-only (usually behind an `Arc`)
/// with every [`Dispatcher`](super::Dispatcher). There is no removal.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Arc<dyn Recognizer>)>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a recognizer under `name`.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateName`] if `name` is taken; the
    /// registry is left unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        recognizer: Arc<dyn Recognizer>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.entries.iter().any(|(existing, _)| *existing == name) {
            return Err(RegistryError::DuplicateName(name));
        }
        tracing::debug!("Registered recognizer: {name}");
        self.entries.push((name, recognizer));
        Ok(())
    }

    /// Iterate over `(name, recognizer)` pairs in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Arc<dyn Recognizer>)> {
        self.entries
            .iter()
            .map(|(name, recognizer)| (name.as_str(), recognizer))
    }

    /// Registered names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of registered recognizers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Answer, RecognizerError};
    use async_trait::async_trait;

    struct Never;

    #[async_trait]
    impl Recognizer for Never {
        async fn search(&self, _text: &str) -> Result<Option<Box<dyn Answer>>, RecognizerError> {
            Ok(None)
        }
    }

    #[test]
    fn test_registration_order() {
        let mut registry = Registry::new();
        registry.register("first", Arc::new(Never)).unwrap();
        registry.register("second", Arc::new(Never)).unwrap();
        registry.register("third", Arc::new(Never)).unwrap();

        assert_eq!(registry.names(), vec!["first", "second", "third"]);
        let ordered: Vec<&str> = registry.all().map(|(name, _)| name).collect();
        assert_eq!(ordered, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.register("visitors", Arc::new(Never)).unwrap();
        registry.register("other", Arc::new(Never)).unwrap();

        let err = registry.register("visitors", Arc::new(Never)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("visitors".to_string()));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["visitors", "other"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.all().count(), 0);
    }
}
