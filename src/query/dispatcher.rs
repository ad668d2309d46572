//! First-match dispatch over a [`Registry`].

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use super::error::DispatchError;
use super::{Answer, Registry};

/// The winning answer together with the recognizer that produced it.
#[derive(Debug)]
pub struct Dispatched {
    /// Registered name of the recognizer that matched.
    pub recognizer: String,
    /// The answer it produced.
    pub answer: Box<dyn Answer>,
}

/// Runs questions through the registry in registration order.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Create a dispatcher over an already built registry.
    #[must_use]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher reads from.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Answer a question with the first recognizer that matches it.
    ///
    /// Returns `Ok(None)` when nothing matches or the registry is empty.
    ///
    /// # Errors
    /// Returns [`DispatchError::RecognizerFailure`] as soon as a recognizer
    /// fails; recognizers registered after it are not tried.
    pub async fn answer(&self, text: &str) -> Result<Option<Dispatched>, DispatchError> {
        let span = tracing::info_span!("dispatch", id = %Uuid::new_v4());
        self.answer_inner(text).instrument(span).await
    }

    async fn answer_inner(&self, text: &str) -> Result<Option<Dispatched>, DispatchError> {
        for (name, recognizer) in self.registry.all() {
            tracing::debug!("Trying recognizer: {name}");

            match recognizer.search(text).await {
                Ok(Some(answer)) => {
                    tracing::info!("Question answered by {name} ({})", answer.kind());
                    return Ok(Some(Dispatched {
                        recognizer: name.to_string(),
                        answer,
                    }));
                }
                Ok(None) => {}
                Err(source) => {
                    tracing::warn!("Recognizer {name} failed: {source}");
                    return Err(DispatchError::RecognizerFailure {
                        name: name.to_string(),
                        source,
                    });
                }
            }
        }

        tracing::debug!("No recognizer matched");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Recognizer, RecognizerError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Label(&'static str);

    impl Answer for Label {
        fn kind(&self) -> &'static str {
            "label"
        }

        fn export(&self) -> serde_json::Value {
            serde_json::json!({ "label": self.0 })
        }
    }

    /// Accepts any text containing `needle` and counts its invocations.
    struct Contains {
        needle: &'static str,
        label: &'static str,
        calls: AtomicUsize,
    }

    impl Contains {
        fn new(needle: &'static str, label: &'static str) -> Arc<Self> {
            Arc::new(Self {
                needle,
                label,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Recognizer for Contains {
        async fn search(&self, text: &str) -> Result<Option<Box<dyn Answer>>, RecognizerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text
                .contains(self.needle)
                .then(|| Box::new(Label(self.label)) as Box<dyn Answer>))
        }
    }

    struct Failing;

    #[async_trait]
    impl Recognizer for Failing {
        async fn search(&self, _text: &str) -> Result<Option<Box<dyn Answer>>, RecognizerError> {
            Err(RecognizerError::Internal(anyhow::anyhow!("pattern exploded")))
        }
    }

    fn dispatcher(entries: Vec<(&str, Arc<dyn Recognizer>)>) -> Dispatcher {
        let mut registry = Registry::new();
        for (name, recognizer) in entries {
            registry.register(name, recognizer).unwrap();
        }
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_first_registered_match_wins() {
        let a = Contains::new("house", "a");
        let b = Contains::new("house", "b");
        let dispatcher = dispatcher(vec![
            ("a", a.clone() as Arc<dyn Recognizer>),
            ("b", b.clone() as Arc<dyn Recognizer>),
        ]);

        let dispatched = dispatcher.answer("the white house").await.unwrap().unwrap();
        assert_eq!(dispatched.recognizer, "a");
        assert_eq!(dispatched.answer.export(), serde_json::json!({ "label": "a" }));
        assert_eq!(b.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_to_later_recognizer() {
        let a = Contains::new("werewolf", "a");
        let b = Contains::new("house", "b");
        let dispatcher = dispatcher(vec![
            ("a", a.clone() as Arc<dyn Recognizer>),
            ("b", b as Arc<dyn Recognizer>),
        ]);

        let dispatched = dispatcher.answer("the white house").await.unwrap().unwrap();
        assert_eq!(dispatched.recognizer, "b");
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_match_is_not_an_error() {
        let werewolf: Arc<dyn Recognizer> = Contains::new("werewolf", "a");
        let dispatcher = dispatcher(vec![("a", werewolf)]);
        assert!(dispatcher.answer("what time is it").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_registry_answers_nothing() {
        let dispatcher = Dispatcher::new(Arc::new(Registry::new()));
        assert!(dispatcher.answer("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failure_stops_dispatch() {
        let later = Contains::new("house", "later");
        let dispatcher = dispatcher(vec![
            ("broken", Arc::new(Failing) as Arc<dyn Recognizer>),
            ("later", later.clone() as Arc<dyn Recognizer>),
        ]);

        let err = dispatcher.answer("the white house").await.unwrap_err();
        assert_eq!(err.recognizer(), "broken");
        assert!(!err.is_transport());
        assert_eq!(later.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_export_is_idempotent() {
        let any_x: Arc<dyn Recognizer> = Contains::new("x", "a");
        let dispatcher = dispatcher(vec![("a", any_x)]);
        let dispatched = dispatcher.answer("x").await.unwrap().unwrap();
        assert_eq!(dispatched.answer.export(), dispatched.answer.export());
    }
}
