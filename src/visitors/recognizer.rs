//! Recognizer answering questions about White House visitors.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::query::{Answer, Recognizer, RecognizerError};

use super::lookup::{LookupStrategy, VisitorSource};
use super::normalize::{NormalizedVisitRecord, RecordNormalizer};
use super::patterns::{VisitorPatterns, VisitorQuery};

/// Normalized visit records for the name a question asked about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VisitorAnswer {
    /// Name that was looked up, empty for the unfiltered listing.
    pub name: String,
    /// Visits, most recently released first.
    pub results: Vec<NormalizedVisitRecord>,
}

impl Answer for VisitorAnswer {
    fn kind(&self) -> &'static str {
        "white_house_visitors"
    }

    fn export(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "results": self.results,
        })
    }
}

/// Matches visitor questions and looks the visits up in `source`.
pub struct VisitorLogRecognizer {
    patterns: VisitorPatterns,
    normalizer: RecordNormalizer,
    source: Arc<dyn VisitorSource>,
    lookup_timeout: Option<Duration>,
}

impl VisitorLogRecognizer {
    /// Create a recognizer over a visitor-log source.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new(source: Arc<dyn VisitorSource>) -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: VisitorPatterns::new()?,
            normalizer: RecordNormalizer::new()?,
            source,
            lookup_timeout: None,
        })
    }

    /// Bound each lookup (both queries of an ambiguous name together).
    #[must_use]
    pub const fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

#[async_trait]
impl Recognizer for VisitorLogRecognizer {
    async fn search(&self, text: &str) -> Result<Option<Box<dyn Answer>>, RecognizerError> {
        let Some(query) = self.patterns.classify(text) else {
            return Ok(None);
        };

        let strategy = match &query {
            VisitorQuery::Everyone => LookupStrategy::Latest,
            VisitorQuery::Named(tokens) => LookupStrategy::for_tokens(tokens),
        };
        tracing::debug!("Visitor question, strategy {strategy:?}");

        let records = strategy
            .execute_within(self.source.as_ref(), self.lookup_timeout)
            .await?;

        Ok(Some(Box::new(VisitorAnswer {
            name: strategy.display_name(),
            results: self.normalizer.normalize_all(&records),
        })))
    }
}
