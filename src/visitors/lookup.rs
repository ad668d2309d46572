//! Lookup strategies for visitor questions.
//!
//! The number of name tokens decides the strategy:
//! - no tokens: the latest records, unfiltered
//! - one token: ambiguous, asked as a given name and as a family name
//! - two or more: first token is the given name, last is the family name

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::LookupError;
use super::normalize::RawVisitRecord;

/// Maximum number of records requested per query.
pub const MAX_RECORDS: usize = 25;

/// Sort order requested per query: most recently released first.
pub const ORDER_BY: &str = "release_date DESC";

/// Filters for one query against the visitor-log source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitorFilter {
    /// Visitor given name to match.
    pub given_name: Option<String>,
    /// Visitor family name to match.
    pub family_name: Option<String>,
    /// Maximum number of records to return.
    pub limit: usize,
    /// Sort order expression.
    pub order: String,
}

impl VisitorFilter {
    /// A filter with no name constraint.
    #[must_use]
    pub fn latest() -> Self {
        Self {
            given_name: None,
            family_name: None,
            limit: MAX_RECORDS,
            order: ORDER_BY.to_string(),
        }
    }

    /// Restrict to a given name.
    #[must_use]
    pub fn with_given_name(mut self, name: impl Into<String>) -> Self {
        self.given_name = Some(name.into());
        self
    }

    /// Restrict to a family name.
    #[must_use]
    pub fn with_family_name(mut self, name: impl Into<String>) -> Self {
        self.family_name = Some(name.into());
        self
    }
}

/// Read-only access to person-visit records.
#[async_trait]
pub trait VisitorSource: Send + Sync {
    /// Fetch the records matching `filter`. An empty list is a valid answer.
    ///
    /// # Errors
    /// Returns an error if the source cannot be reached or its reply is
    /// not a list of records.
    async fn fetch(&self, filter: &VisitorFilter) -> Result<Vec<RawVisitRecord>, LookupError>;
}

/// How the records for a visitor question are fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Latest records with no name filter.
    Latest,
    /// One token that may be either a given or a family name.
    AmbiguousSingleToken(String),
    /// Given and family name queried together.
    TwoToken {
        /// First token.
        given: String,
        /// Last token.
        family: String,
    },
}

impl LookupStrategy {
    /// Pick the strategy for a list of name tokens. Middle tokens are
    /// discarded.
    #[must_use]
    pub fn for_tokens(tokens: &[String]) -> Self {
        match tokens {
            [] => Self::Latest,
            [name] => Self::AmbiguousSingleToken(name.clone()),
            [given, .., family] => Self::TwoToken {
                given: given.clone(),
                family: family.clone(),
            },
        }
    }

    /// The name shown alongside the results.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Latest => String::new(),
            Self::AmbiguousSingleToken(name) => name.clone(),
            Self::TwoToken { given, family } => format!("{given} {family}"),
        }
    }

    /// Run the strategy against `source`.
    ///
    /// The single-token queries run concurrently and both must succeed;
    /// a failure in either fails the lookup.
    ///
    /// # Errors
    /// Returns the first [`LookupError`] raised by the source.
    pub async fn execute(
        &self,
        source: &dyn VisitorSource,
    ) -> Result<Vec<RawVisitRecord>, LookupError> {
        match self {
            Self::Latest => source.fetch(&VisitorFilter::latest()).await,
            Self::AmbiguousSingleToken(name) => {
                let by_given = VisitorFilter::latest().with_given_name(name);
                let by_family = VisitorFilter::latest().with_family_name(name);
                let (given, family) =
                    tokio::try_join!(source.fetch(&by_given), source.fetch(&by_family))?;
                tracing::debug!(
                    "Ambiguous name {name}: {} given-name and {} family-name records",
                    given.len(),
                    family.len()
                );
                Ok(merge(given, family))
            }
            Self::TwoToken { given, family } => {
                let filter = VisitorFilter::latest()
                    .with_given_name(given)
                    .with_family_name(family);
                source.fetch(&filter).await
            }
        }
    }

    /// Run the strategy, failing the whole lookup if it outlasts `deadline`.
    ///
    /// # Errors
    /// Returns [`LookupError::Timeout`] on expiry, otherwise as
    /// [`LookupStrategy::execute`].
    pub async fn execute_within(
        &self,
        source: &dyn VisitorSource,
        deadline: Option<Duration>,
    ) -> Result<Vec<RawVisitRecord>, LookupError> {
        match deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.execute(source))
                .await
                .map_err(|_| LookupError::Timeout)?,
            None => self.execute(source).await,
        }
    }
}

/// Given-name matches first, then family-name matches.
#[must_use]
pub fn merge(
    mut given: Vec<RawVisitRecord>,
    family: Vec<RawVisitRecord>,
) -> Vec<RawVisitRecord> {
    given.extend(family);
    given
}
