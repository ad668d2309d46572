//! HTTP source for the visitor-log records API.
//!
//! Speaks the Socrata query dialect: name filters as plain parameters,
//! `$limit` and `$order` for the cap and sort.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::config::AnswersConfig;

use super::error::LookupError;
use super::lookup::{VisitorFilter, VisitorSource};
use super::normalize::RawVisitRecord;

/// Visitor-log source backed by the public records API.
#[derive(Clone, Debug)]
pub struct VisitorLogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl VisitorLogClient {
    /// Create a client for the endpoint named in `config`.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be created.
    pub fn new(config: &AnswersConfig) -> Result<Self, LookupError> {
        let endpoint = Url::parse(&config.api_endpoint)?;
        let client = Self::build_client(config)?;
        Ok(Self { client, endpoint })
    }

    fn build_client(config: &AnswersConfig) -> Result<reqwest::Client, LookupError> {
        let mut headers = HeaderMap::new();

        if let Ok(ua_value) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, ua_value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()
            .map_err(|e| LookupError::HttpClient(e.to_string()))
    }

    /// Build the query URL for a filter.
    #[must_use]
    pub fn build_url(&self, filter: &VisitorFilter) -> Url {
        let mut url = self.endpoint.clone();

        {
            let mut params = url.query_pairs_mut();
            if let Some(given) = non_blank(filter.given_name.as_deref()) {
                params.append_pair("namefirst", given);
            }
            if let Some(family) = non_blank(filter.family_name.as_deref()) {
                params.append_pair("namelast", family);
            }
            params.append_pair("$limit", &filter.limit.to_string());
            params.append_pair("$order", &filter.order);
        }

        url
    }
}

#[async_trait]
impl VisitorSource for VisitorLogClient {
    async fn fetch(&self, filter: &VisitorFilter) -> Result<Vec<RawVisitRecord>, LookupError> {
        let url = self.build_url(filter);
        tracing::debug!("Fetching visitor records: {url}");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::Transport(e)
            }
        })?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let records: Vec<RawVisitRecord> = serde_json::from_slice(&body)?;
        tracing::debug!("Visitor log returned {} records", records.len());
        Ok(records)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VisitorLogClient {
        VisitorLogClient::new(&AnswersConfig::default()).unwrap()
    }

    #[test]
    fn test_build_url_latest() {
        let url = client().build_url(&VisitorFilter::latest());
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("explore.data.gov"));
        assert_eq!(
            pairs,
            vec![
                ("$limit".to_string(), "25".to_string()),
                ("$order".to_string(), "release_date DESC".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_url_with_names() {
        let filter = VisitorFilter::latest()
            .with_given_name("John")
            .with_family_name("Smith");
        let url = client().build_url(&filter);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("namefirst".to_string(), "John".to_string())));
        assert!(pairs.contains(&("namelast".to_string(), "Smith".to_string())));
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let url = client().build_url(&VisitorFilter::latest().with_given_name("  "));
        assert!(url.query_pairs().all(|(key, _)| key != "namefirst"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = AnswersConfig::default().with_endpoint("not a url");
        assert!(matches!(
            VisitorLogClient::new(&config),
            Err(LookupError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_source_is_an_error() {
        let config = AnswersConfig::default().with_endpoint("http://127.0.0.1:9/visits.json");
        let client = VisitorLogClient::new(&config).unwrap();
        let result = client.fetch(&VisitorFilter::latest()).await;
        assert!(result.is_err());
    }
}
