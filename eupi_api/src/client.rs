//! HTTP client for the Phishing Initiative API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Serialize;
use url::Url;

use crate::{
    envelope::{ApiResponse, DebugInfo, Envelope},
    query::{FullTextQuery, LookupQuery, Query, SubmissionQuery, UrlQuery},
    submission::NewSubmission,
    Error,
};

/// Production service URL.
pub const DEFAULT_BASE_URL: &str = "https://phishing-initiative.eu";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const URLS_PATH: &str = "/api/v1/urls/";
const URL_LOOKUP_PATH: &str = "/api/v1/urls/lookup/";
const URL_SEARCH_PATH: &str = "/api/v1/urls/search/";
const SUBMISSIONS_PATH: &str = "/api/v1/submissions/";

/// Builder for [`Client`].
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    verify_tls: bool,
    debug: bool,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_tls: true,
            debug: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Service root, without path. Used for testing with wiremock.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set to false to accept self-signed or otherwise invalid certificates.
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Attach the resolved URL, POST payload, raw body and decoder message to responses.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_url, e);
            Error::InvalidUrl(format!("{}: {}", self.base_url, e))
        })?;

        let mut authorization = HeaderValue::from_str(&format!("Token {}", self.api_key))
            .map_err(|e| Error::ClientBuild(format!("API key is not a valid header value: {}", e)))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::ClientBuild(e.to_string())
            })?;

        Ok(Client {
            http,
            base_url,
            debug: self.debug,
        })
    }
}

/// HTTP client for the Phishing Initiative API.
///
/// Holds one session (base URL, TLS policy, debug flag, authorization
/// header) that is fixed at construction and shared by every call. Each
/// call is a single request with no retry.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    debug: bool,
}

impl Client {
    /// Creates a client for the production service.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        ClientBuilder::new(api_key).build()
    }

    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        ClientBuilder::new(api_key).base_url(base_url).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn resolve_url<Q: Query>(&self, path: &str, query: Option<&Q>) -> Result<Url, Error> {
        let url = self.base_url.join(path).map_err(|e| {
            tracing::error!("Invalid URL constructed from {}: {}", path, e);
            Error::InvalidUrl(format!("{}: {}", path, e))
        })?;
        match query {
            Some(query) => query.add_to_url(&url),
            None => Ok(url),
        }
    }

    async fn get<Q: Query>(&self, path: &str, query: Option<&Q>) -> Result<ApiResponse, Error> {
        let url = self.resolve_url(path, query)?;
        tracing::debug!("GET {}", url);
        let debug = self.debug.then(|| DebugInfo {
            url: url.to_string(),
            query: None,
        });

        let resp = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        let body = read_body(resp).await?;
        Ok(ApiResponse {
            envelope: Envelope::from_body(&body, self.debug),
            debug,
        })
    }

    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<ApiResponse, Error> {
        let url = self.resolve_url::<LookupQuery>(path, None)?;
        tracing::debug!("POST {}", url);
        let debug = self.debug.then(|| DebugInfo {
            url: url.to_string(),
            query: serde_json::to_value(payload).ok(),
        });

        let resp = self.http.post(url).json(payload).send().await.map_err(|e| {
            tracing::error!("Failed to post resource: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        let body = read_body(resp).await?;
        Ok(ApiResponse {
            envelope: Envelope::from_body(&body, self.debug),
            debug,
        })
    }

    /// Searches URLs with the expanded filters.
    pub async fn search_urls(&self, query: &UrlQuery) -> Result<ApiResponse, Error> {
        self.get(URLS_PATH, Some(query)).await
    }

    /// Fetches a single URL record. `None` or `Some(0)` returns the first
    /// page of the URL listing.
    pub async fn get_url(&self, id: Option<u64>) -> Result<ApiResponse, Error> {
        self.get::<UrlQuery>(&item_path(URLS_PATH, id), None).await
    }

    /// Looks up one URL by exact match.
    pub async fn lookup_url(&self, url: &str) -> Result<ApiResponse, Error> {
        self.get(URL_LOOKUP_PATH, Some(&LookupQuery::new(url)))
            .await
    }

    /// Full-text search over captured page content.
    pub async fn search_full_text(&self, query: &FullTextQuery) -> Result<ApiResponse, Error> {
        self.get(URL_SEARCH_PATH, Some(query)).await
    }

    /// Searches the caller's submissions.
    pub async fn search_submissions(
        &self,
        query: &SubmissionQuery,
    ) -> Result<ApiResponse, Error> {
        self.get(SUBMISSIONS_PATH, Some(query)).await
    }

    /// Fetches a single submission. `None` or `Some(0)` returns the first
    /// page of the submission listing.
    pub async fn get_submission(&self, id: Option<u64>) -> Result<ApiResponse, Error> {
        self.get::<SubmissionQuery>(&item_path(SUBMISSIONS_PATH, id), None)
            .await
    }

    /// Creates a submission. The tag is checked before anything is sent.
    /// Not idempotent.
    pub async fn post_submission(&self, submission: &NewSubmission) -> Result<ApiResponse, Error> {
        submission.validate()?;
        self.post(SUBMISSIONS_PATH, submission).await
    }
}

async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    tracing::debug!("Response status {}", status);
    resp.text().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        Error::RequestFailed(e.to_string())
    })
}

fn item_path(collection: &str, id: Option<u64>) -> String {
    match id {
        Some(id) if id > 0 => format!("{}{}/", collection, id),
        _ => collection.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Client {
        Client::with_base_url(base_url, "secret").unwrap()
    }

    #[test]
    fn item_path_falls_back_to_listing() {
        assert_eq!(item_path(URLS_PATH, Some(42)), "/api/v1/urls/42/");
        assert_eq!(item_path(URLS_PATH, Some(0)), "/api/v1/urls/");
        assert_eq!(item_path(SUBMISSIONS_PATH, None), "/api/v1/submissions/");
    }

    #[test]
    fn absolute_path_replaces_base_path() {
        let url = client("https://example.com/ignored/")
            .resolve_url::<LookupQuery>(URLS_PATH, None)
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/urls/");
    }

    #[test]
    fn query_without_pairs_leaves_no_question_mark() {
        let query = UrlQuery {
            common: Default::default(),
            filters: Default::default(),
        };
        let url = client("https://example.com")
            .resolve_url(URLS_PATH, Some(&query))
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/urls/");
    }

    #[test]
    fn lookup_encodes_url() {
        let url = client("https://example.com")
            .resolve_url(URL_LOOKUP_PATH, Some(&LookupQuery::new("http://a.example/?x=1")))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/v1/urls/lookup/?url=http%3A%2F%2Fa.example%2F%3Fx%3D1"
        );
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = Client::with_base_url("not a url", "secret").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn builder_keeps_debug_flag() {
        let client = Client::builder("secret")
            .debug(true)
            .verify_tls(false)
            .build()
            .unwrap();
        assert!(client.is_debug());
        assert_eq!(client.base_url().as_str(), "https://phishing-initiative.eu/");
    }
}
