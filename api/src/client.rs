use crate::normalize::normalize_feed;
use crate::wire::RawItem;
use crate::FeedSnapshot;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub type ApiResult<T> = Result<T, ApiError>;

const FEED_ENDPOINT: &str =
    "https://34g1eh6ord.execute-api.us-west-2.amazonaws.com/New_test/sports-events";
const FALLBACK_TEAMS_JSON: &str = include_str!("../../fallback_teams.json");

/// Overrides the feed endpoint URL.
pub const FEED_URL_ENV: &str = "ALUMNIHUB_FEED_URL";
/// Short-circuits the network entirely: path to a local raw-feed JSON file.
pub const FEED_JSON_ENV: &str = "ALUMNIHUB_FEED_JSON";

/// Sports-events feed client backed by the hub's AWS endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for FeedClient {
    fn default() -> Self {
        let endpoint =
            std::env::var(FEED_URL_ENV).unwrap_or_else(|_| FEED_ENDPOINT.to_owned());
        Self {
            client: Client::builder()
                .user_agent("alumnihub/0.1 (alumni sports dashboard)")
                .build()
                .unwrap_or_default(),
            endpoint,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl FeedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Fetch one feed snapshot and normalize it.
    ///
    /// Resolution order:
    /// 1) `ALUMNIHUB_FEED_JSON` env var — load from a local raw-feed JSON file.
    /// 2) Live endpoint GET.
    pub async fn fetch_snapshot(&self) -> ApiResult<FeedSnapshot> {
        if let Ok(path) = std::env::var(FEED_JSON_ENV)
            && !path.trim().is_empty()
        {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::Other(format!("could not read {path}: {e}")))?;
            let items: Vec<RawItem> = serde_json::from_str(&content)
                .map_err(|e| ApiError::Other(format!("invalid feed json at {path}: {e}")))?;
            return Ok(normalize_feed(items));
        }

        let items = self.fetch_raw().await?;
        Ok(normalize_feed(items))
    }

    async fn fetch_raw(&self) -> ApiResult<Vec<RawItem>> {
        debug!(endpoint = %self.endpoint, "fetching sports-events feed");
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, self.endpoint.clone()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<Vec<RawItem>>()
                .await
                .map_err(|e| ApiError::Parsing(e, self.endpoint.clone())),
            Err(e) => Err(ApiError::Api(e, self.endpoint.clone())),
        }
    }
}

/// Hardcoded fallback served whenever the feed is unreachable or malformed:
/// the embedded team records run through the normal classification path,
/// with no games and no standings.
pub fn fallback_snapshot() -> FeedSnapshot {
    let items: Vec<RawItem> = serde_json::from_str(FALLBACK_TEAMS_JSON).unwrap_or_default();
    normalize_feed(items)
}
