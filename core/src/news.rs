//! News API facade: URL building plus delegation to `HttpClient::get`.

use serde_json::Value;
use url::Url;

use crate::client::HttpClient;
use crate::error::FetchError;
use crate::transport::Transport;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_CATEGORY: &str = "technology";
pub const DEFAULT_COUNTRY: &str = "ua";

/// Fixed settings of a `NewsService`. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    /// API root, e.g. `https://newsapi.org/v2`. Trailing slashes are dropped.
    pub base_url: String,
    pub api_key: String,
    /// Category sent with every top-headlines request.
    pub category: String,
    /// Country used when the form leaves it unset.
    pub default_country: String,
}

impl NewsConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            category: DEFAULT_CATEGORY.to_string(),
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, "")
    }
}

/// One of the two searches the page can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    TopHeadlines { country: String },
    Everything { q: String },
}

pub struct NewsService<T> {
    config: NewsConfig,
    http: HttpClient<T>,
}

impl<T> NewsService<T> {
    pub fn new(config: NewsConfig, transport: T) -> Self {
        Self {
            config,
            http: HttpClient::new(transport),
        }
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient<T> {
        &self.http
    }

    /// `{base}/top-headlines?country=..&category=..&apiKey=..`
    pub fn top_headlines_url(&self, country: &str) -> Result<String, FetchError> {
        self.endpoint(
            "top-headlines",
            &[
                ("country", country),
                ("category", self.config.category.as_str()),
                ("apiKey", self.config.api_key.as_str()),
            ],
        )
    }

    /// `{base}/everything?q=..&apiKey=..`
    pub fn everything_url(&self, query: &str) -> Result<String, FetchError> {
        self.endpoint("everything", &[("q", query), ("apiKey", self.config.api_key.as_str())])
    }

    pub fn url_for(&self, query: &Query) -> Result<String, FetchError> {
        match query {
            Query::TopHeadlines { country } => self.top_headlines_url(country),
            Query::Everything { q } => self.everything_url(q),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let raw = format!("{}/{path}", self.config.base_url);
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidRequest(format!("{raw}: {e}")))?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url.into())
    }
}

impl<T: Transport> NewsService<T> {
    pub fn top_headlines<F>(&self, country: &str, callback: F)
    where
        F: FnOnce(Result<Value, FetchError>),
    {
        match self.top_headlines_url(country) {
            Ok(url) => self.http.get(&url, callback),
            Err(e) => callback(Err(e)),
        }
    }

    pub fn everything<F>(&self, query: &str, callback: F)
    where
        F: FnOnce(Result<Value, FetchError>),
    {
        match self.everything_url(query) {
            Ok(url) => self.http.get(&url, callback),
            Err(e) => callback(Err(e)),
        }
    }

    pub fn run<F>(&self, query: &Query, callback: F)
    where
        F: FnOnce(Result<Value, FetchError>),
    {
        match query {
            Query::TopHeadlines { country } => self.top_headlines(country, callback),
            Query::Everything { q } => self.everything(q, callback),
        }
    }
}
