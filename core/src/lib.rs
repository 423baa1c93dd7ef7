//! Client core for the news viewer.
//!
//! # Overview
//! Turns form criteria (country, free-text search) into news API requests,
//! normalizes every response into a single `Result`, and renders the
//! returned articles into a results container.
//!
//! # Design
//! - The core never touches the network. The host supplies a `Transport`
//!   that executes `HttpRequest` values, so everything above it stays
//!   deterministic and testable.
//! - `HttpClient` owns the status/JSON interpretation and guarantees one
//!   completion per request.
//! - `NewsService` only builds URLs and delegates to `HttpClient::get`.
//! - `NewsController` drives a `Page` through idle → loading → settled and
//!   drops completions from superseded loads.

pub mod client;
pub mod error;
pub mod http;
pub mod news;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod transport;
pub mod types;

pub use client::HttpClient;
pub use error::FetchError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use news::{NewsConfig, NewsService, Query};
pub use page::HtmlPage;
pub use pipeline::{AlertKind, LoadState, NewsControls, NewsController, Page, PendingLoad, Settled};
pub use render::{escape_html, news_template, render_news, ResultsContainer};
pub use transport::{NetworkError, Transport};
pub use types::{Article, ArticleSource, NewsResponse};
