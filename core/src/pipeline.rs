//! Ties form input to the news service and the renderer.
//!
//! # Design
//! A load moves through idle → loading → settled and back to idle. Each
//! `start` issues a new generation; `settle` ignores completions whose
//! generation has been superseded, so a slow response to an older submit
//! can never overwrite the results of a newer one. The loader is always
//! removed before the outcome is inspected.

use serde_json::Value;

use crate::error::FetchError;
use crate::news::{NewsService, Query};
use crate::render::{render_news, ResultsContainer};
use crate::transport::Transport;
use crate::types::NewsResponse;

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    /// CSS class attached to the toast.
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error-msg",
        }
    }
}

/// The UI surface a `NewsController` drives.
pub trait Page {
    fn show_loader(&mut self);
    fn remove_loader(&mut self);
    fn show_alert(&mut self, message: &str, kind: AlertKind);
    fn results(&mut self) -> &mut ResultsContainer;
}

/// Current values of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsControls {
    pub country: Option<String>,
    pub search: String,
}

impl NewsControls {
    pub fn new(country: Option<String>, search: impl Into<String>) -> Self {
        Self {
            country,
            search: search.into(),
        }
    }

    /// Search text wins over country; an unset or empty country falls back
    /// to `default_country`.
    pub fn query(&self, default_country: &str) -> Query {
        let search = self.search.trim();
        if !search.is_empty() {
            return Query::Everything {
                q: search.to_string(),
            };
        }
        let country = self
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_country);
        Query::TopHeadlines {
            country: country.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { generation: u64 },
}

/// A load that has been started and awaits its completion.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingLoad {
    pub generation: u64,
    pub query: Query,
}

/// How a load ended.
#[derive(Debug)]
pub enum Settled {
    /// Cards were rendered for this many articles.
    Rendered(usize),
    /// The API answered with no articles; nothing was rendered.
    Empty,
    /// An alert was shown and nothing was rendered.
    Failed(FetchError),
    /// A newer load was started in the meantime, or this load was already
    /// settled; the outcome was dropped.
    Stale,
}

pub struct NewsController<T> {
    service: NewsService<T>,
    generation: u64,
    state: LoadState,
}

impl<T> NewsController<T> {
    pub fn new(service: NewsService<T>) -> Self {
        Self {
            service,
            generation: 0,
            state: LoadState::Idle,
        }
    }

    pub fn service(&self) -> &NewsService<T> {
        &self.service
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Generation of the most recently started load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Show the loader and pick the query for the current form values.
    pub fn start<P: Page>(&mut self, page: &mut P, controls: &NewsControls) -> PendingLoad {
        self.generation += 1;
        self.state = LoadState::Loading {
            generation: self.generation,
        };
        page.show_loader();
        let query = controls.query(&self.service.config().default_country);
        tracing::debug!(generation = self.generation, ?query, "news load started");
        PendingLoad {
            generation: self.generation,
            query,
        }
    }

    /// Apply the outcome of `pending` to the page.
    pub fn settle<P: Page>(
        &mut self,
        page: &mut P,
        pending: PendingLoad,
        outcome: Result<Value, FetchError>,
    ) -> Settled {
        let live = LoadState::Loading {
            generation: pending.generation,
        };
        if self.state != live {
            tracing::debug!(
                generation = pending.generation,
                latest = self.generation,
                "dropping stale news response"
            );
            return Settled::Stale;
        }
        self.state = LoadState::Idle;
        page.remove_loader();

        let response = outcome.and_then(|value| {
            serde_json::from_value::<NewsResponse>(value).map_err(|e| FetchError::Decode(e.to_string()))
        });
        match response {
            Err(err) => {
                tracing::warn!(generation = pending.generation, error = %err, "news load failed");
                page.show_alert(&err.to_string(), AlertKind::Error);
                Settled::Failed(err)
            }
            Ok(response) if response.articles.is_empty() => {
                tracing::info!(generation = pending.generation, "news load returned no articles");
                Settled::Empty
            }
            Ok(response) => {
                let count = response.articles.len();
                render_news(page.results(), &response.articles);
                tracing::info!(generation = pending.generation, count, "news rendered");
                Settled::Rendered(count)
            }
        }
    }
}

impl<T: Transport> NewsController<T> {
    /// Run one full load: start, query the service, settle.
    pub fn load_news<P: Page>(&mut self, page: &mut P, controls: &NewsControls) -> Settled {
        let pending = self.start(page, controls);
        let mut outcome = None;
        self.service.run(&pending.query, |result| outcome = Some(result));
        let outcome = outcome.unwrap_or_else(|| {
            Err(FetchError::Network {
                message: "request completed without a result".to_string(),
            })
        });
        self.settle(page, pending, outcome)
    }
}
