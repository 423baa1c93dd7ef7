//! A stand-in for the news API, serving a fixed set of articles.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_API_KEY: &str = "test-key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    /// Country the article is listed under for top headlines.
    #[serde(skip)]
    pub country: String,
    #[serde(skip)]
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub status: String,
    pub total_results: usize,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct MockState {
    pub api_key: String,
    pub articles: Vec<Article>,
}

pub type Shared = Arc<MockState>;

pub fn app() -> Router {
    app_with(DEFAULT_API_KEY, seed_articles())
}

pub fn app_with(api_key: &str, articles: Vec<Article>) -> Router {
    let state: Shared = Arc::new(MockState {
        api_key: api_key.to_string(),
        articles,
    });
    Router::new()
        .route("/v2/top-headlines", get(top_headlines))
        .route("/v2/everything", get(everything))
        .route("/v2/echo", post(echo))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(api_key, seed_articles())).await
}

type ApiResult = Result<Json<ArticlesResponse>, (StatusCode, Json<ErrorResponse>)>;

fn api_error(status: StatusCode, code: &str, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            status: "error".to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }),
    )
}

fn check_key(state: &MockState, params: &HashMap<String, String>) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    match params.get("apiKey") {
        None => Err(api_error(
            StatusCode::UNAUTHORIZED,
            "apiKeyMissing",
            "Your API key is missing.",
        )),
        Some(key) if *key != state.api_key => Err(api_error(
            StatusCode::UNAUTHORIZED,
            "apiKeyInvalid",
            "Your API key is invalid or incorrect.",
        )),
        Some(_) => Ok(()),
    }
}

fn ok(articles: Vec<Article>) -> Json<ArticlesResponse> {
    Json(ArticlesResponse {
        status: "ok".to_string(),
        total_results: articles.len(),
        articles,
    })
}

async fn top_headlines(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    check_key(&state, &params)?;
    let country = params.get("country").ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            "parametersMissing",
            "Required parameters are missing: country.",
        )
    })?;
    let category = params.get("category");
    tracing::debug!(%country, ?category, "top-headlines");
    let articles = state
        .articles
        .iter()
        .filter(|a| a.country == *country)
        .filter(|a| category.map_or(true, |c| a.category == *c))
        .cloned()
        .collect();
    Ok(ok(articles))
}

async fn everything(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    check_key(&state, &params)?;
    let q = params
        .get("q")
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "parametersMissing",
                "Required parameters are missing: q.",
            )
        })?
        .to_lowercase();
    tracing::debug!(%q, "everything");
    let hit = |field: &Option<String>| field.as_deref().is_some_and(|f| f.to_lowercase().contains(&q));
    let articles = state
        .articles
        .iter()
        .filter(|a| hit(&a.title) || hit(&a.description))
        .cloned()
        .collect();
    Ok(ok(articles))
}

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (
        StatusCode::CREATED,
        Json(json!({ "received": body, "requestId": request_id })),
    )
}

fn article(
    country: &str,
    category: &str,
    source: &str,
    title: Option<&str>,
    description: Option<&str>,
    slug: &str,
) -> Article {
    Article {
        source: Source {
            id: None,
            name: source.to_string(),
        },
        author: None,
        title: title.map(str::to_string),
        description: description.map(str::to_string),
        url: format!("https://news.example/{slug}"),
        url_to_image: Some(format!("https://news.example/{slug}.jpg")),
        published_at: "2024-05-01T08:00:00Z".to_string(),
        country: country.to_string(),
        category: category.to_string(),
    }
}

/// Articles served by `app()`.
pub fn seed_articles() -> Vec<Article> {
    vec![
        article(
            "ua",
            "technology",
            "Kyiv Tech",
            Some("Kyiv startup ships open-source drone firmware"),
            Some("The firmware is written in Rust."),
            "ua-drone-firmware",
        ),
        article(
            "ua",
            "technology",
            "Kyiv Tech",
            Some("Ukrainian IT exports keep growing"),
            None,
            "ua-it-exports",
        ),
        article(
            "us",
            "technology",
            "Valley Wire",
            Some("Bitcoin rallies as ETF inflows climb"),
            Some("Analysts point to institutional demand."),
            "us-bitcoin-etf",
        ),
        article(
            "us",
            "business",
            "Valley Wire",
            Some("Chipmakers report record quarter"),
            Some("Demand for accelerators keeps rising."),
            "us-chipmakers",
        ),
        article(
            "gb",
            "technology",
            "London Bytes",
            None,
            Some("Untitled brief about bitcoin mining energy use."),
            "gb-mining-brief",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_serializes_with_news_api_field_names() {
        let json = serde_json::to_value(&seed_articles()[0]).unwrap();
        assert_eq!(json["urlToImage"], "https://news.example/ua-drone-firmware.jpg");
        assert_eq!(json["publishedAt"], "2024-05-01T08:00:00Z");
        assert_eq!(json["source"]["name"], "Kyiv Tech");
        assert!(json.get("country").is_none());
        assert!(json.get("category").is_none());
    }

    #[test]
    fn missing_title_serializes_as_null() {
        let json = serde_json::to_value(&seed_articles()[4]).unwrap();
        assert!(json["title"].is_null());
    }

    #[test]
    fn error_response_shape() {
        let (status, Json(body)) = api_error(StatusCode::UNAUTHORIZED, "apiKeyInvalid", "bad key");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, json!({"status": "error", "code": "apiKeyInvalid", "message": "bad key"}));
    }

    #[test]
    fn seed_covers_several_countries() {
        let articles = seed_articles();
        assert_eq!(articles.iter().filter(|a| a.country == "ua").count(), 2);
        assert!(articles.iter().any(|a| a.country == "us"));
    }
}
