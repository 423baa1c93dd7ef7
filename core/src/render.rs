//! Article cards and the results container they are inserted into.
//!
//! # Design
//! `ResultsContainer` models the page element holding the cards as an
//! ordered list of markup fragments. A render clears it completely and
//! inserts every new card in one bulk write.

use url::Url;

use crate::types::Article;

/// The element the rendered cards live in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsContainer {
    children: Vec<String>,
    writes: usize,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Number of bulk insertions performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Remove every child, last first.
    pub fn clear(&mut self) {
        while self.children.pop().is_some() {}
    }

    /// Insert `fragments` ahead of the existing children as one write.
    pub fn insert_front(&mut self, fragments: Vec<String>) {
        self.children.splice(0..0, fragments);
        self.writes += 1;
    }

    pub fn to_html(&self) -> String {
        self.children.concat()
    }
}

/// Replace whatever `container` shows with one card per article.
pub fn render_news(container: &mut ResultsContainer, articles: &[Article]) {
    if !container.is_empty() {
        container.clear();
    }
    let fragments = articles.iter().map(news_template).collect();
    container.insert_front(fragments);
}

/// Markup for a single article card. Every field is escaped; missing
/// fields render as empty strings, and so do links that are not absolute
/// `http`/`https` URLs.
pub fn news_template(article: &Article) -> String {
    let image = escape_link(&article.url_to_image);
    let title = escape_field(&article.title);
    let description = escape_field(&article.description);
    let url = escape_link(&article.url);
    format!(
        r#"
        <div class="col s12">
            <div class="card">
                <div class="card-image">
                    <img src="{image}">
                    <span class="card-title">{title}</span>
                </div>
                <div class="card-content">
                    <p>{description}</p>
                </div>
                <div class="card-action">
                    <a href="{url}">Read more</a>
                </div>
            </div>
        </div>
    "#
    )
}

fn escape_field(field: &Option<String>) -> String {
    field.as_deref().map(escape_html).unwrap_or_default()
}

fn escape_link(field: &Option<String>) -> String {
    field
        .as_deref()
        .filter(|link| {
            Url::parse(link.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
        })
        .map(escape_html)
        .unwrap_or_default()
}

/// Escape text for use in element content and double- or single-quoted
/// attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
