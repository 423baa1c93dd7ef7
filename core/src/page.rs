//! Server-side rendition of the news page.
//!
//! `HtmlPage` implements `Page` by keeping the loader flag, the toasts and
//! the results container in memory, and renders the whole document on
//! demand with the search form, the loader while a load is in flight, any
//! toasts, and the article cards.

use crate::news::DEFAULT_COUNTRY;
use crate::pipeline::{AlertKind, NewsControls, Page};
use crate::render::{escape_html, ResultsContainer};

/// Countries offered by the country selector, as (code, label).
pub const COUNTRIES: &[(&str, &str)] = &[
    ("ua", "Ukraine"),
    ("us", "USA"),
    ("gb", "United Kingdom"),
    ("de", "Germany"),
    ("fr", "France"),
    ("pl", "Poland"),
    ("ca", "Canada"),
    ("au", "Australia"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: AlertKind,
}

#[derive(Debug, Clone)]
pub struct HtmlPage {
    controls: NewsControls,
    /// Country shown as selected when the form leaves it unset.
    default_country: String,
    loader: bool,
    toasts: Vec<Toast>,
    results: ResultsContainer,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self {
            controls: NewsControls::default(),
            default_country: DEFAULT_COUNTRY.to_string(),
            loader: false,
            toasts: Vec::new(),
            results: ResultsContainer::new(),
        }
    }
}

impl HtmlPage {
    pub fn new(controls: NewsControls) -> Self {
        Self {
            controls,
            ..Self::default()
        }
    }

    /// Match the default country of the `NewsConfig` driving this page.
    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    pub fn controls(&self) -> &NewsControls {
        &self.controls
    }

    pub fn loader_visible(&self) -> bool {
        self.loader
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn results_container(&self) -> &ResultsContainer {
        &self.results
    }

    pub fn to_document(&self) -> String {
        let mut html = String::new();
        html.push_str(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/css/materialize.min.css">
    <title>News</title>
</head>
<body>
"#,
        );
        if self.loader {
            html.push_str(
                r#"    <div class="progress">
        <div class="indeterminate"></div>
    </div>
"#,
            );
        }
        self.write_form(&mut html);
        for toast in &self.toasts {
            html.push_str(&format!(
                "    <div class=\"toast {}\">{}</div>\n",
                toast.kind.css_class(),
                escape_html(&toast.message)
            ));
        }
        html.push_str(&format!(
            r#"    <div class="container news-container">
        <div class="row">{}</div>
    </div>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/js/materialize.min.js"></script>
    <script>document.addEventListener('DOMContentLoaded', function () {{ M.AutoInit(); }});</script>
</body>
</html>
"#,
            self.results.to_html()
        ));
        html
    }

    fn write_form(&self, html: &mut String) {
        let selected = self
            .controls
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.default_country.as_str());
        html.push_str(
            r#"    <div class="container">
        <form name="newsControls">
            <div class="input-field col s12">
                <select name="country">
"#,
        );
        for (code, label) in COUNTRIES {
            let marker = if *code == selected { " selected" } else { "" };
            html.push_str(&format!(
                "                    <option value=\"{code}\"{marker}>{label}</option>\n"
            ));
        }
        html.push_str(&format!(
            r#"                </select>
            </div>
            <div class="input-field col s12">
                <input type="text" name="search" value="{}" autocomplete="off">
            </div>
            <button class="btn" type="submit">Search</button>
        </form>
    </div>
"#,
            escape_html(&self.controls.search)
        ));
    }
}

impl Page for HtmlPage {
    fn show_loader(&mut self) {
        self.loader = true;
    }

    fn remove_loader(&mut self) {
        self.loader = false;
    }

    fn show_alert(&mut self, message: &str, kind: AlertKind) {
        self.toasts.push(Toast {
            message: message.to_string(),
            kind,
        });
    }

    fn results(&mut self) -> &mut ResultsContainer {
        &mut self.results
    }
}
