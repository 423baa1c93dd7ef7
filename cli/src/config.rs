//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use news_core::news::{DEFAULT_BASE_URL, DEFAULT_CATEGORY, DEFAULT_COUNTRY};
use news_core::{NewsConfig, NewsControls};

#[derive(Debug, Parser)]
#[command(name = "news")]
#[command(about = "Fetch technology headlines or search news and render them as HTML", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Country code for top headlines
    #[arg(short, long, env = "NEWS_COUNTRY", default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Free-text search; takes precedence over the country when non-empty
    #[arg(short, long, env = "NEWS_SEARCH", default_value = "")]
    pub search: String,

    /// API root
    #[arg(long, env = "NEWS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// API key sent with every request
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Category used for top headlines
    #[arg(long, env = "NEWS_CATEGORY", default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Overall request timeout in seconds, 0 to disable
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write the page here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl Cli {
    pub fn news_config(&self) -> NewsConfig {
        NewsConfig::new(&self.api_url, &self.api_key).with_category(&self.category)
    }

    pub fn controls(&self) -> NewsControls {
        NewsControls::new(Some(self.country.clone()), self.search.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_core::Query;

    #[test]
    fn defaults_match_the_page() {
        let cli = Cli::try_parse_from(["news", "--api-key", "k"]).unwrap();
        assert_eq!(cli.country, "ua");
        assert_eq!(cli.search, "");
        assert_eq!(cli.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            cli.controls().query(DEFAULT_COUNTRY),
            Query::TopHeadlines {
                country: "ua".to_string()
            }
        );

        let config = cli.news_config();
        assert_eq!(config.base_url, "https://newsapi.org/v2");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.category, "technology");
    }

    #[test]
    fn search_flag_selects_everything() {
        let cli = Cli::try_parse_from(["news", "--api-key", "k", "-c", "us", "-s", "bitcoin"]).unwrap();
        assert_eq!(
            cli.controls().query(DEFAULT_COUNTRY),
            Query::Everything {
                q: "bitcoin".to_string()
            }
        );
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cli = Cli::try_parse_from(["news", "--api-key", "k", "--timeout-secs", "0"]).unwrap();
        assert_eq!(cli.timeout(), None);
    }
}
