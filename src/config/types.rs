use serde::Deserialize;

/// Main configuration structure for Quote-Scout
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the values used against the public quotes.toscrape.com site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that every relative link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the first listing page
    #[serde(rename = "start-path")]
    pub start_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com".to_string(),
            start_path: "/page/1".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause after every listing page (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Whole-request timeout; `None` keeps the transport default (no timeout)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 5000,
            request_timeout_secs: None,
        }
    }
}

/// User agent sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla Firefox".to_string(),
        }
    }
}

/// CSS selectors describing the site's markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per quote on a listing page
    pub quote: String,

    /// Quote text, inside a quote element
    pub text: String,

    /// Author name, inside a quote element
    pub author: String,

    /// Anchor whose `href` is the author's bio link, inside a quote element
    #[serde(rename = "bio-link")]
    pub bio_link: String,

    /// Pagination wrapper for the next page
    pub next: String,

    /// Anchor inside the `next` wrapper
    #[serde(rename = "next-link")]
    pub next_link: String,

    /// Birth date on an author page
    #[serde(rename = "born-date")]
    pub born_date: String,

    /// Birth place on an author page
    #[serde(rename = "born-location")]
    pub born_location: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quote: ".quote".to_string(),
            text: ".text".to_string(),
            author: ".author".to_string(),
            bio_link: "a".to_string(),
            next: ".next".to_string(),
            next_link: "a".to_string(),
            born_date: ".author-born-date".to_string(),
            born_location: ".author-born-location".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Config key and selector source for every selector
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("quote", self.quote.as_str()),
            ("text", self.text.as_str()),
            ("author", self.author.as_str()),
            ("bio-link", self.bio_link.as_str()),
            ("next", self.next.as_str()),
            ("next-link", self.next_link.as_str()),
            ("born-date", self.born_date.as_str()),
            ("born-location", self.born_location.as_str()),
        ]
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "quotes.db".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append log output to this file instead of stderr
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_fields_use_config_keys() {
        let selectors = SelectorConfig {
            bio_link: "a.bio".to_string(),
            ..SelectorConfig::default()
        };
        let fields = selectors.fields();

        assert_eq!(fields[0], ("quote", ".quote"));
        assert_eq!(fields[3], ("bio-link", "a.bio"));
        assert_eq!(fields[7], ("born-location", ".author-born-location"));
    }
}
