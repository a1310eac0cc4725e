//! Article fetching
//!
//! This module defines the [`ArticleSource`] capability the traversal engine
//! consumes, and its HTTP implementation against the MediaWiki parse API:
//! - Building the HTTP client with a proper user agent string and timeouts
//! - Requesting the rendered HTML of one article
//! - Classifying API "missing page" answers as `NotFound`

use crate::article::ArticleId;
use crate::config::{SourceConfig, UserAgentConfig};
use crate::{ConfigError, LexiconError, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Something that can hand out the raw markup of an article
///
/// Implementations own their own timeouts; the traversal engine never
/// bounds a fetch itself.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetches the raw markup of `id`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The article markup
    /// * `Err(SourceError::NotFound)` - The source reports no such article
    /// * `Err(SourceError)` - Any other failure
    async fn fetch(&self, id: &ArticleId) -> Result<String, SourceError>;
}

/// Shape of a `action=parse` answer; exactly one of the fields is present
#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedArticle>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedArticle {
    text: ParsedText,
}

#[derive(Debug, Deserialize)]
struct ParsedText {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

/// Formats the user agent string: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `source` - Timeouts for the article requests
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use wiki_lexicon::config::{SourceConfig, UserAgentConfig};
/// use wiki_lexicon::crawler::build_http_client;
///
/// let client = build_http_client(&SourceConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    source: &SourceConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(source.request_timeout_secs))
        .connect_timeout(Duration::from_secs(source.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Article source backed by a MediaWiki `api.php` endpoint
#[derive(Debug, Clone)]
pub struct MediaWikiSource {
    client: Client,
    api_url: Url,
}

impl MediaWikiSource {
    /// Creates a source from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(MediaWikiSource)` - Ready to fetch
    /// * `Err(LexiconError)` - Invalid API URL or HTTP client setup failure
    pub fn new(
        source: &SourceConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, LexiconError> {
        let api_url = Url::parse(&source.api_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid api-url '{}': {}", source.api_url, e))
        })?;
        let client = build_http_client(source, user_agent)?;
        Ok(Self::with_client(client, api_url))
    }

    /// Creates a source around an existing client
    pub fn with_client(client: Client, api_url: Url) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl ArticleSource for MediaWikiSource {
    async fn fetch(&self, id: &ArticleId) -> Result<String, SourceError> {
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("action", "parse"),
                ("page", id.as_str()),
                ("format", "json"),
                ("prop", "text"),
                ("redirects", "1"),
            ])
            .send()
            .await
            .map_err(|source| SourceError::Http {
                id: id.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ParseResponse = response.json().await.map_err(|e| {
            SourceError::UnexpectedResponse {
                id: id.to_string(),
                message: e.to_string(),
            }
        })?;

        match body {
            ParseResponse {
                error: Some(error), ..
            } => {
                tracing::debug!("API error for {}: {} ({})", id, error.info, error.code);
                Err(SourceError::NotFound {
                    id: id.to_string(),
                    info: error.info,
                })
            }
            ParseResponse {
                parse: Some(parsed),
                ..
            } => Ok(parsed.text.html),
            _ => Err(SourceError::UnexpectedResponse {
                id: id.to_string(),
                message: "response has neither 'parse' nor 'error'".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn source_for(server: &MockServer) -> MediaWikiSource {
        let source = SourceConfig {
            api_url: format!("{}/w/api.php", server.uri()),
            ..SourceConfig::default()
        };
        MediaWikiSource::new(&source, &create_test_config()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&SourceConfig::default(), &create_test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_api_url_is_config_error() {
        let source = SourceConfig {
            api_url: "not a url".to_string(),
            ..SourceConfig::default()
        };
        let err = MediaWikiSource::new(&source, &create_test_config()).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::Config(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_user_agent_format() {
        assert_eq!(
            user_agent_string(&create_test_config()),
            "TestCrawler/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_parsed_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "parse"))
            .and(query_param("page", "Graph_theory"))
            .and(query_param("prop", "text"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "parse": {
                    "title": "Graph theory",
                    "text": { "*": "<div class=\"mw-parser-output\"><p>Graphs</p></div>" }
                }
            })))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let id = ArticleId::new("Graph theory").unwrap();
        let html = source.fetch(&id).await.unwrap();
        assert!(html.contains("Graphs"));
    }

    #[tokio::test]
    async fn test_api_error_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": {
                    "code": "missingtitle",
                    "info": "The page you specified doesn't exist."
                }
            })))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let id = ArticleId::new("No such page").unwrap();
        let err = source.fetch(&id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("doesn't exist"));
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let id = ArticleId::new("Anything").unwrap();
        let err = source.fetch(&id).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_garbage_body_is_unexpected_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let id = ArticleId::new("Anything").unwrap();
        let err = source.fetch(&id).await.unwrap_err();
        assert!(matches!(err, SourceError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_json_without_parse_or_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let id = ArticleId::new("Anything").unwrap();
        let err = source.fetch(&id).await.unwrap_err();
        assert!(matches!(err, SourceError::UnexpectedResponse { .. }));
    }
}
