//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for a MediaWiki `api.php` endpoint
//! and run the full fetch, extract, traverse and aggregate cycle end-to-end.

use serde_json::json;
use wiki_lexicon::config::{Config, SourceConfig};
use wiki_lexicon::crawler::build_crawler;
use wiki_lexicon::service::{KeywordsRequest, ProfileService};
use wiki_lexicon::{ArticleId, LexiconError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    Config {
        source: SourceConfig {
            api_url: format!("{}/w/api.php", server.uri()),
            request_timeout_secs: 5,
            connect_timeout_secs: 5,
        },
        ..Config::default()
    }
}

/// Renders an article the way the parse API wraps it
fn article_html(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<li><a href="/wiki/{}">{}</a></li>"#, l, l.to_lowercase()))
        .collect();
    format!(
        r#"<div class="mw-parser-output"><p>{}<sup class="reference">[1]</sup></p>
        <table class="infobox"><tr><td>infobox noise</td></tr></table>
        <ul>{}</ul>
        <p><a href="/wiki/File:Logo.svg">logo</a>
        <a href="https://example.org/">elsewhere</a></p></div>"#,
        text, anchors
    )
}

async fn mount_article(server: &MockServer, title: &str, text: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "parse"))
        .and(query_param("page", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parse": {
                "title": title.replace('_', " "),
                "text": { "*": article_html(text, links) }
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_missing(server: &MockServer, title: &str) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("page", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {
                "code": "missingtitle",
                "info": "The page you specified doesn't exist."
            }
        })))
        .mount(server)
        .await;
}

/// Graph_theory -> Vertex, Edge, Missing_page
/// Vertex -> Graph_theory, Edge
/// Edge -> Vertex
async fn mount_graph_wiki(server: &MockServer) {
    mount_article(
        server,
        "Graph_theory",
        "Graph theory studies graphs made of vertices and edges",
        &["Vertex", "Edge", "Missing_page"],
    )
    .await;
    mount_article(
        server,
        "Vertex",
        "A vertex is a point where edges meet",
        &["Graph_theory", "Edge"],
    )
    .await;
    mount_article(server, "Edge", "An edge joins two vertices", &["Vertex"]).await;
    mount_missing(server, "Missing_page").await;
}

#[tokio::test]
async fn test_full_crawl_visits_each_article_once() {
    let server = MockServer::start().await;
    mount_graph_wiki(&server).await;

    let crawler = build_crawler(&create_test_config(&server)).expect("crawler builds");
    let start = ArticleId::new("Graph theory").unwrap();
    let result = crawler.traverse(&start, 2).await.expect("crawl succeeds");

    let mut visited: Vec<String> = result.keys().map(|k| k.to_string()).collect();
    visited.sort();
    assert_eq!(visited, vec!["Edge", "Graph_theory", "Vertex"]);

    // prose only: no citation markers, infobox text, or link-only namespaces
    let words = &result[&start];
    assert!(words.contains(&"graphs".to_string()));
    assert!(!words.contains(&"infobox".to_string()));
    assert!(!words.contains(&"noise".to_string()));

    // each mounted article expects exactly one request; verified on drop
}

#[tokio::test]
async fn test_depth_zero_fetches_only_start() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("page", "Edge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parse": { "text": { "*": article_html("An edge joins two vertices", &["Vertex"]) } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = build_crawler(&create_test_config(&server)).unwrap();
    let result = crawler
        .traverse(&ArticleId::new("Edge").unwrap(), 0)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_word_frequency_end_to_end() {
    let server = MockServer::start().await;
    mount_graph_wiki(&server).await;

    let service = ProfileService::from_config(&create_test_config(&server)).unwrap();
    let profile = service.word_frequency("Graph theory", 1).await.unwrap();

    // "edges" appears in Graph_theory and Vertex, "vertices" in Graph_theory and Edge
    assert_eq!(profile.word_count["edges"], 2);
    assert_eq!(profile.word_count["vertices"], 2);
    let sum: f64 = profile.word_frequency.values().sum();
    assert!((sum - 100.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_keywords_end_to_end() {
    let server = MockServer::start().await;
    mount_graph_wiki(&server).await;

    let service = ProfileService::from_config(&create_test_config(&server)).unwrap();
    let request = KeywordsRequest {
        article: "Graph_theory".to_string(),
        depth: 2,
        ignore_list: Some(vec!["A".to_string(), "an".to_string(), "OF".to_string()]),
        percentile: Some(75),
    };
    let profile = service.keywords(&request).await.unwrap();

    for ignored in ["a", "an", "of"] {
        assert!(!profile.word_count.contains_key(ignored));
    }
    assert!(profile.word_count.contains_key("edges"));
    assert!(!profile.word_count.contains_key("point"));
}

#[tokio::test]
async fn test_missing_start_article_is_not_found() {
    let server = MockServer::start().await;
    mount_missing(&server, "Nowhere").await;

    let service = ProfileService::from_config(&create_test_config(&server)).unwrap();
    let err = service.word_frequency("Nowhere", 2).await.unwrap_err();

    assert!(matches!(err, LexiconError::ArticleNotFound(_)));
}

#[tokio::test]
async fn test_unavailable_source_is_a_failure_not_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = ProfileService::from_config(&create_test_config(&server)).unwrap();
    let err = service.word_frequency("Graph theory", 1).await.unwrap_err();

    assert!(matches!(err, LexiconError::Source(_)));
}
