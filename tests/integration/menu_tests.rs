//! Integration tests for menu discovery
//!
//! These tests use wiremock to serve restaurant home pages and a scripted
//! content service to stand in for the generative model.

use async_trait::async_trait;
use menu_scout::config::Config;
use menu_scout::crawler::{Coordinator, EXTRACTION_PROMPT, RELEVANCE_PROMPT};
use menu_scout::service::{ContentRequest, ContentService, ServiceError};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// How the scripted service treats one document
enum Script {
    Menu(&'static str),
    NoMenu,
    Fails,
}

/// Content service that answers from a per-path script and records every call
struct ScriptedService {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<ContentRequest>>,
    delay_seed: Option<u64>,
}

impl ScriptedService {
    fn new(scripts: Vec<(&str, Script)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(p, s)| (p.to_string(), s))
                .collect(),
            calls: Mutex::new(Vec::new()),
            delay_seed: None,
        }
    }

    /// Delays every call by a pseudo-random amount derived from `seed`
    fn with_random_delays(mut self, seed: u64) -> Self {
        self.delay_seed = Some(seed);
        self
    }

    fn calls(&self) -> Vec<ContentRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_for(&self, uri_suffix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.document_uri.ends_with(uri_suffix))
            .count()
    }
}

#[async_trait]
impl ContentService for ScriptedService {
    async fn generate(&self, request: ContentRequest) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(seed) = self.delay_seed {
            let mut hasher = DefaultHasher::new();
            (seed, &request.document_uri, &request.prompt).hash(&mut hasher);
            tokio::time::sleep(Duration::from_millis(hasher.finish() % 40)).await;
        }

        let doc_path = url::Url::parse(&request.document_uri)
            .map(|u| u.path().to_string())
            .unwrap_or_default();

        match self.scripts.get(&doc_path) {
            Some(Script::Menu(menu)) if request.prompt == EXTRACTION_PROMPT => {
                Ok(menu.to_string())
            }
            Some(Script::Menu(_)) => Ok("Yes".to_string()),
            Some(Script::NoMenu) | None => Ok("no".to_string()),
            Some(Script::Fails) => Err(ServiceError::Api {
                status: 400,
                message: "Cannot fetch content from the provided URL".to_string(),
            }),
        }
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.max_concurrent_classifications = 4;
    config.crawler.fetch_timeout_secs = 5;
    config.crawler.classify_timeout_secs = 5;
    config
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

/// Home page with three same-host links (A, B, C) and one cross-domain link (D)
fn scenario_home(base_url: &str) -> String {
    format!(
        r#"<html><head><title>Trattoria</title></head><body>
        <nav>
            <a href="/menu">Menu</a>
            <a href="{}/about">About us</a>
            <a href="files/closed.pdf">Holiday hours</a>
            <a href="https://delivery.example/menu">Order online</a>
        </nav>
        </body></html>"#,
        base_url
    )
}

fn scenario_service() -> ScriptedService {
    ScriptedService::new(vec![
        ("/menu", Script::Menu("Pizza $10")),
        ("/about", Script::NoMenu),
        ("/files/closed.pdf", Script::Fails),
    ])
}

#[tokio::test]
async fn test_three_link_scenario() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(&server, "/", scenario_home(&base_url)).await;

    // Internal pages are handed to the content service, never scanned for more links
    Mock::given(method("GET"))
        .and(path("/menu"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/secret-specials">Secret specials</a>"#,
        ))
        .expect(0)
        .mount(&server)
        .await;

    let service = Arc::new(scenario_service());
    let coordinator = Coordinator::new(&test_config(), service.clone()).unwrap();
    let report = coordinator.discover_menu(&format!("{}/", base_url)).await;

    assert!(!report.is_unreachable());
    assert_eq!(report.text(), "Pizza $10");
    assert_eq!(report.source_urls(), [format!("{}/menu", base_url)]);
    assert_eq!(
        report.to_string(),
        format!("Pizza $10\n{}/menu", base_url)
    );

    // A: relevance + extraction, B: relevance only, C: failed relevance only
    assert_eq!(service.calls_for("/menu"), 2);
    assert_eq!(service.calls_for("/about"), 1);
    assert_eq!(service.calls_for("/files/closed.pdf"), 1);
    assert_eq!(service.calls().len(), 4);

    // D never reaches the service, nor do links found on internal pages
    assert!(service
        .calls()
        .iter()
        .all(|c| !c.document_uri.contains("delivery.example")));
    assert_eq!(service.calls_for("/secret-specials"), 0);
}

#[tokio::test]
async fn test_scenario_declares_content_kinds() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(&server, "/", scenario_home(&base_url)).await;

    let service = Arc::new(scenario_service());
    let coordinator = Coordinator::new(&test_config(), service.clone()).unwrap();
    coordinator.discover_menu(&format!("{}/", base_url)).await;

    for call in service.calls() {
        let expected = if call.document_uri.ends_with(".pdf") {
            "application/pdf"
        } else {
            "text/plain"
        };
        assert_eq!(call.mime_type, expected, "for {}", call.document_uri);
    }

    let extraction_calls: Vec<_> = service
        .calls()
        .into_iter()
        .filter(|c| c.prompt == EXTRACTION_PROMPT)
        .collect();
    assert_eq!(extraction_calls.len(), 1);
    assert_eq!(extraction_calls[0].document_uri, format!("{}/menu", base_url));
}

#[tokio::test]
async fn test_root_fetch_failure_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let service = Arc::new(scenario_service());
    let coordinator = Coordinator::new(&test_config(), service.clone()).unwrap();
    let root = format!("{}/", server.uri());
    let report = coordinator.discover_menu(&root).await;

    assert!(report.is_unreachable());
    assert!(report.text().contains(&root));
    assert!(report.text().contains("404"));
    assert!(!report.text().contains("Pizza"));
    assert!(report.source_urls().is_empty());
    assert_eq!(
        report.to_string(),
        format!("An error occurred while fetching {}: HTTP status 404", root)
    );
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_terminal() {
    let service = Arc::new(scenario_service());
    let coordinator = Coordinator::new(&test_config(), service.clone()).unwrap();
    let report = coordinator.discover_menu("http://127.0.0.1:1/").await;

    assert!(report.is_unreachable());
    assert!(report
        .text()
        .starts_with("An error occurred while fetching http://127.0.0.1:1/: "));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_random_completion_order_yields_same_contributions() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(
        &server,
        "/",
        format!(
            r#"<a href="/lunch">Lunch</a>
               <a href="/dinner.pdf">Dinner</a>
               <a href="/drinks.png">Drinks</a>
               <a href="/about">About</a>
               <a href="/gone">Gone</a>
               <a href="https://other.example/menu">Elsewhere</a>
               <a href="{}/lunch">Lunch again</a>"#,
            base_url
        ),
    )
    .await;

    let menus = ["Soup $5;", "Steak $30;", "Wine $9;"];
    let mut expected_urls = vec![
        format!("{}/dinner.pdf", base_url),
        format!("{}/drinks.png", base_url),
        format!("{}/lunch", base_url),
    ];
    expected_urls.sort();

    for seed in 0..8 {
        let service = Arc::new(
            ScriptedService::new(vec![
                ("/lunch", Script::Menu(menus[0])),
                ("/dinner.pdf", Script::Menu(menus[1])),
                ("/drinks.png", Script::Menu(menus[2])),
                ("/about", Script::NoMenu),
                ("/gone", Script::Fails),
            ])
            .with_random_delays(seed),
        );

        let coordinator = Coordinator::new(&test_config(), service).unwrap();
        let report = coordinator.discover_menu(&format!("{}/", base_url)).await;

        let mut urls = report.source_urls().to_vec();
        urls.sort();
        assert_eq!(urls, expected_urls, "seed {}", seed);

        let text = report.text();
        assert_eq!(
            text.len(),
            menus.iter().map(|m| m.len()).sum::<usize>(),
            "seed {}",
            seed
        );
        for menu in menus {
            assert_eq!(text.matches(menu).count(), 1, "seed {}", seed);
        }
    }
}

#[tokio::test]
async fn test_serial_pool_still_visits_every_link() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_page(&server, "/", scenario_home(&base_url)).await;

    let mut config = test_config();
    config.crawler.max_concurrent_classifications = 1;

    let service = Arc::new(scenario_service());
    let coordinator = Coordinator::new(&config, service.clone()).unwrap();
    let report = coordinator.discover_menu(&format!("{}/", base_url)).await;

    assert_eq!(report.text(), "Pizza $10");
    assert_eq!(
        service
            .calls()
            .iter()
            .filter(|c| c.prompt == RELEVANCE_PROMPT)
            .count(),
        3
    );
}

#[tokio::test]
async fn test_redirected_root_resolves_links_against_requested_url() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let home = format!("{}/home/", base_url);
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", home.as_str()))
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/home/",
        r#"<a href="/menu">Menu</a><a href="specials">Specials</a>"#.to_string(),
    )
    .await;

    let service = Arc::new(ScriptedService::new(vec![
        ("/menu", Script::Menu("Pizza $10")),
        ("/specials", Script::Menu("Tiramisu $7")),
    ]));
    let coordinator = Coordinator::new(&test_config(), service.clone()).unwrap();
    let report = coordinator.discover_menu(&format!("{}/", base_url)).await;

    let mut urls = report.source_urls().to_vec();
    urls.sort();
    assert_eq!(
        urls,
        vec![format!("{}/menu", base_url), format!("{}/specials", base_url)]
    );
}
