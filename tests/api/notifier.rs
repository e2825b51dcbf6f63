use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::Secret;

use url::Url;

use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use flight_monitor::client::EmailClient;
use flight_monitor::notify::{EmailTemplate, Notifier, NotifySummary};
use flight_monitor::quote::MockPriceLookup;
use flight_monitor::repo::{FileStorage, MonitorRepo};
use flight_monitor::settings::{Runtime, Settings};

use crate::helpers::{stored_record, temp_dir};

async fn notifier(email_server: &MockServer, api_key: Option<&str>) -> Notifier {
    let settings_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("settings");
    let settings =
        Settings::load_from(Runtime::Dev, &settings_dir).expect("Failed to load settings");

    let repo = MonitorRepo::new(Arc::new(FileStorage::new(
        temp_dir().join("monitors.json"),
    )));
    for (email, active) in [
        ("a@test.com", true),
        ("b@test.com", false),
        ("c@test.com", true),
    ] {
        repo.append(stored_record("SYD", "AKL", email, active)).await;
    }

    let email_client = EmailClient::new(
        "Flight Monitor <test@test.com>",
        Duration::from_secs(2),
        Url::parse(&email_server.uri()).expect("Failed to parse mock server uri"),
        api_key.map(|key| Secret::new(key.to_string())),
    )
    .expect("Failed to create email client");

    Notifier::new(
        repo,
        Arc::new(MockPriceLookup::new(settings.quote.clone())),
        Arc::new(email_client),
        EmailTemplate::new(settings.city_names(), &settings.notifier),
        Duration::from_millis(10),
    )
}

#[tokio::test]
async fn active_monitors_are_emailed() {
    let email_server = MockServer::start().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header("Authorization", "Bearer TestKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "m" })))
        .expect(2)
        .mount(&email_server)
        .await;

    let summary = notifier(&email_server, Some("TestKey")).await.run().await;

    assert_eq!(
        NotifySummary {
            total: 3,
            skipped: 1,
            succeeded: 2,
            failed: 0,
        },
        summary
    );

    let requests = email_server.received_requests().await.unwrap();
    let recipients: Vec<String> = requests
        .iter()
        .map(|req| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["to"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(vec!["a@test.com", "c@test.com"], recipients);
}

#[tokio::test]
async fn email_contains_route_and_search_link() {
    let email_server = MockServer::start().await;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&email_server)
        .await;

    notifier(&email_server, Some("TestKey")).await.run().await;

    let request = &email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();

    assert!(body["subject"]
        .as_str()
        .unwrap()
        .contains("Sydney → Auckland"));

    let links: Vec<_> = linkify::LinkFinder::new()
        .links(body["text"].as_str().unwrap())
        .filter(|l| *l.kind() == linkify::LinkKind::Url)
        .map(|l| l.as_str().to_string())
        .collect();
    assert!(links
        .iter()
        .any(|link| link.starts_with("https://www.google.com/travel/flights?q=flights+Sydney+to+Auckland")));
}

#[tokio::test]
async fn provider_failures_are_counted_and_do_not_stop_the_batch() {
    let email_server = MockServer::start().await;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&email_server)
        .await;

    let summary = notifier(&email_server, Some("TestKey")).await.run().await;

    assert_eq!(2, summary.attempted());
    assert_eq!(2, summary.failed);
    assert_eq!(0, summary.succeeded);
}

#[tokio::test]
async fn without_api_key_sends_are_simulated() {
    let email_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&email_server)
        .await;

    let summary = notifier(&email_server, None).await.run().await;

    assert_eq!(2, summary.succeeded);
    assert_eq!(0, summary.failed);
}
