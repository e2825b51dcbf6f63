use reqwest::{Method, StatusCode};

use serde_json::json;

use crate::helpers::{stored_record, NewMonitor, TestApp};

async fn create_monitor(app: &TestApp, new_monitor: &NewMonitor) -> String {
    let res = app
        .monitor_create(new_monitor)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::CREATED, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    body["id"]
        .as_str()
        .expect("Response is missing the new id")
        .to_string()
}

#[tokio::test]
async fn create_returns_created_for_valid_request() {
    let app = TestApp::spawn().await;

    let res = app
        .monitor_create(&NewMonitor::route("syd", "akl"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert_eq!(true, body["success"]);

    let stored = app.stored_monitors().await;
    assert_eq!(1, stored.len());

    let monitor = &stored[0];
    assert_eq!(body["id"], monitor.id.as_str());
    assert_eq!("SYD", monitor.from);
    assert_eq!("AKL", monitor.to);
    assert_eq!(28, monitor.days_min);
    assert_eq!(38, monitor.days_max);
    assert_eq!("test@test.com", monitor.email);
    assert_eq!("10", monitor.notify_time);
    assert!(monitor.active);
}

#[tokio::test]
async fn create_assigns_unique_ids() {
    let app = TestApp::spawn().await;

    let first = create_monitor(&app, &NewMonitor::route("SYD", "AKL")).await;
    let second = create_monitor(&app, &NewMonitor::route("SYD", "AKL")).await;

    assert_ne!(first, second);
    assert_eq!(2, app.stored_monitors().await.len());
}

#[tokio::test]
async fn create_keeps_explicit_day_bounds() {
    let app = TestApp::spawn().await;

    let new_monitor = NewMonitor {
        days_min: Some(json!(14)),
        days_max: Some(json!("21")),
        ..NewMonitor::route("PEK", "LHR")
    };
    create_monitor(&app, &new_monitor).await;

    let stored = app.stored_monitors().await;
    assert_eq!((14, 21), (stored[0].days_min, stored[0].days_max));
}

#[tokio::test]
async fn create_returns_bad_request_for_invalid_data() {
    let app = TestApp::spawn().await;

    let test_cases: Vec<(&str, NewMonitor)> = vec![
        (
            "missing email",
            NewMonitor {
                email: None,
                ..NewMonitor::route("SYD", "AKL")
            },
        ),
        (
            "missing origin",
            NewMonitor {
                from: None,
                ..NewMonitor::route("SYD", "AKL")
            },
        ),
        (
            "missing destination",
            NewMonitor {
                to: None,
                ..NewMonitor::route("SYD", "AKL")
            },
        ),
        ("same origin and destination", NewMonitor::route("SYD", "SYD")),
        (
            "same origin and destination ignoring case",
            NewMonitor::route("syd", "SYD"),
        ),
        (
            "day range too wide",
            NewMonitor {
                days_min: Some(json!(20)),
                days_max: Some(json!(31)),
                ..NewMonitor::route("SYD", "AKL")
            },
        ),
        (
            "day range too wide against default maximum",
            NewMonitor {
                days_min: Some(json!(7)),
                ..NewMonitor::route("SYD", "AKL")
            },
        ),
    ];

    for (desc, new_monitor) in test_cases {
        let res = app
            .monitor_create(&new_monitor)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );

        let body: serde_json::Value = res.json().await.expect("Failed to parse body");
        assert_eq!(false, body["success"], "{}", desc);
        assert!(body["message"].is_string(), "{}", desc);
    }

    assert!(app.stored_monitors().await.is_empty());
}

#[tokio::test]
async fn create_rejects_same_route_with_message() {
    let app = TestApp::spawn().await;

    let res = app
        .monitor_create(&NewMonitor::route("SYD", "SYD"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert_eq!("Origin and destination cannot be the same", body["message"]);
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/monitor")
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    assert!(app.stored_monitors().await.is_empty());
}

#[tokio::test]
async fn create_accepts_json_without_content_type() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/monitor")
        .body(r#"{"from":"syd","to":"akl","email":"a@b.com"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    assert_eq!(1, app.stored_monitors().await.len());
}

#[tokio::test]
async fn create_without_content_type_is_still_validated() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/monitor")
        .header("Content-Type", "text/plain")
        .body(r#"{"from":"SYD","to":"syd","email":"a@b.com"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert_eq!("Origin and destination cannot be the same", body["message"]);
}

#[tokio::test]
async fn create_keeps_monitors_stored_by_older_clients() {
    let app = TestApp::spawn().await;
    app.stored_monitors().await;
    std::fs::write(
        app.storage.path(),
        r#"[{"id":"legacy","from":"PEK","to":"LHR","email":"old@test.com"}]"#,
    )
    .expect("Failed to seed store");

    create_monitor(&app, &NewMonitor::route("syd", "akl")).await;

    let stored = app.stored_monitors().await;
    assert_eq!(2, stored.len());
    assert_eq!("legacy", stored[0].id);
    assert!(!stored[0].active);
}

#[tokio::test]
async fn list_returns_created_monitors() {
    let app = TestApp::spawn().await;

    let id = create_monitor(&app, &NewMonitor::route("syd", "akl")).await;

    let res = app.monitor_list().await.expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    let monitors = body["monitors"].as_array().expect("Missing monitor list");

    assert_eq!(1, monitors.len());
    assert_eq!(id, monitors[0]["id"]);
    assert_eq!("SYD", monitors[0]["from"]);
    assert_eq!("AKL", monitors[0]["to"]);
    assert_eq!(true, monitors[0]["active"]);
}

#[tokio::test]
async fn list_filters_inactive_monitors() {
    let app = TestApp::spawn().await;

    app.store(stored_record("SYD", "AKL", "a@test.com", true))
        .await;
    app.store(stored_record("PEK", "LHR", "b@test.com", false))
        .await;

    let res = app.monitor_list().await.expect("Failed to execute request");
    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    let monitors = body["monitors"].as_array().expect("Missing monitor list");

    assert_eq!(1, monitors.len());
    assert_eq!("a@test.com", monitors[0]["email"]);
}

#[tokio::test]
async fn delete_removes_the_monitor() {
    let app = TestApp::spawn().await;

    let keep = create_monitor(&app, &NewMonitor::route("SYD", "AKL")).await;
    let drop = create_monitor(&app, &NewMonitor::route("PEK", "LHR")).await;

    let res = app
        .monitor_delete(&drop)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let ids: Vec<String> = app
        .stored_monitors()
        .await
        .into_iter()
        .map(|monitor| monitor.id)
        .collect();
    assert_eq!(vec![keep], ids);
}

#[tokio::test]
async fn delete_removes_inactive_monitors() {
    let app = TestApp::spawn().await;

    let inactive = stored_record("SYD", "AKL", "a@test.com", false);
    let id = inactive.id.clone();
    app.store(inactive).await;

    let res = app
        .monitor_delete(&id)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert!(app.stored_monitors().await.is_empty());
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;

    create_monitor(&app, &NewMonitor::route("SYD", "AKL")).await;
    let before = app.stored_monitors().await;

    let res = app
        .monitor_delete("does-not-exist")
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    let body: serde_json::Value = res.json().await.expect("Failed to parse body");
    assert_eq!(false, body["success"]);
    assert_eq!(before, app.stored_monitors().await);
}
