use httpmock::prelude::*;
use serde_json::{json, Value};
use serp_status::app::server;
use serp_status::config::toml_config::TomlConfig;
use serp_status::utils::validation::Validate;
use serp_status::{StatusConfig, StatusError};
use std::time::Duration;
use tokio::sync::oneshot;

const SEARCH_PATH: &str = "/api/serp/search";

fn roster_toml(base_urls: &[String], google_urls: &[String], timeout_ms: u64) -> String {
    let list = |urls: &[String]| {
        urls.iter()
            .map(|u| format!("\"{}\"", u))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        r#"
[server]
host = "127.0.0.1"
port = 0

[dispatch]
timeout_ms = {timeout_ms}
default_query = "minecraft"

[[groups]]
name = "base"
provider = "bing"
urls = [{base}]

[[groups]]
name = "google"
provider = "google"
urls = [{google}]
"#,
        base = list(base_urls),
        google = list(google_urls),
    )
}

#[tokio::test]
async fn test_end_to_end_status_report() {
    let bing_ok = MockServer::start();
    let bing_mock = bing_ok.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .header("content-type", "application/json")
            .json_body(json!({"provider": "bing", "query": "minecraft"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"x": 1}));
    });
    let bing_slow = MockServer::start();
    bing_slow.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(200)
            .json_body(json!({"too": "late"}))
            .delay(Duration::from_secs(3));
    });
    let bing_down = MockServer::start();
    bing_down.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(503).body("unavailable");
    });
    let google_ok = MockServer::start();
    let google_mock = google_ok.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .json_body(json!({"provider": "google", "query": "minecraft"}));
        then.status(200).json_body(json!({"hits": []}));
    });

    let config = TomlConfig::from_toml_str(&roster_toml(
        &[bing_ok.base_url(), bing_slow.base_url(), bing_down.base_url()],
        &[google_ok.base_url()],
        300,
    ))
    .unwrap()
    .resolve();
    config.validate().unwrap();

    let listener = server::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = server::build_service(&config).unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server_task = tokio::spawn(server::serve(listener, service, async move {
        let _ = stop_rx.await;
    }));

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();

    bing_mock.assert();
    google_mock.assert();

    assert_eq!(body["message"], "Server statuses");
    assert_eq!(
        body["base"],
        json!({
            "successCount": 1,
            "results": [
                {"server": bing_ok.base_url(), "status": "success", "data": {"x": 1}},
                {"server": bing_slow.base_url(), "status": "error", "error": "Request timed out"},
                {"server": bing_down.base_url(), "status": "error", "error": "HTTP 503"}
            ]
        })
    );
    assert_eq!(
        body["google"],
        json!({
            "successCount": 1,
            "results": [
                {"server": google_ok.base_url(), "status": "success", "data": {"hits": []}}
            ]
        })
    );

    stop_tx.send(()).unwrap();
    server_task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_report_invariants_hold_for_every_group() {
    let servers: Vec<MockServer> = (0..4).map(|_| MockServer::start()).collect();
    for (i, server) in servers.iter().enumerate() {
        server.mock(|when, then| {
            when.method(POST).path(SEARCH_PATH);
            if i % 2 == 0 {
                then.status(200).json_body(json!({"i": i}));
            } else {
                then.status(500);
            }
        });
    }
    let urls: Vec<String> = servers.iter().map(|s| s.base_url()).collect();

    let config = TomlConfig::from_toml_str(&roster_toml(&urls, &urls[..1], 2_000))
        .unwrap()
        .resolve();
    let service = server::build_service(&config).unwrap();

    let response = service.check("minecraft").await;

    for group in &config.groups {
        let report = &response.groups[group.name.as_str()];
        assert_eq!(report.results.len(), group.endpoints.len());
        assert_eq!(
            report.success_count,
            report.results.iter().filter(|o| o.is_success()).count()
        );
        for (outcome, endpoint) in report.results.iter().zip(&group.endpoints) {
            assert_eq!(&outcome.endpoint, endpoint);
            assert!(outcome.payload.is_some() != outcome.error_message.is_some());
        }
    }
    assert_eq!(response.groups["base"].success_count, 2);
    assert_eq!(
        response.groups["base"].results[1].error_message.as_deref(),
        Some("HTTP 500")
    );
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let first = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let taken = first.local_addr().unwrap();

    let config = StatusConfig {
        host: "127.0.0.1".to_string(),
        port: taken.port(),
        ..StatusConfig::default()
    };

    let err = server::bind(&config).await.unwrap_err();
    assert!(matches!(err, StatusError::BindError { .. }));
}
