mod common;

use common::TestApp;
use reqwest::Client;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let before = chrono::Local::now();
    let response = client
        .get(&format!("{}/health/", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let after = chrono::Local::now();

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "API is running successfully");

    let timestamp = chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap())
        .expect("timestamp is not ISO-8601");
    assert!(timestamp >= before - chrono::Duration::milliseconds(1));
    assert!(timestamp <= after);
}

#[tokio::test]
async fn health_check_without_trailing_slash() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(&format!("{}/health/", app.address))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn calculate_over_http() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .post(&format!("{}/calculate/", app.address))
        .json(&serde_json::json!({ "num1": 10, "num2": 5, "operation": "add" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(
        body,
        r#"{"num1":10.0,"num2":5.0,"operation":"add","result":15.0}"#
    );
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to read body");
    assert!(!body.contains("not initialized"), "recorder missing:\n{body}");
    // The readiness poll in `TestApp::spawn` has already been counted.
    assert!(body.contains("http_requests_total{"), "no request counter:\n{body}");
}

fn metric_line<'a>(body: &'a str, name: &str, labels: &[&str]) -> Option<&'a str> {
    body.lines().find(|line| {
        line.starts_with(&format!("{}{{", name)) && labels.iter().all(|l| line.contains(l))
    })
}

#[tokio::test]
async fn calculations_are_counted_by_operation_and_outcome() {
    let app = TestApp::spawn().await;
    let client = Client::new();
    let url = format!("{}/calculate/", app.address);

    let ok = client
        .post(&url)
        .json(&serde_json::json!({"num1": 1, "num2": 2, "operation": "add"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(ok.status().as_u16(), 200);

    let failed = client
        .post(&url)
        .json(&serde_json::json!({"num1": 1, "num2": 0, "operation": "divide"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(failed.status().as_u16(), 400);

    let body = client
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(
        metric_line(&body, "calculations_total", &[r#"operation="add""#, r#"outcome="ok""#]).is_some(),
        "missing successful calculation:\n{body}"
    );
    assert!(
        metric_line(&body, "calculations_total", &[r#"outcome="division_by_zero""#]).is_some(),
        "missing failed calculation:\n{body}"
    );
    assert!(
        metric_line(
            &body,
            "http_requests_total",
            &[r#"path="/calculate/""#, r#"method="POST""#, r#"status="200""#]
        )
        .is_some(),
        "missing route counter:\n{body}"
    );
}
