//! End-to-end tests: SDK client → proxy → mock upstream store.

mod common;

use common::{employee_json, proxy_config, staff, start_mock_upstream, start_proxy};
use employee_sdk::{ClientError, EmployeeInput, EmployeeProxyClient};
use reqwest::StatusCode;
use std::time::Duration;

#[tokio::test]
async fn test_read_endpoints() {
    let upstream = start_mock_upstream(staff()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    let all = client.list().await.unwrap();
    assert_eq!(all.len(), 3);

    let found = client.search("coleman").await.unwrap();
    let names: Vec<_> = found.iter().filter_map(|e| e.employee_name.clone()).collect();
    assert_eq!(names, vec!["Coleman Feest", "John Coleman"]);

    assert_eq!(client.highest_salary().await.unwrap(), 95000);
    assert_eq!(
        client.top_ten_earning_names().await.unwrap(),
        vec!["John Coleman", "Mel Howell", "Coleman Feest"]
    );

    let one = client.get(&all[1].id).await.unwrap();
    assert_eq!(one, all[1]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_query_with_reserved_characters() {
    let upstream = start_mock_upstream(vec![employee_json("R&D / Ops?", 70000)]).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    let found = client.search("d / ops?").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(client.search("x#y").await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_create_then_delete() {
    let upstream = start_mock_upstream(staff()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    let created = client
        .create(&EmployeeInput {
            name: "Ada Lovelace".to_string(),
            salary: 120000,
            age: 36,
            title: "Analyst".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.employee_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(client.highest_salary().await.unwrap(), 120000);

    let deleted = client.delete(&created.id).await.unwrap();
    assert_eq!(deleted, "Ada Lovelace");
    assert_eq!(client.list().await.unwrap().len(), 3);

    let err = client.get(&created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_input_rejected_before_upstream() {
    let upstream = start_mock_upstream(Vec::new()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    let err = client
        .create(&EmployeeInput {
            name: " ".to_string(),
            salary: 0,
            age: 90,
            title: "Intern".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(upstream.calls(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_employee_is_not_found() {
    let upstream = start_mock_upstream(staff()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    let missing = "00000000-0000-0000-0000-000000000000";
    match client.get(missing).await.unwrap_err() {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Employee not found");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = client.delete(missing).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(upstream.state.delete_bodies.lock().unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_rate_limited_calls_are_retried() {
    let upstream = start_mock_upstream(staff()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    upstream.rate_limit_next(3);
    assert_eq!(client.list().await.unwrap().len(), 3);
    assert_eq!(upstream.calls(), 4);

    shutdown.trigger();
}

#[tokio::test]
async fn test_exhausted_retries_pass_429_through() {
    let upstream = start_mock_upstream(staff()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    upstream.rate_limit_next(100);
    match client.highest_salary().await.unwrap_err() {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(message, "429 Too Many Requests");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(upstream.calls(), 5);

    shutdown.trigger();
}

#[tokio::test]
async fn test_retry_disabled_for_operation() {
    let upstream = start_mock_upstream(vec![employee_json("Mel Howell", 85000)]).await;
    let mut config = proxy_config(&upstream);
    config.retries.operations.list = false;
    let (base_url, shutdown) = start_proxy(config).await;
    let client = EmployeeProxyClient::new(&base_url);

    upstream.rate_limit_next(1);
    let err = client.list().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    assert_eq!(upstream.calls(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let upstream = start_mock_upstream(staff()).await;
    let (base_url, shutdown) = start_proxy(proxy_config(&upstream)).await;
    let client = EmployeeProxyClient::new(&base_url);

    assert!(client.list().await.is_ok());

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
