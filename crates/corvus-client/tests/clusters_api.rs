//! Clusters API integration tests against a mock HTTP server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use corvus_client::{CorvusClient, Error, PollContext};
use corvus_model::{ClusterBuilder, ClusterState, ClusterStatusBuilder};

async fn client_for(server: &MockServer) -> CorvusClient {
    CorvusClient::builder()
        .base_url(server.uri())
        .auth_token("secret")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_cluster_decodes_presence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/123"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Cluster",
            "id": "123",
            "href": "/api/v1/clusters/123",
            "name": "prod",
            "managed": false,
            "region": {"kind": "CloudRegionLink", "id": "eu-west-1"},
        })))
        .mount(&server)
        .await;

    let cluster = client_for(&server).await.clusters().get("123").await.unwrap();
    assert_eq!(cluster.get_id(), Some("123"));
    assert_eq!(cluster.get_managed(), Some(false));
    assert_eq!(cluster.get_multi_az(), None);
    assert!(cluster.region().unwrap().link());
}

#[tokio::test]
async fn test_create_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/clusters"))
        .and(body_json(json!({
            "kind": "Cluster",
            "name": "prod",
            "multi_az": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "kind": "Cluster",
            "id": "123",
            "name": "prod",
            "multi_az": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cluster = ClusterBuilder::new()
        .name("prod")
        .multi_az(true)
        .build()
        .unwrap();
    let created = client_for(&server)
        .await
        .clusters()
        .create(&cluster)
        .await
        .unwrap();
    assert_eq!(created.get_id(), Some("123"));
}

#[tokio::test]
async fn test_update_patches_only_touched_fields() {
    let server = MockServer::start().await;
    // An edit-and-rebuild update of one scalar must not resend the
    // unchanged, unset fields.
    Mock::given(method("PATCH"))
        .and(path("/api/v1/clusters/123"))
        .and(body_json(json!({
            "kind": "Cluster",
            "managed": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Cluster",
            "id": "123",
            "managed": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ClusterBuilder::new().managed(false).build().unwrap();
    let updated = client_for(&server)
        .await
        .clusters()
        .update("123", &patch)
        .await
        .unwrap();
    assert_eq!(updated.get_managed(), Some(false));
}

#[tokio::test]
async fn test_remote_error_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "kind": "Error",
            "code": "CLUSTERS-MGMT-404",
            "reason": "cluster 'missing' not found",
            "operation_id": "op-17",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .clusters()
        .get("missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Remote {
            status,
            code,
            reason,
            operation_id,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, "CLUSTERS-MGMT-404");
            assert_eq!(reason, "cluster 'missing' not found");
            assert_eq!(operation_id.as_deref(), Some("op-17"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_error_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/123"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .clusters()
        .get("123")
        .await
        .unwrap_err();
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_list_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "ClusterList",
            "items": [
                {"kind": "Cluster", "id": "a"},
                {"kind": "Cluster", "id": "b"},
            ],
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/clusters/a"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let clusters = client.clusters().list().await.unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].get_id(), Some("a"));

    client.clusters().delete("a").await.unwrap();
}

#[tokio::test]
async fn test_poll_until_cluster_is_ready() {
    let server = MockServer::start().await;
    let installing = json!({
        "kind": "Cluster",
        "id": "123",
        "status": {"kind": "ClusterStatus", "state": "installing"},
    });
    let ready = json!({
        "kind": "Cluster",
        "id": "123",
        "status": {"kind": "ClusterStatus", "state": "ready"},
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(installing))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ready))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let ctx = PollContext::deadline_in(Duration::from_secs(10));
    let fetched = client
        .clusters()
        .poll("123")
        .interval(Duration::from_millis(10))
        .status(reqwest::StatusCode::OK)
        .predicate(|f| {
            f.body
                .as_ref()
                .and_then(|c| c.status())
                .is_some_and(|s| s.state() == &ClusterState::Ready)
        })
        .start(&ctx)
        .await
        .unwrap();

    let status = fetched.body.unwrap().status().cloned().unwrap();
    let expected = ClusterStatusBuilder::new()
        .state(ClusterState::Ready)
        .build()
        .unwrap();
    assert_eq!(status, expected);
}

#[tokio::test]
async fn test_poll_can_wait_for_404_after_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Cluster",
            "id": "123",
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "kind": "Error",
            "code": "CLUSTERS-MGMT-404",
            "reason": "gone",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let ctx = PollContext::deadline_in(Duration::from_secs(10));
    let fetched = client
        .clusters()
        .poll("123")
        .interval(Duration::from_millis(10))
        .status(reqwest::StatusCode::NOT_FOUND)
        .start(&ctx)
        .await
        .unwrap();

    assert_eq!(fetched.status, reqwest::StatusCode::NOT_FOUND);
    assert!(fetched.body.is_none());
}
