//! Wire-contract tests for the record codec.
//!
//! The service relies on two rules: every record object carries a `kind`
//! discriminator selected by the link bit, and an unset field is omitted
//! from the JSON object entirely (never emitted as null or a zero value).

use corvus_model::{
    CloudRegionBuilder, Cluster, ClusterBuilder, ClusterNodesBuilder, ClusterState,
    ClusterStatusBuilder, NodePool, NodePoolBuilder,
};
use serde_json::json;

#[test]
fn test_unset_fields_are_omitted() {
    let cluster = ClusterBuilder::new().name("prod").build().unwrap();
    let value = serde_json::to_value(&cluster).unwrap();
    assert_eq!(value, json!({"kind": "Cluster", "name": "prod"}));
}

#[test]
fn test_zero_valued_set_fields_are_emitted() {
    let cluster = ClusterBuilder::new()
        .name("")
        .multi_az(false)
        .build()
        .unwrap();
    let value = serde_json::to_value(&cluster).unwrap();
    assert_eq!(
        value,
        json!({"kind": "Cluster", "name": "", "multi_az": false})
    );
}

#[test]
fn test_link_bit_selects_kind() {
    let stub = ClusterBuilder::new()
        .link(true)
        .id("123")
        .href("/api/v1/clusters/123")
        .build()
        .unwrap();
    let value = serde_json::to_value(&stub).unwrap();
    assert_eq!(value["kind"], "ClusterLink");

    let parsed: Cluster = serde_json::from_value(value).unwrap();
    assert!(parsed.link());
    assert_eq!(parsed.kind(), "ClusterLink");
}

#[test]
fn test_nested_records_carry_their_own_kind() {
    let cluster = ClusterBuilder::new()
        .region(CloudRegionBuilder::new().link(true).id("eu-west-1"))
        .build()
        .unwrap();
    let value = serde_json::to_value(&cluster).unwrap();
    assert_eq!(
        value["region"],
        json!({"kind": "CloudRegionLink", "id": "eu-west-1"})
    );
}

#[test]
fn test_missing_key_round_trips_to_unset() {
    let parsed: Cluster = serde_json::from_value(json!({
        "kind": "Cluster",
        "id": "123",
        "managed": false,
    }))
    .unwrap();

    assert_eq!(parsed.get_id(), Some("123"));
    assert_eq!(parsed.get_managed(), Some(false));
    assert_eq!(parsed.get_name(), None);
    assert_eq!(parsed.get_multi_az(), None);
    assert_eq!(parsed.region(), None);
}

#[test]
fn test_null_is_treated_as_absent() {
    let parsed: Cluster = serde_json::from_value(json!({
        "kind": "Cluster",
        "name": null,
    }))
    .unwrap();
    assert_eq!(parsed.get_name(), None);
}

#[test]
fn test_presence_round_trip() {
    let original = ClusterBuilder::new()
        .id("123")
        .name("prod")
        .multi_az(false)
        .region(CloudRegionBuilder::new().link(true).id("eu-west-1"))
        .nodes(ClusterNodesBuilder::new().total(7).master(3).compute(0))
        .status(
            ClusterStatusBuilder::new()
                .state(ClusterState::Ready)
                .description(""),
        )
        .node_pools(vec![NodePoolBuilder::new()
            .id("pool-1")
            .instance_type("m5.xlarge")
            .replicas(4)])
        .build()
        .unwrap();

    let text = serde_json::to_string(&original).unwrap();
    let parsed: Cluster = serde_json::from_str(&text).unwrap();

    // Same presence and same values for every field, set or not.
    assert_eq!(parsed, original);
    assert_eq!(parsed.get_managed(), None);
    assert_eq!(parsed.nodes().unwrap().get_compute(), Some(0));
    assert_eq!(parsed.status().unwrap().get_description(), Some(""));
}

#[test]
fn test_empty_list_round_trips_as_present() {
    let original = ClusterBuilder::new().node_pools(vec![]).build().unwrap();
    let value = serde_json::to_value(&original).unwrap();
    assert_eq!(value["node_pools"], json!([]));

    let parsed: Cluster = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.get_node_pools(), Some(&[] as &[NodePool]));
}

#[test]
fn test_unknown_state_is_preserved() {
    let parsed: Cluster = serde_json::from_value(json!({
        "kind": "Cluster",
        "status": {"kind": "ClusterStatus", "state": "hibernating"},
    }))
    .unwrap();
    assert_eq!(
        parsed.status().unwrap().state(),
        &ClusterState::Unknown("hibernating".to_string())
    );
}

#[test]
fn test_unknown_keys_are_ignored() {
    let parsed: Cluster = serde_json::from_value(json!({
        "kind": "Cluster",
        "id": "123",
        "console": {"url": "https://console.example.com"},
    }))
    .unwrap();
    assert_eq!(parsed.get_id(), Some("123"));
}
