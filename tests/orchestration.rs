use ebsmon::application::handler::{self, InvocationContext};
use ebsmon::application::orchestrator::Orchestrator;
use ebsmon::domain::errors::ProviderError;
use ebsmon::domain::report::InvocationStatus;
use ebsmon::domain::types::{SnapshotRecord, VolumeRecord};
use ebsmon::infrastructure::mock::{InMemoryInventoryClient, RecordingMetricSink};
use std::sync::Arc;

fn volume(id: &str, status: &str, encrypted: bool, size_gb: u64) -> VolumeRecord {
    VolumeRecord {
        id: id.to_string(),
        size_gb,
        volume_type: "gp3".to_string(),
        status: status.to_string(),
        encrypted,
        availability_zone: "us-east-1a".to_string(),
    }
}

fn snapshot(id: &str, encrypted: bool, size_gb: Option<u64>) -> SnapshotRecord {
    SnapshotRecord {
        id: id.to_string(),
        volume_size_gb: size_gb,
        encrypted,
        owner_id: "self".to_string(),
        description: Some("nightly backup".to_string()),
    }
}

fn orchestrator_over(
    inventory: InMemoryInventoryClient,
    sink: RecordingMetricSink,
) -> Orchestrator {
    Orchestrator::new(Arc::new(inventory), Arc::new(sink), "EBSMonitoring".to_string())
}

#[tokio::test]
async fn test_clean_sweep_publishes_all_four_metrics() {
    // 3 available (encrypted) volumes of sizes 10/20/30, nothing unencrypted
    let inventory = InMemoryInventoryClient::with_inventory(
        vec![
            volume("vol-1", "available", true, 10),
            volume("vol-2", "available", true, 20),
            volume("vol-3", "available", true, 30),
        ],
        vec![snapshot("snap-1", true, Some(8))],
    );
    let sink = RecordingMetricSink::new();
    let orchestrator = orchestrator_over(inventory, sink.clone());

    let report = orchestrator.run(None).await;

    assert_eq!(report.status(), InvocationStatus::Ok);
    assert_eq!(report.status_code(), 200);
    assert!(report.errors().is_empty());

    let metrics = report.metrics();
    assert_eq!(metrics.len(), 4);
    assert_eq!(metrics["UnattachedVolumesCount"], 3.0);
    assert_eq!(metrics["UnattachedVolumesTotalSize"], 60.0);
    assert_eq!(metrics["UnencryptedVolumesCount"], 0.0);
    assert_eq!(metrics["UnencryptedSnapshotsCount"], 0.0);

    assert_eq!(sink.observations().await.len(), 4);
}

#[tokio::test]
async fn test_empty_inventory_reports_zeroes() {
    let orchestrator = orchestrator_over(InMemoryInventoryClient::new(), RecordingMetricSink::new());

    let report = orchestrator.run(None).await;

    assert_eq!(report.status_code(), 200);
    assert!(report.metrics().values().all(|v| *v == 0.0));
    assert_eq!(report.metrics().len(), 4);
}

#[tokio::test]
async fn test_one_failed_check_does_not_block_the_others() {
    let inventory = InMemoryInventoryClient::with_inventory(
        vec![volume("vol-1", "available", false, 100)],
        vec![snapshot("snap-1", false, None)],
    );
    inventory
        .fail_snapshot_queries(ProviderError::Throttled {
            retry_after_secs: 60,
        })
        .await;
    let sink = RecordingMetricSink::new();
    let orchestrator = orchestrator_over(inventory, sink.clone());

    let report = orchestrator.run(None).await;

    assert_eq!(report.status(), InvocationStatus::PartialFailure);
    assert_eq!(report.status_code(), 500);

    // Volume checks still delivered their metrics
    let metrics = report.metrics();
    assert_eq!(metrics["UnattachedVolumesCount"], 1.0);
    assert_eq!(metrics["UnattachedVolumesTotalSize"], 100.0);
    assert_eq!(metrics["UnencryptedVolumesCount"], 1.0);
    assert!(!metrics.contains_key("UnencryptedSnapshotsCount"));

    // Exactly one error, attributed to the failed check
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].source, "UnencryptedSnapshots");
    assert!(report.errors()[0].cause.contains("rate limit"));

    assert_eq!(sink.observations().await.len(), 3);
}

#[tokio::test]
async fn test_failed_volume_queries_fail_both_volume_checks() {
    let inventory = InMemoryInventoryClient::with_inventory(
        vec![],
        vec![snapshot("snap-1", false, Some(4))],
    );
    inventory
        .fail_volume_queries(ProviderError::AuthRejected {
            reason: "expired credentials".to_string(),
        })
        .await;
    let orchestrator = orchestrator_over(inventory, RecordingMetricSink::new());

    let report = orchestrator.run(None).await;

    assert_eq!(report.status_code(), 500);
    assert_eq!(report.errors().len(), 2);
    let sources: Vec<&str> = report.errors().iter().map(|e| e.source.as_str()).collect();
    assert!(sources.contains(&"UnattachedVolumes"));
    assert!(sources.contains(&"UnencryptedVolumes"));

    // The snapshot check still reported
    assert_eq!(report.metrics().len(), 1);
    assert_eq!(report.metrics()["UnencryptedSnapshotsCount"], 1.0);
}

#[tokio::test]
async fn test_publish_failure_keeps_computed_value_and_names_the_metric() {
    let inventory = InMemoryInventoryClient::with_inventory(
        vec![volume("vol-1", "available", true, 50)],
        vec![],
    );
    let sink = RecordingMetricSink::new();
    sink.fail_metric("UnattachedVolumesTotalSize").await;
    let orchestrator = orchestrator_over(inventory, sink.clone());

    let report = orchestrator.run(None).await;

    assert_eq!(report.status(), InvocationStatus::PartialFailure);
    assert_eq!(report.status_code(), 500);

    // Computed in the same invocation, so the value stays visible
    assert_eq!(report.metrics()["UnattachedVolumesTotalSize"], 50.0);
    assert_eq!(report.metrics().len(), 4);

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].source, "UnattachedVolumesTotalSize");

    // The other three observations still went out
    let published = sink.observations().await;
    assert_eq!(published.len(), 3);
    assert!(published.iter().all(|o| o.name != "UnattachedVolumesTotalSize"));
}

#[tokio::test]
async fn test_two_runs_over_unchanged_inventory_are_identical() {
    let inventory = InMemoryInventoryClient::with_inventory(
        vec![
            volume("vol-1", "available", false, 7),
            volume("vol-2", "in-use", false, 11),
        ],
        vec![snapshot("snap-1", false, Some(3))],
    );
    let orchestrator = orchestrator_over(inventory, RecordingMetricSink::new());

    let first = orchestrator.run(None).await;
    let second = orchestrator.run(None).await;

    assert_eq!(first.metrics(), second.metrics());
    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);
}

#[tokio::test]
async fn test_handler_wraps_report_in_wire_response() {
    let orchestrator = orchestrator_over(
        InMemoryInventoryClient::with_inventory(vec![volume("vol-1", "available", true, 5)], vec![]),
        RecordingMetricSink::new(),
    );

    let response = handler::handle(
        &orchestrator,
        serde_json::json!({"detail-type": "Scheduled Event"}),
        InvocationContext::new(None),
    )
    .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.metrics["UnattachedVolumesCount"], 1.0);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["statusCode"], 200);
    assert!(json["body"]["message"].as_str().unwrap().contains("published"));
}
