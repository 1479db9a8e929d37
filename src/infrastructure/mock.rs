use crate::domain::errors::ProviderError;
use crate::domain::ports::{InventoryClient, MetricSink};
use crate::domain::types::{InventoryFilter, MetricObservation, SnapshotRecord, VolumeRecord};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory inventory backed by fixed records. Used for mock mode, for
/// fixture-driven runs and for tests; supports injecting a per-kind failure
/// that is replayed on every query.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryClient {
    volumes: Arc<RwLock<Vec<VolumeRecord>>>,
    snapshots: Arc<RwLock<Vec<SnapshotRecord>>>,
    volumes_failure: Arc<RwLock<Option<ProviderError>>>,
    snapshots_failure: Arc<RwLock<Option<ProviderError>>>,
}

impl InMemoryInventoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inventory(volumes: Vec<VolumeRecord>, snapshots: Vec<SnapshotRecord>) -> Self {
        Self {
            volumes: Arc::new(RwLock::new(volumes)),
            snapshots: Arc::new(RwLock::new(snapshots)),
            volumes_failure: Arc::new(RwLock::new(None)),
            snapshots_failure: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn fail_volume_queries(&self, cause: ProviderError) {
        *self.volumes_failure.write().await = Some(cause);
    }

    pub async fn fail_snapshot_queries(&self, cause: ProviderError) {
        *self.snapshots_failure.write().await = Some(cause);
    }

    fn volume_field(volume: &VolumeRecord, field: &str) -> Result<String, ProviderError> {
        match field {
            "status" => Ok(volume.status.clone()),
            "encrypted" => Ok(volume.encrypted.to_string()),
            other => Err(ProviderError::MalformedResponse {
                reason: format!("unsupported volume filter field: {other}"),
            }),
        }
    }

    fn snapshot_field(snapshot: &SnapshotRecord, field: &str) -> Result<String, ProviderError> {
        match field {
            "encrypted" => Ok(snapshot.encrypted.to_string()),
            "owner" => Ok(snapshot.owner_id.clone()),
            other => Err(ProviderError::MalformedResponse {
                reason: format!("unsupported snapshot filter field: {other}"),
            }),
        }
    }

    fn matches<T>(
        record: &T,
        filter: &InventoryFilter,
        field_of: impl Fn(&T, &str) -> Result<String, ProviderError>,
    ) -> Result<bool, ProviderError> {
        for (field, values) in filter.clauses() {
            let actual = field_of(record, field)?;
            if !values.contains(&actual) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl InventoryClient for InMemoryInventoryClient {
    async fn query_volumes(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<VolumeRecord>, ProviderError> {
        if let Some(cause) = self.volumes_failure.read().await.clone() {
            return Err(cause);
        }

        let volumes = self.volumes.read().await;
        let mut matched = Vec::new();
        for volume in volumes.iter() {
            if Self::matches(volume, filter, Self::volume_field)? {
                matched.push(volume.clone());
            }
        }
        Ok(matched)
    }

    async fn query_snapshots(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<SnapshotRecord>, ProviderError> {
        if let Some(cause) = self.snapshots_failure.read().await.clone() {
            return Err(cause);
        }

        let snapshots = self.snapshots.read().await;
        let mut matched = Vec::new();
        for snapshot in snapshots.iter() {
            if Self::matches(snapshot, filter, Self::snapshot_field)? {
                matched.push(snapshot.clone());
            }
        }
        Ok(matched)
    }
}

/// Metric sink that records every observation it accepts. Individual metric
/// names can be marked to fail, to exercise per-publish error isolation.
#[derive(Debug, Clone, Default)]
pub struct RecordingMetricSink {
    observations: Arc<RwLock<Vec<MetricObservation>>>,
    fail_on: Arc<RwLock<HashSet<String>>>,
}

impl RecordingMetricSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_metric(&self, name: &str) {
        self.fail_on.write().await.insert(name.to_string());
    }

    pub async fn observations(&self) -> Vec<MetricObservation> {
        self.observations.read().await.clone()
    }
}

#[async_trait]
impl MetricSink for RecordingMetricSink {
    async fn record(&self, observation: &MetricObservation) -> Result<(), ProviderError> {
        if self.fail_on.read().await.contains(&observation.name) {
            return Err(ProviderError::Transport {
                reason: format!("injected sink failure for {}", observation.name),
            });
        }

        self.observations.write().await.push(observation.clone());
        Ok(())
    }
}
