use crate::domain::errors::ProviderError;
use crate::domain::types::{InventoryFilter, MetricObservation, SnapshotRecord, VolumeRecord};
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait InventoryClient: Send + Sync + std::fmt::Debug {
    /// Filtered volume listing. Read-only, never retried here; any
    /// transport, auth, throttling or decode condition surfaces as a
    /// ProviderError for the caller to handle.
    async fn query_volumes(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<VolumeRecord>, ProviderError>;

    /// Filtered snapshot listing. Owner scoping (e.g. owner=self) is an
    /// ordinary filter clause.
    async fn query_snapshots(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<SnapshotRecord>, ProviderError>;
}

#[async_trait]
pub trait MetricSink: Send + Sync + std::fmt::Debug {
    /// Record one named observation with the monitoring backend. Each call
    /// stands alone: no batching, no all-or-nothing semantics.
    async fn record(&self, observation: &MetricObservation) -> Result<(), ProviderError>;
}
