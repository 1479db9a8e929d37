use crate::domain::types::{SnapshotRecord, VolumeRecord};
use crate::infrastructure::mock::InMemoryInventoryClient;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// On-disk inventory document for fixture mode:
/// `{ "volumes": [...], "snapshots": [...] }`. Either section may be
/// omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryFixture {
    #[serde(default)]
    pub volumes: Vec<VolumeRecord>,
    #[serde(default)]
    pub snapshots: Vec<SnapshotRecord>,
}

impl InventoryFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read inventory fixture {}", path.display()))?;
        let fixture: InventoryFixture = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse inventory fixture {}", path.display()))?;

        info!(
            "Loaded inventory fixture: {} volume(s), {} snapshot(s)",
            fixture.volumes.len(),
            fixture.snapshots.len()
        );
        Ok(fixture)
    }

    pub fn into_client(self) -> InMemoryInventoryClient {
        InMemoryInventoryClient::with_inventory(self.volumes, self.snapshots)
    }
}
