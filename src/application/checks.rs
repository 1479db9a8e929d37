use crate::domain::errors::ProviderError;
use crate::domain::ports::InventoryClient;
use crate::domain::types::{
    CheckResult, InventoryFilter, MetricSample, MetricUnit, UNATTACHED_VOLUMES_COUNT,
    UNATTACHED_VOLUMES_TOTAL_SIZE, UNENCRYPTED_SNAPSHOTS_COUNT, UNENCRYPTED_VOLUMES_COUNT,
};
use tracing::info;

/// The fixed suite of inventory hygiene checks. Each check is one filtered
/// query plus a pure derivation of its metrics; provider errors never
/// escape past `run`, they become a `CheckResult::Failure` attributed to
/// the check's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    UnattachedVolumes,
    UnencryptedVolumes,
    UnencryptedSnapshots,
}

impl Check {
    pub const ALL: [Check; 3] = [
        Check::UnattachedVolumes,
        Check::UnencryptedVolumes,
        Check::UnencryptedSnapshots,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::UnattachedVolumes => "UnattachedVolumes",
            Check::UnencryptedVolumes => "UnencryptedVolumes",
            Check::UnencryptedSnapshots => "UnencryptedSnapshots",
        }
    }

    pub async fn run(&self, inventory: &dyn InventoryClient) -> CheckResult {
        info!("Running {} check...", self.name());
        let outcome = match self {
            Check::UnattachedVolumes => unattached_volumes(inventory).await,
            Check::UnencryptedVolumes => unencrypted_volumes(inventory).await,
            Check::UnencryptedSnapshots => unencrypted_snapshots(inventory).await,
        };

        match outcome {
            Ok(metrics) => CheckResult::Success { metrics },
            Err(cause) => {
                tracing::error!("{} check failed: {}", self.name(), cause);
                CheckResult::Failure {
                    check_name: self.name().to_string(),
                    cause,
                }
            }
        }
    }
}

async fn unattached_volumes(
    inventory: &dyn InventoryClient,
) -> Result<Vec<MetricSample>, ProviderError> {
    let filter = InventoryFilter::new().with("status", ["available"]);
    let volumes = inventory.query_volumes(&filter).await?;

    let total_size: u64 = volumes.iter().map(|v| v.size_gb).sum();
    info!(
        "Found {} unattached volumes with total size of {} GB",
        volumes.len(),
        total_size
    );

    Ok(vec![
        MetricSample::new(
            UNATTACHED_VOLUMES_COUNT,
            volumes.len() as f64,
            MetricUnit::Count,
        ),
        MetricSample::new(
            UNATTACHED_VOLUMES_TOTAL_SIZE,
            total_size as f64,
            MetricUnit::Gigabytes,
        ),
    ])
}

async fn unencrypted_volumes(
    inventory: &dyn InventoryClient,
) -> Result<Vec<MetricSample>, ProviderError> {
    let filter = InventoryFilter::new().with("encrypted", ["false"]);
    let volumes = inventory.query_volumes(&filter).await?;

    info!("Found {} unencrypted volumes", volumes.len());
    // Per-record detail for visibility only; never part of the metric contract.
    for volume in &volumes {
        info!(
            "Unencrypted volume found: ID={}, Size={}GB, Type={}, AZ={}",
            volume.id, volume.size_gb, volume.volume_type, volume.availability_zone
        );
    }

    Ok(vec![MetricSample::new(
        UNENCRYPTED_VOLUMES_COUNT,
        volumes.len() as f64,
        MetricUnit::Count,
    )])
}

async fn unencrypted_snapshots(
    inventory: &dyn InventoryClient,
) -> Result<Vec<MetricSample>, ProviderError> {
    let filter = InventoryFilter::new()
        .with("owner", ["self"])
        .with("encrypted", ["false"]);
    let snapshots = inventory.query_snapshots(&filter).await?;

    info!("Found {} unencrypted snapshots", snapshots.len());
    for snapshot in &snapshots {
        let size = snapshot
            .volume_size_gb
            .map(|gb| gb.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        info!(
            "Unencrypted snapshot found: ID={}, Size={}GB, Description={}",
            snapshot.id,
            size,
            snapshot.description.as_deref().unwrap_or("No description")
        );
    }

    Ok(vec![MetricSample::new(
        UNENCRYPTED_SNAPSHOTS_COUNT,
        snapshots.len() as f64,
        MetricUnit::Count,
    )])
}
