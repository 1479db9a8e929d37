use crate::domain::errors::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Metric names as the monitoring backend expects them. These are part of the
// external contract; dashboards and alarms key on the exact strings.
pub const UNATTACHED_VOLUMES_COUNT: &str = "UnattachedVolumesCount";
pub const UNATTACHED_VOLUMES_TOTAL_SIZE: &str = "UnattachedVolumesTotalSize";
pub const UNENCRYPTED_VOLUMES_COUNT: &str = "UnencryptedVolumesCount";
pub const UNENCRYPTED_SNAPSHOTS_COUNT: &str = "UnencryptedSnapshotsCount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    Count,
    Gigabytes,
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricUnit::Count => write!(f, "Count"),
            MetricUnit::Gigabytes => write!(f, "Gigabytes"),
        }
    }
}

/// One derived metric inside a successful check result. Values are always
/// non-negative (counts and size sums).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
}

impl MetricSample {
    pub fn new(name: &str, value: f64, unit: MetricUnit) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit,
        }
    }
}

/// Outcome of a single inventory check. A check either yields its full set
/// of derived metrics or fails as a unit; there are no partial results.
#[derive(Debug, Clone)]
pub enum CheckResult {
    Success { metrics: Vec<MetricSample> },
    Failure { check_name: String, cause: ProviderError },
}

/// Filter predicate for inventory queries: ordered (field, values) clauses,
/// matched conjunctively. A record matches a clause when the record's field
/// equals any of the clause values.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    clauses: Vec<(String, Vec<String>)>,
}

impl InventoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clauses.push((
            field.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn clauses(&self) -> &[(String, Vec<String>)] {
        &self.clauses
    }
}

/// Read-only projection of a block-storage volume as reported by the
/// inventory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub id: String,
    pub size_gb: u64,
    pub volume_type: String,
    pub status: String,
    pub encrypted: bool,
    pub availability_zone: String,
}

/// Read-only projection of a volume snapshot. Size is optional because the
/// provider omits it for some snapshot states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: String,
    pub volume_size_gb: Option<u64>,
    pub encrypted: bool,
    pub owner_id: String,
    pub description: Option<String>,
}

/// A single named observation handed to the metric sink. Write-once:
/// constructed at publish time, recorded, discarded.
#[derive(Debug, Clone)]
pub struct MetricObservation {
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
    pub namespace: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
