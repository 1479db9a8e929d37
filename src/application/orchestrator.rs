use crate::application::checks::Check;
use crate::domain::errors::ProviderError;
use crate::domain::ports::{InventoryClient, MetricSink};
use crate::domain::report::InvocationReport;
use crate::domain::types::{CheckResult, MetricObservation, MetricUnit};
use chrono::{DateTime, Utc};
use futures::future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Runs the full check suite against the inventory capability and drives
/// metric publication for every check that succeeded. All failures are
/// local: a failed check or a failed publish is recorded in the report and
/// never stops the rest of the run.
pub struct Orchestrator {
    inventory: Arc<dyn InventoryClient>,
    sink: Arc<dyn MetricSink>,
    namespace: String,
}

impl Orchestrator {
    pub fn new(
        inventory: Arc<dyn InventoryClient>,
        sink: Arc<dyn MetricSink>,
        namespace: String,
    ) -> Self {
        Self {
            inventory,
            sink,
            namespace,
        }
    }

    /// Single pass: fan out the checks, merge their outcomes once, publish,
    /// finalize. The optional deadline is the trigger's remaining budget;
    /// a check still in flight when it expires is cut off and recorded as
    /// its own failure.
    pub async fn run(&self, deadline: Option<DateTime<Utc>>) -> InvocationReport {
        let results = future::join_all(
            Check::ALL
                .iter()
                .map(|check| self.run_check(*check, deadline)),
        )
        .await;

        let mut report = InvocationReport::new();
        for result in results {
            match result {
                CheckResult::Success { metrics } => {
                    for sample in metrics {
                        report.record_metric(&sample.name, sample.value);
                        self.publish(&mut report, &sample.name, sample.value, sample.unit)
                            .await;
                    }
                }
                CheckResult::Failure { check_name, cause } => {
                    report.record_error(&check_name, &cause.to_string());
                }
            }
        }

        report.finalize();
        report
    }

    async fn run_check(&self, check: Check, deadline: Option<DateTime<Utc>>) -> CheckResult {
        let Some(deadline) = deadline else {
            return check.run(self.inventory.as_ref()).await;
        };

        let remaining = (deadline - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        if remaining.is_zero() {
            // Budget exhausted before the query was issued; do not start it.
            return CheckResult::Failure {
                check_name: check.name().to_string(),
                cause: ProviderError::Timeout { duration_ms: 0 },
            };
        }
        match tokio::time::timeout(remaining, check.run(self.inventory.as_ref())).await {
            Ok(result) => result,
            Err(_) => CheckResult::Failure {
                check_name: check.name().to_string(),
                cause: ProviderError::Timeout {
                    duration_ms: remaining.as_millis() as u64,
                },
            },
        }
    }

    /// One observation, one record call. A sink failure is attributed to
    /// the metric name; the computed value stays in the report either way.
    async fn publish(
        &self,
        report: &mut InvocationReport,
        name: &str,
        value: f64,
        unit: MetricUnit,
    ) {
        let observation = MetricObservation {
            name: name.to_string(),
            value,
            unit,
            namespace: self.namespace.clone(),
            timestamp: Utc::now(),
        };

        info!(
            "Publishing metric: {}={} {} (namespace {})",
            observation.name, observation.value, observation.unit, observation.namespace
        );
        if let Err(cause) = self.sink.record(&observation).await {
            error!("Error publishing metric {}: {}", observation.name, cause);
            report.record_error(&observation.name, &cause.to_string());
        }
    }
}
