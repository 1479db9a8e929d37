use crate::domain::errors::ProviderError;
use crate::domain::ports::MetricSink;
use crate::domain::types::MetricObservation;
use async_trait::async_trait;
use tracing::info;

/// Push-based metric sink: each observation is emitted as a structured log
/// line on stdout, where the log shipper of the deployment picks it up.
/// Recording a line cannot fail, so this sink never errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMetricSink;

impl LogMetricSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricSink for LogMetricSink {
    async fn record(&self, observation: &MetricObservation) -> Result<(), ProviderError> {
        info!(
            metric = %observation.name,
            value = observation.value,
            unit = %observation.unit,
            namespace = %observation.namespace,
            timestamp = %observation.timestamp.to_rfc3339(),
            "metric observation"
        );
        Ok(())
    }
}
