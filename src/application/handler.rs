use crate::application::orchestrator::Orchestrator;
use crate::domain::report::Response;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// Execution context handed in by the trigger. The event payload itself is
/// opaque to the monitor; only the deadline and invocation id matter.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub invocation_id: Uuid,
    pub deadline: Option<DateTime<Utc>>,
}

impl InvocationContext {
    pub fn new(deadline: Option<DateTime<Utc>>) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            deadline,
        }
    }
}

/// Invocation entrypoint: one scheduled trigger in, one structured
/// response out. The caller always gets a `Response`; partial failures are
/// carried in its status code and body, never thrown.
pub async fn handle(
    orchestrator: &Orchestrator,
    event: serde_json::Value,
    ctx: InvocationContext,
) -> Response {
    info!(
        "Starting EBS monitoring check (invocation {})...",
        ctx.invocation_id
    );
    debug!("Trigger event: {}", event);

    let report = orchestrator.run(ctx.deadline).await;
    info!(
        "Invocation {} finished: status {} with {} metric(s), {} error(s)",
        ctx.invocation_id,
        report.status_code(),
        report.metrics().len(),
        report.errors().len()
    );

    report.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::{InMemoryInventoryClient, RecordingMetricSink};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_handle_returns_structured_response() {
        let orchestrator = Orchestrator::new(
            Arc::new(InMemoryInventoryClient::new()),
            Arc::new(RecordingMetricSink::new()),
            "EBSMonitoring".to_string(),
        );

        let response = handle(
            &orchestrator,
            serde_json::json!({"source": "scheduler"}),
            InvocationContext::new(None),
        )
        .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body.metrics.len(), 4);
    }
}
