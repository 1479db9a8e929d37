use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    Ok,
    PartialFailure,
}

/// One captured error, attributed to the check or metric it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub source: String,
    pub cause: String,
}

/// Structured result of one invocation, built by accumulation across the
/// check and publish phases and returned to the caller once. Nothing here
/// survives the invocation.
#[derive(Debug, Clone)]
pub struct InvocationReport {
    status: InvocationStatus,
    message: String,
    metrics: BTreeMap<String, f64>,
    errors: Vec<ReportedError>,
}

impl InvocationReport {
    pub fn new() -> Self {
        Self {
            status: InvocationStatus::Ok,
            message: String::new(),
            metrics: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// Report for a fatal initialization failure: nothing ran, nothing was
    /// published, but the caller still gets a structured response.
    pub fn initialization_failure(cause: &str) -> Self {
        let mut report = Self::new();
        report.record_error("Initialization", cause);
        report.finalize();
        report
    }

    /// Enter a computed metric value. Only values from checks that
    /// succeeded ever reach this map.
    pub fn record_metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    pub fn record_error(&mut self, source: &str, cause: &str) {
        self.status = InvocationStatus::PartialFailure;
        self.errors.push(ReportedError {
            source: source.to_string(),
            cause: cause.to_string(),
        });
    }

    /// Settle the status and summary message once both phases are done.
    pub fn finalize(&mut self) {
        self.message = match self.status {
            InvocationStatus::Ok => {
                "All metrics successfully published to the monitoring backend".to_string()
            }
            InvocationStatus::PartialFailure => format!(
                "Completed with {} error(s); see errors for affected checks and metrics",
                self.errors.len()
            ),
        };
    }

    pub fn status(&self) -> InvocationStatus {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        match self.status {
            InvocationStatus::Ok => 200,
            InvocationStatus::PartialFailure => 500,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn errors(&self) -> &[ReportedError] {
        &self.errors
    }

    pub fn into_response(self) -> Response {
        Response {
            status_code: self.status_code(),
            body: ResponseBody {
                message: self.message,
                metrics: self.metrics,
            },
        }
    }
}

impl Default for InvocationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire form handed back to the trigger: `{"statusCode": ..., "body":
/// {"message": ..., "metrics": {...}}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseBody {
    pub message: String,
    pub metrics: BTreeMap<String, f64>,
}
