use crate::config::{Config, Mode};
use crate::domain::ports::{InventoryClient, MetricSink};
use crate::infrastructure::fixture::InventoryFixture;
use crate::infrastructure::mock::InMemoryInventoryClient;
use crate::infrastructure::sink::LogMetricSink;
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct ServiceFactory;

impl ServiceFactory {
    /// Bind the capability implementations for the configured mode. A
    /// failure here is fatal for the whole invocation: without both
    /// capabilities there is nothing meaningful to run.
    pub fn create_services(
        config: &Config,
    ) -> Result<(Arc<dyn InventoryClient>, Arc<dyn MetricSink>)> {
        let inventory: Arc<dyn InventoryClient> = match config.mode {
            Mode::Mock => Arc::new(InMemoryInventoryClient::new()),
            Mode::Fixture => {
                let path = config
                    .fixture_path
                    .as_deref()
                    .context("FIXTURE_PATH is required when MODE=fixture")?;
                Arc::new(InventoryFixture::load(path)?.into_client())
            }
        };

        Ok((inventory, Arc::new(LogMetricSink::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(mode: Mode, fixture_path: Option<PathBuf>) -> Config {
        Config {
            mode,
            namespace: "EBSMonitoring".to_string(),
            fixture_path,
            deadline_seconds: None,
        }
    }

    #[test]
    fn test_mock_mode_binds_empty_inventory() {
        let result = ServiceFactory::create_services(&config(Mode::Mock, None));
        assert!(result.is_ok());
    }

    #[test]
    fn test_fixture_mode_without_path_is_fatal() {
        let err = ServiceFactory::create_services(&config(Mode::Fixture, None)).unwrap_err();
        assert!(err.to_string().contains("FIXTURE_PATH"));
    }

    #[test]
    fn test_fixture_mode_with_unreadable_path_is_fatal() {
        let missing = std::env::temp_dir().join("ebsmon_factory_absent.json");
        let result = ServiceFactory::create_services(&config(Mode::Fixture, Some(missing)));
        assert!(result.is_err());
    }
}
