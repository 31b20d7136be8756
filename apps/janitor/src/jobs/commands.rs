//! Fire-and-forget service commands

use serde_json::{json, Value};

use crate::client::ArrClient;

/// Commands the janitor triggers after cleaning a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrCommand {
    /// Pull new items from the configured import lists
    ImportListSync,
    /// Search for every missing monitored episode (series manager only)
    MissingEpisodeSearch,
}

impl ArrCommand {
    /// Command name as the API expects it
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImportListSync => "ImportListSync",
            Self::MissingEpisodeSearch => "missingEpisodeSearch",
        }
    }

    /// Request body for `POST /command`
    pub fn payload(&self) -> Value {
        json!({ "name": self.name() })
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::ImportListSync => "sync list import",
            Self::MissingEpisodeSearch => "missing episode search",
        }
    }
}

/// Trigger `command` on the client's service
///
/// Returns whether the service accepted it; failures are only logged.
pub async fn trigger(client: &ArrClient, command: ArrCommand) -> bool {
    let service = client.kind();

    if command == ArrCommand::MissingEpisodeSearch && !service.supports_missing_episode_search() {
        tracing::debug!(service = %service, "{} has no missing episode search", service);
        return false;
    }

    tracing::info!(
        service = %service,
        command = command.name(),
        "Triggering {} {}...",
        service,
        command.describe()
    );

    match client.post("command", &command.payload()).await {
        Some(_) => {
            tracing::info!(
                service = %service,
                command = command.name(),
                "Triggered {} {}",
                service,
                command.describe()
            );
            true
        }
        None => {
            tracing::warn!(
                service = %service,
                command = command.name(),
                "{} {} was not accepted",
                service,
                command.describe()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janitor_shared_config::{ArrConfig, ServiceKind};
    use janitor_test_utils::MockArrServer;

    #[test]
    fn test_command_names() {
        assert_eq!(ArrCommand::ImportListSync.name(), "ImportListSync");
        assert_eq!(
            ArrCommand::MissingEpisodeSearch.name(),
            "missingEpisodeSearch"
        );
    }

    #[test]
    fn test_command_payload() {
        assert_eq!(
            ArrCommand::ImportListSync.payload(),
            json!({ "name": "ImportListSync" })
        );
    }

    #[tokio::test]
    async fn test_missing_episode_search_skipped_for_movies() {
        let server = MockArrServer::start().await;
        server.expect_command("missingEpisodeSearch", 0).await;

        let config = ArrConfig::new(ServiceKind::Radarr, server.url(), server.api_key());
        let client = ArrClient::new(config, None).unwrap();

        assert!(!trigger(&client, ArrCommand::MissingEpisodeSearch).await);
    }

    #[tokio::test]
    async fn test_trigger_reports_failure() {
        let server = MockArrServer::start().await;
        server.mock_command_error(503).await;

        let config = ArrConfig::new(ServiceKind::Sonarr, server.url(), server.api_key());
        let client = ArrClient::new(config, None).unwrap();

        assert!(!trigger(&client, ArrCommand::ImportListSync).await);
    }
}
