//! Cleanup cycle and polling loop

use std::future::Future;
use std::time::Duration;

use crate::client::ArrClient;
use crate::config::Config;
use crate::error::JanitorResult;
use crate::jobs::{queue_cleanup, trigger, ArrCommand, ScanReport};

/// Outcome of one full cycle over both services
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Series manager queue scan, `None` if it was cut short
    pub sonarr: Option<ScanReport>,
    /// Movie manager queue scan, `None` if it was cut short
    pub radarr: Option<ScanReport>,
    /// Commands the services accepted
    pub commands_accepted: usize,
    /// Commands that failed
    pub commands_failed: usize,
}

/// The two service clients a cycle visits
#[derive(Debug, Clone)]
pub struct Janitor {
    sonarr: ArrClient,
    radarr: ArrClient,
}

impl Janitor {
    /// Build both clients from the loaded configuration
    pub fn new(config: &Config) -> JanitorResult<Self> {
        let timeout = config.request_timeout();
        Ok(Self::from_clients(
            ArrClient::new(config.sonarr().clone(), timeout)?,
            ArrClient::new(config.radarr().clone(), timeout)?,
        ))
    }

    /// Assemble a janitor from ready-made clients
    pub fn from_clients(sonarr: ArrClient, radarr: ArrClient) -> Self {
        Self { sonarr, radarr }
    }

    /// Run one cycle: scan both queues, then trigger the follow-up commands
    ///
    /// Every step runs regardless of how the previous ones went.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport {
            sonarr: queue_cleanup::execute(&self.sonarr).await,
            radarr: queue_cleanup::execute(&self.radarr).await,
            ..CycleReport::default()
        };

        let commands = [
            (&self.sonarr, ArrCommand::ImportListSync),
            (&self.radarr, ArrCommand::ImportListSync),
            (&self.sonarr, ArrCommand::MissingEpisodeSearch),
        ];
        for (client, command) in commands {
            if trigger(client, command).await {
                report.commands_accepted += 1;
            } else {
                report.commands_failed += 1;
            }
        }

        report
    }

    /// Run cycles forever, sleeping `interval` between them
    pub async fn run_forever(&self, interval: Duration) {
        run_loop(interval, None, move || self.run_cycle()).await;
    }
}

/// Repeatedly run `cycle`, sleeping `interval` after each one
///
/// With `max_cycles` set the loop returns after that many cycles without a
/// trailing sleep; with `None` it never returns.
pub async fn run_loop<F, Fut>(interval: Duration, max_cycles: Option<u64>, mut cycle: F) -> u64
where
    F: FnMut() -> Fut,
    Fut: Future,
{
    let mut completed = 0u64;

    loop {
        tracing::info!(cycle = completed + 1, "Running queue cleanup");
        cycle().await;
        completed += 1;
        tracing::info!(cycle = completed, "Finished queue cleanup");

        if max_cycles.is_some_and(|max| completed >= max) {
            return completed;
        }

        tracing::info!(
            interval_secs = interval.as_secs(),
            "Sleeping for {} minutes",
            interval.as_secs_f64() / 60.0
        );
        tokio::time::sleep(interval).await;
    }
}
