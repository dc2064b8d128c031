//! Session setup and initialization

use crate::config::Config;
use crate::controller::Controller;
use crate::environment::Environment;
use crate::runtime_api::RuntimeClient;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

/// Session data for both TUI and headless modes
#[derive(Clone)]
pub struct SessionData {
    /// Runs actions against the runtime
    pub controller: Controller,
    /// Runtime being watched
    pub environment: Environment,
    /// Automatic refresh period; `None` when polling is off
    pub refresh_interval: Option<Duration>,
}

/// Turns a seconds count into a polling period. Zero means no polling.
pub fn refresh_interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Resolves where to connect and how often to poll, then builds the API client.
///
/// # Arguments
/// * `config` - Saved configuration, or the defaults
/// * `base_url` - Explicit runtime URL from the command line or environment
/// * `refresh_secs` - Explicit refresh period, overriding the saved one
pub fn setup_session(
    config: &Config,
    base_url: Option<&str>,
    refresh_secs: Option<u64>,
) -> Result<SessionData, Box<dyn Error>> {
    let environment = config.environment(base_url)?;
    let client = RuntimeClient::new(environment.clone())?;
    let secs = refresh_secs.unwrap_or(config.refresh_interval_secs);
    log::debug!("session against {:?}, refresh {}s", environment, secs);

    Ok(SessionData {
        controller: Controller::new(Arc::new(client)),
        environment,
        refresh_interval: refresh_interval(secs),
    })
}
