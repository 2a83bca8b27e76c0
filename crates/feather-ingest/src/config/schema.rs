use std::net::SocketAddr;

use serde::Deserialize;
use feather_core::error::{FeatherError, Result};

const MAX_WORK_DELAY_MS: u64 = 600_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub client: ClientSection,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            client: ClientSection::default(),
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FeatherError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.client.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_listen")]
    pub metrics_listen: String,

    /// Simulated work delay applied to every request.
    #[serde(default)]
    pub work_delay_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_listen: default_metrics_listen(),
            work_delay_ms: 0,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        let rpc = self.listen_addr()?;
        let ops = self.metrics_listen_addr()?;
        if rpc == ops && rpc.port() != 0 {
            return Err(FeatherError::BadRequest(
                "server.listen and server.metrics_listen must differ".into(),
            ));
        }
        if self.work_delay_ms > MAX_WORK_DELAY_MS {
            return Err(FeatherError::BadRequest(format!(
                "server.work_delay_ms must be at most {MAX_WORK_DELAY_MS}"
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| FeatherError::BadRequest("server.listen must be a valid SocketAddr".into()))
    }

    pub fn metrics_listen_addr(&self) -> Result<SocketAddr> {
        self.metrics_listen.parse().map_err(|_| {
            FeatherError::BadRequest("server.metrics_listen must be a valid SocketAddr".into())
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:50051".into()
}
fn default_metrics_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default = "default_event_id")]
    pub event_id: String,

    #[serde(default = "default_event_val")]
    pub event_val: f64,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            target: default_target(),
            event_id: default_event_id(),
            event_val: default_event_val(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.target.starts_with("http://") || self.target.starts_with("https://")) {
            return Err(FeatherError::BadRequest(
                "client.target must start with http:// or https://".into(),
            ));
        }
        if !self.event_val.is_finite() {
            return Err(FeatherError::BadRequest("client.event_val must be finite".into()));
        }
        Ok(())
    }
}

fn default_target() -> String {
    "http://localhost:50051".into()
}
fn default_event_id() -> String {
    "abc".into()
}
#[allow(clippy::approx_constant)]
fn default_event_val() -> f64 {
    3.14
}
