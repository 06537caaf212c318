use crate::analyze::Analysis;
use crate::error::ProbeError;
use crate::resolve::resolve_target;
use nextping_model::{RunConfig, DEFAULT_TCP_PORT};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub host: String,
    pub max_hops: u32,
    pub timeout_ms: u64,
    pub port: u16,
}

impl ProbeRequest {
    pub fn new(host: impl Into<String>, max_hops: u32, timeout_ms: u64) -> Self {
        Self {
            host: host.into(),
            max_hops,
            timeout_ms,
            port: DEFAULT_TCP_PORT,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            host: resolve_target(&config.target).to_string(),
            max_hops: config.max_hops,
            timeout_ms: config.timeout_ms,
            port: config.port,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// One way of measuring the path to a host.
///
/// `probe` produces raw evidence and `analyze` reduces it; each backend pairs
/// its evidence format with the analyzer that understands it.
pub trait ProbeBackend {
    /// Short description used in operator diagnostics.
    fn label(&self) -> &str;

    fn probe(&self, request: &ProbeRequest) -> Result<String, ProbeError>;

    fn analyze(&self, evidence: &str) -> Analysis;
}

impl<T: ProbeBackend + ?Sized> ProbeBackend for Box<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn probe(&self, request: &ProbeRequest) -> Result<String, ProbeError> {
        (**self).probe(request)
    }

    fn analyze(&self, evidence: &str) -> Analysis {
        (**self).analyze(evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_config_resolves_url() {
        let config = RunConfig::new("https://example.com/status", 3, 5, 200).with_port(8443);
        let request = ProbeRequest::from_config(&config);
        assert_eq!(request.host, "example.com");
        assert_eq!(request.max_hops, 5);
        assert_eq!(request.port, 8443);
        assert_eq!(request.timeout(), Duration::from_millis(200));
    }
}
