use crate::analyze::{analyze_tcp_reachability, Analysis};
use crate::backend::{ProbeBackend, ProbeRequest};
use crate::error::ProbeError;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use tracing::debug;

/// Checks that `host:port` accepts a TCP connection within the timeout.
///
/// The hop counter is nominal: no TTL is set on the outbound socket, so the
/// first hop already reaches the destination and the sweep ends there. The
/// evidence reports which local and remote addresses took part.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpReachabilityProbe;

impl TcpReachabilityProbe {
    pub fn new() -> Self {
        Self
    }
}

fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr, ProbeError> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| ProbeError::Resolve {
            host: host.to_string(),
            source,
        })?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ProbeError::NoAddress {
            host: host.to_string(),
        })
}

impl ProbeBackend for TcpReachabilityProbe {
    fn label(&self) -> &str {
        "TCP probe"
    }

    // Every hop targets the same destination, so the first attempt always
    // settles the sweep.
    #[allow(clippy::never_loop)]
    fn probe(&self, request: &ProbeRequest) -> Result<String, ProbeError> {
        let addr = resolve_addr(&request.host, request.port)?;
        let connect_err = |source: io::Error| ProbeError::Connect { addr, source };

        for ttl in 1..=request.max_hops {
            // A zero timeout means no deadline at all.
            let stream = if request.timeout_ms == 0 {
                TcpStream::connect(addr).map_err(connect_err)?
            } else {
                let timeout = request.timeout();
                let stream = TcpStream::connect_timeout(&addr, timeout).map_err(connect_err)?;
                stream.set_read_timeout(Some(timeout)).map_err(connect_err)?;
                stream.set_write_timeout(Some(timeout)).map_err(connect_err)?;
                stream
            };

            let local = stream.local_addr().map_err(connect_err)?;
            let remote = stream.peer_addr().map_err(connect_err)?;
            debug!(%local, %remote, ttl, "tcp connect succeeded");

            return Ok(format!(
                "TTL: {}, Source: {}, Destination: {}\n",
                ttl,
                local.ip(),
                remote.ip()
            ));
        }

        Err(ProbeError::HopLimit {
            max_hops: request.max_hops,
        })
    }

    fn analyze(&self, evidence: &str) -> Analysis {
        analyze_tcp_reachability(evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn ip_literal_resolves_without_lookup() {
        let addr = resolve_addr("127.0.0.1", 8080).unwrap();
        assert_eq!(addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn empty_host_does_not_resolve() {
        let err = resolve_addr("", 80).unwrap_err();
        assert!(
            matches!(err, ProbeError::Resolve { .. } | ProbeError::NoAddress { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn unresolvable_host_fails_without_connecting() {
        let request = ProbeRequest::new("nextping.invalid", 5, 200);
        let err = TcpReachabilityProbe::new().probe(&request).unwrap_err();
        match err {
            ProbeError::Resolve { host, .. } => assert_eq!(host, "nextping.invalid"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn connect_to_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut request = ProbeRequest::new("127.0.0.1", 5, 1000);
        request.port = port;

        let evidence = TcpReachabilityProbe::new().probe(&request).unwrap();
        assert_eq!(
            evidence,
            "TTL: 1, Source: 127.0.0.1, Destination: 127.0.0.1\n"
        );
    }

    #[test]
    fn zero_hops_exhausts_limit() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut request = ProbeRequest::new("127.0.0.1", 0, 1000);
        request.port = port;

        let err = TcpReachabilityProbe::new().probe(&request).unwrap_err();
        assert!(matches!(err, ProbeError::HopLimit { max_hops: 0 }));
        assert_eq!(err.to_string(), "maximum number of hops reached (0)");
    }

    #[test]
    fn zero_timeout_connects_without_deadline() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut request = ProbeRequest::new("127.0.0.1", 1, 0);
        request.port = port;

        let evidence = TcpReachabilityProbe::new().probe(&request).unwrap();
        assert!(evidence.starts_with("TTL: 1, "));
    }

    #[test]
    fn refused_connection_is_an_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let mut request = ProbeRequest::new("127.0.0.1", 3, 1000);
        request.port = port;

        let err = TcpReachabilityProbe::new().probe(&request).unwrap_err();
        assert!(matches!(err, ProbeError::Connect { .. }));
    }

    #[test]
    fn analysis_ignores_evidence() {
        let probe = TcpReachabilityProbe::new();
        let analysis = probe.analyze("TTL: 1, Source: 1.1.1.1, Destination: 2.2.2.2\n");
        assert_eq!(analysis.loss_percent, 0.0);
        assert!(analysis.path_info.is_empty());
    }
}
