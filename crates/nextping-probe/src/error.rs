use std::io;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed ({status}): {output}")]
    Exit {
        program: String,
        status: String,
        output: String,
    },

    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no addresses found for {host}")]
    NoAddress { host: String },

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("maximum number of hops reached ({max_hops})")]
    HopLimit { max_hops: u32 },
}
