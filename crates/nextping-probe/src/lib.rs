//! Probe backends, target resolution and evidence analysis.

pub mod analyze;
pub mod backend;
pub mod error;
pub mod path_trace;
pub mod resolve;
pub mod tcp;

pub use analyze::{analyze_path_trace, analyze_tcp_reachability, Analysis};
pub use backend::{ProbeBackend, ProbeRequest};
pub use error::ProbeError;
pub use path_trace::PathTraceProbe;
pub use resolve::resolve_target;
pub use tcp::TcpReachabilityProbe;
