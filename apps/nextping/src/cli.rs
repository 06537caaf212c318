use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nextping", version, about = "Continuous path loss monitor")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit one JSON object per refresh instead of redrawing a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Pause between probe rounds
    #[arg(long, global = true, default_value_t = 1000)]
    pub interval_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Trace(TraceArgs),
    Tcp(TcpArgs),
}

impl Commands {
    /// Printed once before the first round, whichever backend runs.
    pub fn banner(&self) -> &'static str {
        "Traceroute results:"
    }
}

/// Values not given here are asked for interactively.
#[derive(Args, Debug, Default)]
pub struct ProbeArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub probes: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_hops: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub timeout_ms: Option<i64>,
}

#[derive(Args)]
#[command(
    about = "Trace the path with ICMP traceroute. Only target networks you own or have permission to test."
)]
pub struct TraceArgs {
    /// Target URL or hostname
    pub target: String,

    #[command(flatten)]
    pub probe: ProbeArgs,

    #[arg(long, default_value = "traceroute")]
    pub traceroute_bin: PathBuf,
}

#[derive(Args)]
#[command(about = "Check TCP reachability of a port on the target")]
pub struct TcpArgs {
    /// Target URL or hostname
    pub target: String,

    /// Destination port; anything that is not a valid port falls back to 80
    pub port: Option<String>,

    #[command(flatten)]
    pub probe: ProbeArgs,
}
