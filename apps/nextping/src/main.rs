mod cli;
mod prompt;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::tty::IsTty;
use nextping_model::RunConfig;
use nextping_monitor::{Monitor, MonitorSettings, StopSignal};
use nextping_probe::{PathTraceProbe, ProbeBackend, TcpReachabilityProbe};
use nextping_report::{JsonReporter, LiveReporter, TableReporter};
use std::io;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let settings = MonitorSettings {
        round_pause: Duration::from_millis(cli.interval_ms),
    };
    let json = cli.json;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let banner = cli.command.banner();

    match cli.command {
        Commands::Trace(args) => {
            let config = prompt::acquire_config(&args.target, &args.probe, &mut input, &mut output)
                .context("failed to read run parameters")?;
            println!("{banner}");
            let backend = PathTraceProbe::with_program(args.traceroute_bin);
            monitor(&config, backend, settings, json)
        }
        Commands::Tcp(args) => {
            let config = prompt::acquire_config(&args.target, &args.probe, &mut input, &mut output)
                .context("failed to read run parameters")?
                .with_port(prompt::parse_port(args.port.as_deref()));
            println!("{banner}");
            monitor(&config, TcpReachabilityProbe::new(), settings, json)
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level: {level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install logger: {err}"))
}

fn monitor<B: ProbeBackend>(
    config: &RunConfig,
    backend: B,
    settings: MonitorSettings,
    json: bool,
) -> Result<()> {
    info!(?config, "run configuration");

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.stop())
        .context("failed to install Ctrl-C handler")?;

    let stdout = io::stdout();
    let reporter: Box<dyn LiveReporter> = if json {
        Box::new(JsonReporter::new(stdout))
    } else if stdout.is_tty() {
        Box::new(TableReporter::new(stdout))
    } else {
        Box::new(TableReporter::without_clear(stdout))
    };

    Monitor::new(config, backend, reporter)
        .with_settings(settings)
        .run(&stop);

    Ok(())
}
