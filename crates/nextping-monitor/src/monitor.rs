use crate::stop::StopSignal;
use nextping_model::{Ledger, RunConfig};
use nextping_probe::{ProbeBackend, ProbeRequest};
use nextping_report::LiveReporter;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub round_pause: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            round_pause: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Probes every slot in order, keeps the ledger current and redraws the
/// reporter after each successful probe.
///
/// The run counter advances once per successful slot update, so displayed
/// run numbers move faster than rounds. A failed probe leaves its slot as
/// it was and does not advance the counter.
pub struct Monitor<B, R> {
    backend: B,
    reporter: R,
    request: ProbeRequest,
    ledger: Ledger,
    settings: MonitorSettings,
}

impl<B: ProbeBackend, R: LiveReporter> Monitor<B, R> {
    pub fn new(config: &RunConfig, backend: B, reporter: R) -> Self {
        Self {
            backend,
            reporter,
            request: ProbeRequest::from_config(config),
            ledger: Ledger::new(config.probes),
            settings: MonitorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: MonitorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn request(&self) -> &ProbeRequest {
        &self.request
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs rounds separated by the configured pause until `stop` fires.
    /// Returns the number of rounds that ran to completion.
    pub fn run(&mut self, stop: &StopSignal) -> u64 {
        info!(
            host = %self.request.host,
            probes = self.ledger.len(),
            backend = self.backend.label(),
            "monitor started"
        );

        let mut rounds = 0u64;
        loop {
            let summary = self.round(Some(stop));
            if stop.is_stopped() {
                break;
            }
            rounds += 1;
            debug!(round = rounds, ?summary, "round complete");

            if stop.wait(self.settings.round_pause) {
                break;
            }
        }

        info!(rounds, run = self.ledger.run(), "monitor stopped");
        rounds
    }

    /// One pass over every slot, without pausing afterwards.
    pub fn run_round(&mut self) -> RoundSummary {
        self.round(None)
    }

    fn round(&mut self, stop: Option<&StopSignal>) -> RoundSummary {
        let mut summary = RoundSummary::default();

        for index in 0..self.ledger.len() {
            if stop.is_some_and(StopSignal::is_stopped) {
                break;
            }
            summary.attempted += 1;

            if self.probe_slot(index) {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }

        summary
    }

    fn probe_slot(&mut self, index: usize) -> bool {
        let probe = index + 1;

        let evidence = match self.backend.probe(&self.request) {
            Ok(evidence) => evidence,
            Err(err) => {
                warn!(probe, error = %err, "probe failed");
                if let Err(io_err) = self
                    .reporter
                    .probe_failed(probe, self.backend.label(), &err)
                {
                    warn!(error = %io_err, "failed to report probe error");
                }
                return false;
            }
        };

        let analysis = self.backend.analyze(&evidence);
        debug!(probe, loss = analysis.loss_percent, "probe analyzed");
        self.ledger.record(index, analysis.into_update(evidence));

        if let Err(err) = self.reporter.refresh(&self.ledger) {
            warn!(error = %err, "failed to redraw report");
        }
        self.ledger.advance_run();

        true
    }
}
