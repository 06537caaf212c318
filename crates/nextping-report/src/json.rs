use crate::LiveReporter;
use chrono::{SecondsFormat, Utc};
use nextping_model::{Ledger, ReportRow};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

#[derive(Serialize)]
struct Snapshot {
    timestamp_utc: String,
    run: u64,
    rows: Vec<ReportRow>,
}

#[derive(Serialize)]
struct ProbeFailure<'a> {
    timestamp_utc: String,
    probe: usize,
    backend: &'a str,
    error: String,
}

/// Emits one JSON object per line: a snapshot per refresh, or a failure
/// record per failed probe.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<W: Write> LiveReporter for JsonReporter<W> {
    fn refresh(&mut self, ledger: &Ledger) -> io::Result<()> {
        self.emit(&Snapshot {
            timestamp_utc: now_utc(),
            run: ledger.run(),
            rows: ledger.rows(),
        })
    }

    fn probe_failed(
        &mut self,
        probe: usize,
        label: &str,
        error: &dyn fmt::Display,
    ) -> io::Result<()> {
        self.emit(&ProbeFailure {
            timestamp_utc: now_utc(),
            probe,
            backend: label,
            error: error.to_string(),
        })
    }
}
