//! Shared data structures for nextping.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TCP_PORT: u16 = 80;

/// Parameters fixed for the lifetime of one monitoring session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub target: String,
    pub probes: usize,
    pub max_hops: u32,
    pub timeout_ms: u64,
    pub port: u16,
}

impl RunConfig {
    pub fn new(target: impl Into<String>, probes: usize, max_hops: u32, timeout_ms: u64) -> Self {
        Self {
            target: target.into(),
            probes,
            max_hops,
            timeout_ms,
            port: DEFAULT_TCP_PORT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeSlot {
    pub probe: usize,
    pub loss_percent: f64,
    pub evidence: String,
    pub path_info: String,
}

impl ProbeSlot {
    fn empty(probe: usize) -> Self {
        Self {
            probe,
            loss_percent: 0.0,
            evidence: String::new(),
            path_info: String::new(),
        }
    }
}

/// One analyzed probe result waiting to be written into its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub loss_percent: f64,
    pub evidence: String,
    pub path_info: String,
}

/// A single table row as handed to a reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    pub run: u64,
    pub probe: usize,
    pub loss_percent: f64,
    pub path_info: String,
}

/// Fixed-length store of the latest result per probe slot.
///
/// Slots are allocated once and only ever overwritten in place, so slot `i`
/// always carries probe number `i + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    slots: Vec<ProbeSlot>,
    run: u64,
}

impl Ledger {
    pub fn new(probes: usize) -> Self {
        Self {
            slots: (1..=probes).map(ProbeSlot::empty).collect(),
            run: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ProbeSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ProbeSlot> {
        self.slots.get(index)
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    /// Overwrites the slot at zero-based `index`. Returns `false` when the
    /// index is out of range, leaving the ledger untouched.
    pub fn record(&mut self, index: usize, update: SlotUpdate) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.loss_percent = update.loss_percent;
                slot.evidence = update.evidence;
                slot.path_info = update.path_info;
                true
            }
            None => false,
        }
    }

    pub fn advance_run(&mut self) -> u64 {
        self.run += 1;
        self.run
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.slots
            .iter()
            .map(|slot| ReportRow {
                run: self.run,
                probe: slot.probe,
                loss_percent: slot.loss_percent,
                path_info: slot.path_info.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(loss: f64, evidence: &str) -> SlotUpdate {
        SlotUpdate {
            loss_percent: loss,
            evidence: evidence.to_string(),
            path_info: String::new(),
        }
    }

    #[test]
    fn new_ledger_has_numbered_empty_slots() {
        let ledger = Ledger::new(3);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.run(), 1);

        let probes: Vec<usize> = ledger.slots().iter().map(|slot| slot.probe).collect();
        assert_eq!(probes, vec![1, 2, 3]);
        assert!(ledger
            .slots()
            .iter()
            .all(|slot| slot.loss_percent == 0.0 && slot.evidence.is_empty()));
    }

    #[test]
    fn record_overwrites_in_place() {
        let mut ledger = Ledger::new(2);
        assert!(ledger.record(1, update(50.0, "first")));
        assert!(ledger.record(1, update(25.0, "second")));

        assert_eq!(ledger.len(), 2);
        let slot = ledger.slot(1).unwrap();
        assert_eq!(slot.probe, 2);
        assert_eq!(slot.loss_percent, 25.0);
        assert_eq!(slot.evidence, "second");
        assert_eq!(ledger.slot(0).unwrap().evidence, "");
    }

    #[test]
    fn record_out_of_range_is_rejected() {
        let mut ledger = Ledger::new(1);
        assert!(!ledger.record(1, update(10.0, "nope")));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.slot(0).unwrap().loss_percent, 0.0);
    }

    #[test]
    fn rows_carry_current_run() {
        let mut ledger = Ledger::new(2);
        ledger.advance_run();
        ledger.advance_run();

        let rows = ledger.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.run == 3));
        assert_eq!(rows[0].probe, 1);
        assert_eq!(rows[1].probe, 2);
    }

    #[test]
    fn empty_ledger_is_allowed() {
        let ledger = Ledger::new(0);
        assert!(ledger.is_empty());
        assert!(ledger.rows().is_empty());
    }

    #[test]
    fn run_config_serializes_port() {
        let config = RunConfig::new("example.com", 3, 5, 200).with_port(443);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["port"], 443);
        assert_eq!(json["target"], "example.com");
        assert_eq!(RunConfig::new("a", 1, 1, 1).port, DEFAULT_TCP_PORT);
    }
}
