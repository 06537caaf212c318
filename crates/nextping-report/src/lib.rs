//! Live rendering of the probe ledger.

pub mod json;
pub mod table;
pub mod terminal;

pub use json::JsonReporter;
pub use table::{format_cells, render_table, HEADER};
pub use terminal::TableReporter;

use nextping_model::Ledger;
use std::fmt;
use std::io;

/// Sink that redraws the whole ledger on every refresh.
pub trait LiveReporter {
    fn refresh(&mut self, ledger: &Ledger) -> io::Result<()>;

    /// Called when the probe in slot `probe` (1-based) failed this round.
    fn probe_failed(
        &mut self,
        probe: usize,
        label: &str,
        error: &dyn fmt::Display,
    ) -> io::Result<()>;
}

impl<T: LiveReporter + ?Sized> LiveReporter for Box<T> {
    fn refresh(&mut self, ledger: &Ledger) -> io::Result<()> {
        (**self).refresh(ledger)
    }

    fn probe_failed(
        &mut self,
        probe: usize,
        label: &str,
        error: &dyn fmt::Display,
    ) -> io::Result<()> {
        (**self).probe_failed(probe, label, error)
    }
}
