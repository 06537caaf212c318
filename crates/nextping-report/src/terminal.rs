use crate::table::render_table;
use crate::LiveReporter;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use nextping_model::Ledger;
use std::fmt;
use std::io::{self, Write};

/// Redraws the ledger as a table, clearing the screen first.
pub struct TableReporter<W: Write> {
    out: W,
    clear: bool,
}

impl<W: Write> TableReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: true }
    }

    /// Appends each redraw instead of clearing, for piped output.
    pub fn without_clear(out: W) -> Self {
        Self { out, clear: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LiveReporter for TableReporter<W> {
    fn refresh(&mut self, ledger: &Ledger) -> io::Result<()> {
        if self.clear {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        self.out.write_all(render_table(&ledger.rows()).as_bytes())?;
        self.out.flush()
    }

    fn probe_failed(
        &mut self,
        _probe: usize,
        label: &str,
        error: &dyn fmt::Display,
    ) -> io::Result<()> {
        writeln!(self.out, "Error performing {label}: {error}")?;
        self.out.flush()
    }
}
