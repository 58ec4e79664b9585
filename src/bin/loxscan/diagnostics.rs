use std::io::{self, Write};

use crate::error::Diagnostic;

/// Collects the lexical errors of a single scan and echoes each one to `sink`
/// as soon as it is reported. A failing sink never stops the collection; the
/// first write error is held until `finish`.
pub struct Diagnostics<W: Write> {
    sink: W,
    had_error: bool,
    reported: Vec<Diagnostic>,
    write_error: Option<io::Error>,
}

impl<W: Write> Diagnostics<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            had_error: false,
            reported: Vec::new(),
            write_error: None,
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.had_error = true;
        log::debug!("lexical error on line {}: {}", diagnostic.line, diagnostic.error);
        if let Err(err) = writeln!(self.sink, "{}", diagnostic) {
            log::warn!("failed to write diagnostic: {}", err);
            self.write_error.get_or_insert(err);
        }
        self.reported.push(diagnostic);
    }

    /// Once set, never cleared.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn reported(&self) -> &[Diagnostic] {
        &self.reported
    }

    /// Flushes the sink and hands it back, or returns the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.write_error.take() {
            return Err(err);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}
