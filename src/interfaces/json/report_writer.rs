use crate::application::placement::Outcome;
use crate::application::router::Routing;
use crate::domain::view::ButtonView;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// What a replayed checkout action produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub routing: Routing,
    pub action: String,
    pub outcome: Option<Outcome>,
    pub error: Option<String>,
    pub view: ButtonView,
    pub navigated_to: Vec<String>,
    pub orders_placed: usize,
}

/// Writes reports as pretty-printed JSON, one document per call.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(&mut self, report: &Report) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
