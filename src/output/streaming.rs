//! Streaming console formatter
//!
//! `StreamingFormatter` writes each report block as soon as it is flushed,
//! so output appears while the walk is still running.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::aggregate::{ReportGroup, ReportSink, ReportTotals};
use crate::error::Result;

use super::config::OutputConfig;
use super::utils::{indent_for, size_text, total_line};

/// Console report formatter. Writes to stdout unless given another writer.
pub struct StreamingFormatter<W: WriteColor = StandardStream> {
    config: OutputConfig,
    out: W,
}

impl StreamingFormatter<StandardStream> {
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            config,
            out: StandardStream::stdout(choice),
        }
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn with_writer(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: WriteColor> ReportSink for StreamingFormatter<W> {
    fn write_group(&mut self, group: &ReportGroup) -> Result<()> {
        for line in group.lines.iter().filter(|l| self.config.shows_level(l.level)) {
            write!(self.out, "{}", indent_for(line, &self.config))?;

            let mut name_color = ColorSpec::new();
            name_color.set_fg(Some(Color::Blue)).set_bold(line.level == 0);
            self.out.set_color(&name_color)?;
            write!(self.out, "{}", line.name)?;
            self.out.reset()?;

            write!(self.out, " - ")?;
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(self.out, "{}", size_text(line.size, &self.config))?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, totals: &ReportTotals) -> Result<()> {
        if self.config.show_total {
            writeln!(self.out)?;
            writeln!(self.out, "{}", total_line(totals, &self.config))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
