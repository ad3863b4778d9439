//! JSON lines output
//!
//! One JSON object per report block, plus a final totals object when enabled.

use std::io::{self, Stdout, Write};

use serde::Serialize;

use crate::aggregate::{ReportGroup, ReportLine, ReportSink, ReportTotals};
use crate::error::Result;

use super::config::OutputConfig;

#[derive(Serialize)]
struct JsonGroup<'a> {
    group: &'a str,
    size: u64,
    directories: Vec<&'a ReportLine>,
}

#[derive(Serialize)]
struct JsonTotals<'a> {
    totals: &'a ReportTotals,
}

/// Writes report blocks as newline-delimited JSON.
pub struct JsonFormatter<W: Write = Stdout> {
    config: OutputConfig,
    out: W,
}

impl JsonFormatter<Stdout> {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            out: io::stdout(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    pub fn with_writer(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonFormatter<W> {
    fn write_group(&mut self, group: &ReportGroup) -> Result<()> {
        let Some(head) = group.head() else {
            return Ok(());
        };
        let record = JsonGroup {
            group: &head.name,
            size: head.size,
            directories: group
                .lines
                .iter()
                .filter(|l| self.config.shows_level(l.level))
                .collect(),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, totals: &ReportTotals) -> Result<()> {
        if self.config.show_total {
            serde_json::to_writer(&mut self.out, &JsonTotals { totals })?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_group_record() {
        let group = ReportGroup {
            lines: vec![
                ReportLine {
                    name: "x".to_string(),
                    path: PathBuf::from("/r/x"),
                    level: 0,
                    size: 30,
                },
                ReportLine {
                    name: "y".to_string(),
                    path: PathBuf::from("/r/x/y"),
                    level: 1,
                    size: 20,
                },
            ],
        };
        let mut f = JsonFormatter::with_writer(OutputConfig::default(), Vec::new());
        f.write_group(&group).unwrap();
        let text = String::from_utf8(f.into_inner()).unwrap();

        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["group"], "x");
        assert_eq!(value["size"], 30);
        assert_eq!(value["directories"][1]["name"], "y");
        assert_eq!(value["directories"][1]["level"], 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directory_name() {
        use crate::aggregate::report_sizes;
        use crate::tree::WalkerConfig;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::TempDir::new().unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"bad\xff"));
        std::fs::create_dir(&bad).unwrap();
        std::fs::write(bad.join("f"), [0u8; 5]).unwrap();

        let formatter = JsonFormatter::with_writer(OutputConfig::default(), Vec::new());
        let (formatter, totals) =
            report_sizes(dir.path(), WalkerConfig::default(), formatter).unwrap();
        assert_eq!(totals.total, 5);

        let text = String::from_utf8(formatter.into_inner()).unwrap();
        let first = text.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(first).unwrap();
        assert_eq!(value["group"], "bad\u{fffd}");
        assert_eq!(value["size"], 5);
        assert!(
            value["directories"][0]["path"]
                .as_str()
                .unwrap()
                .ends_with("bad\u{fffd}")
        );
    }
}
