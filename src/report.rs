//! Report and summary writers
//!
//! Each stream becomes a tab-delimited table with one row per event. The
//! run as a whole is summarised as a single JSON object holding per-stream
//! counts, flagged intervals and the correlation result.

use crate::error::Result;
use crate::pipeline::PipelineOutput;
use gait_analysis::{AnnotatedEventStream, QualityFlag};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File the summary is written to by [`write_reports`]
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    stream: &'a str,
    timestamp: f64,
    value: Option<f64>,
    kind: String,
    interval: Option<f64>,
    flag: &'static str,
}

fn flag_label(flag: Option<QualityFlag>) -> &'static str {
    match flag {
        Some(QualityFlag::Error) => "Error",
        Some(QualityFlag::Warning) => "Warning",
        Some(QualityFlag::Normal) | None => "",
    }
}

/// Write one stream as a tab-delimited table with a header row
pub fn write_event_report<W: Write>(
    writer: W,
    name: &str,
    stream: &AnnotatedEventStream,
) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    for row in stream.rows() {
        csv.serialize(ReportRow {
            stream: name,
            timestamp: row.timestamp,
            value: row.value,
            kind: row.kind.to_string(),
            interval: row.interval,
            flag: flag_label(row.flag),
        })?;
    }
    csv.flush()?;

    debug!(stream = name, rows = stream.len(), "event report written");
    Ok(())
}

/// Nested summary of a pipeline run
pub fn summary_json(output: &PipelineOutput) -> Result<Value> {
    let mut streams = serde_json::Map::new();
    for s in &output.streams {
        let flagged: Vec<Value> = s
            .events
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_flagged())
            .map(|(index, row)| {
                json!({
                    "index": index,
                    "timestamp": row.timestamp,
                    "interval": row.interval,
                    "flag": flag_label(row.flag),
                })
            })
            .collect();

        streams.insert(
            s.name.clone(),
            json!({
                "events": s.events.len(),
                "quality": s.events.summary(),
                "flagged": flagged,
            }),
        );
    }

    Ok(json!({
        "detection_mode": output.detection_mode,
        "streams": streams,
        "correlation": serde_json::to_value(&output.analysis)?,
    }))
}

pub fn write_summary<W: Write>(writer: W, output: &PipelineOutput) -> Result<()> {
    serde_json::to_writer_pretty(writer, &summary_json(output)?)?;
    Ok(())
}

/// Write `<stream>.tsv` for every stream plus [`SUMMARY_FILE`] into `dir`
pub fn write_reports(dir: impl AsRef<Path>, output: &PipelineOutput) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(output.streams.len() + 1);
    for s in &output.streams {
        let path = dir.join(format!("{}.tsv", s.name));
        write_event_report(File::create(&path)?, &s.name, &s.events)?;
        written.push(path);
    }

    let path = dir.join(SUMMARY_FILE);
    let mut file = File::create(&path)?;
    write_summary(&mut file, output)?;
    writeln!(file)?;
    written.push(path);

    info!(files = written.len(), dir = %dir.display(), "reports written");
    Ok(written)
}
