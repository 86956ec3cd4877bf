//! Recording loader
//!
//! Reads the rig's tab-delimited export: a block of free-form header lines,
//! then one row per sample. Only the time, speed and contact-mode columns
//! are kept.

use crate::config::InputConfig;
use crate::error::{Error, Result};
use crate::pipeline::Recording;
use csv::{ReaderBuilder, StringRecord};
use gait_core::{CategoricalStateSeries, TimeSeries};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, instrument};

/// Cell contents treated as a missing value
const MISSING_MARKERS: [&str; 6] = ["", "NaN", "nan", "NA", "N/A", "null"];

/// Open and read a recording from disk
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_recording(path: impl AsRef<Path>, config: &InputConfig) -> Result<Recording> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_recording(file, config)
}

/// Read a recording from any byte source
pub fn read_recording<R: Read>(reader: R, config: &InputConfig) -> Result<Recording> {
    let mut reader = BufReader::new(reader);
    // Header bytes are skipped undecoded; rig metadata is not always UTF-8
    let mut line = Vec::new();
    for _ in 0..config.header_lines {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
    }

    let mut csv = ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut timestamps = Vec::new();
    let mut speed = Vec::new();
    let mut labels = Vec::new();
    let mut record = StringRecord::new();

    while csv.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line()) + config.header_lines as u64;

        let time = cell(&record, config.time_column).ok_or_else(|| Error::MalformedRecord {
            line,
            message: format!("missing time column {}", config.time_column),
        })?;
        timestamps.push(parse_number(time, line, "time")?);

        speed.push(match cell(&record, config.signal_column) {
            Some(value) => Some(parse_number(value, line, "signal")?),
            None => None,
        });

        labels.push(cell(&record, config.label_column).map(str::to_string));
    }

    let speed = TimeSeries::new(timestamps.clone(), speed)?;
    debug!(
        samples = speed.len(),
        interval = ?speed.nominal_interval(),
        "recording read"
    );
    let contact = CategoricalStateSeries::new(timestamps, labels)?;
    Recording::new(speed, contact)
}

/// Trimmed cell contents, `None` when absent or a missing marker
fn cell(record: &StringRecord, column: usize) -> Option<&str> {
    record
        .get(column)
        .map(str::trim)
        .filter(|value| !MISSING_MARKERS.contains(value))
}

fn parse_number(value: &str, line: u64, column: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|e| Error::MalformedRecord {
        line,
        message: format!("{column} value {value:?} is not a number: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> InputConfig {
        InputConfig {
            header_lines: 2,
            time_column: 0,
            signal_column: 1,
            label_column: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_reads_selected_columns() {
        let data = "rig export\nsubject\tX\n0\t4.41\tDC\textra\n1\t4.52\tSC\n2\tNaN\t\n3\t4.60\tSC\n";
        let recording = read_recording(data.as_bytes(), &layout()).unwrap();

        assert_eq!(recording.len(), 4);
        assert_eq!(
            recording.speed().values(),
            &[Some(4.41), Some(4.52), None, Some(4.60)]
        );
        let labels: Vec<Option<&str>> = recording.contact().iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec![Some("DC"), Some("SC"), None, Some("SC")]);
    }

    #[test]
    fn test_short_rows_are_missing() {
        let data = "h1\nh2\n0\t1.0\n1\n";
        let recording = read_recording(data.as_bytes(), &layout()).unwrap();
        assert_eq!(recording.speed().values(), &[Some(1.0), None]);
        assert!(recording.contact().labels().iter().all(Option::is_none));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let data = "h1\nh2\n0\t1.0\tSC\n1\tfast\tSC\n";
        match read_recording(data.as_bytes(), &layout()) {
            Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_latin1_header_is_skipped() {
        let mut data = b"Sujet: Ren\xe9e\nDur\xe9e\t12 s\n".to_vec();
        data.extend_from_slice(b"0\t4.41\tDC\n1\t4.52\tSC\n");
        let recording = read_recording(data.as_slice(), &layout()).unwrap();
        assert_eq!(recording.speed().values(), &[Some(4.41), Some(4.52)]);
        assert_eq!(recording.speed().nominal_interval(), Some(1.0));
    }

    #[test]
    fn test_missing_file() {
        let err = load_recording("/nonexistent/recording.txt", &layout()).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
        assert!(err.to_string().contains("/nonexistent/recording.txt"));
    }
}
