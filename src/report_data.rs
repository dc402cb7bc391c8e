//! # Calibration Report Ingestion
//!
//! This module reads ALS calibration reports from disk and turns them into
//! [`Report`] values for the core. It owns all file-system access; nothing
//! downstream of it performs I/O.
//!
//! ## Report Format
//!
//! Reports are JSON documents written by the calibration station:
//! ```json
//! {
//!   "NodeProperties": { "sys/HardwareSerialNumber": "ALS-0001", ... },
//!   "AlsData": [
//!     { "Sample": { "x": 1024, "y": 1030, "z": 2040 }, ... },
//!     ...
//!   ]
//! }
//! ```
//! Fields not listed above are ignored.
//!
//! ## Discovery
//!
//! [`ReportDirectory::paths`] lists `*.json` files in the order the file
//! system enumerates them. The listing is lazy and can be restarted by
//! calling it again.
//!
//! ## Error Handling
//!
//! - **Missing or mistyped fields**: [`ReportError::Malformed`]; no partial
//!   report is produced
//! - **File system issues**: [`ReportError::Io`]

use crate::{RawSample, Report};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Reading a report file or listing the directory failed
    #[error("report IO on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Required fields are missing or have the wrong shape
    #[error("malformed report {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// Wire layout of a report file.

#[derive(Deserialize)]
struct ReportFile {
    #[serde(rename = "NodeProperties")]
    node_properties: NodeProperties,
    #[serde(rename = "AlsData")]
    als_data: Vec<AlsEntry>,
}

#[derive(Deserialize)]
struct NodeProperties {
    #[serde(rename = "sys/HardwareSerialNumber")]
    hardware_serial_number: String,
}

#[derive(Deserialize)]
struct AlsEntry {
    #[serde(rename = "Sample")]
    sample: RawSample,
}

impl From<ReportFile> for Report {
    fn from(file: ReportFile) -> Self {
        Report {
            serial_number: file.node_properties.hardware_serial_number,
            samples: file.als_data.into_iter().map(|entry| entry.sample).collect(),
        }
    }
}

/// Parse a report from JSON text. `origin` is only used in error messages.
pub fn parse_report(json: &str, origin: &Path) -> Result<Report, ReportError> {
    serde_json::from_str::<ReportFile>(json)
        .map(Report::from)
        .map_err(|source| ReportError::Malformed {
            path: origin.to_path_buf(),
            source,
        })
}

/// Read and parse a single report file.
pub fn load_report(path: &Path) -> Result<Report, ReportError> {
    let json = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&json, path)
}

/// A directory of report files.
#[derive(Clone, Debug)]
pub struct ReportDirectory {
    root: PathBuf,
}

impl ReportDirectory {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily list `*.json` files in enumeration order.
    ///
    /// Entries that cannot be read are skipped. Each call lists the
    /// directory afresh.
    pub fn paths(&self) -> Result<impl Iterator<Item = PathBuf>, ReportError> {
        let entries = fs::read_dir(&self.root).map_err(|source| ReportError::Io {
            path: self.root.clone(),
            source,
        })?;

        Ok(entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_report_file(path)))
    }
}

fn is_report_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"{
        "NodeProperties": { "sys/HardwareSerialNumber": "ALS-0042", "sys/Firmware": "1.2.3" },
        "AlsData": [
            { "Sample": { "x": 1024, "y": 1000, "z": 2040 }, "Timestamp": 17 },
            { "Sample": { "x": 1100, "y": 990, "z": 2041 } }
        ]
    }"#;

    #[test]
    fn test_parse_valid_report() {
        let report = parse_report(VALID, Path::new("valid.json")).unwrap();
        assert_eq!(report.serial_number, "ALS-0042");
        assert_eq!(report.samples.len(), 2);
        assert_eq!(
            report.samples[0],
            RawSample {
                x: 1024,
                y: 1000,
                z: 2040
            }
        );
    }

    #[test]
    fn test_empty_sample_list_is_not_malformed() {
        let json = r#"{ "NodeProperties": { "sys/HardwareSerialNumber": "SN" }, "AlsData": [] }"#;
        let report = parse_report(json, Path::new("empty.json")).unwrap();
        assert!(report.samples.is_empty());
    }

    #[test]
    fn test_missing_serial_is_malformed() {
        let json = r#"{ "NodeProperties": {}, "AlsData": [] }"#;
        let err = parse_report(json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, ReportError::Malformed { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_sample_component_is_malformed() {
        let json = r#"{
            "NodeProperties": { "sys/HardwareSerialNumber": "SN" },
            "AlsData": [ { "Sample": { "x": 1, "y": 2 } } ]
        }"#;
        let err = parse_report(json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, ReportError::Malformed { .. }));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let json = r#"{
            "NodeProperties": { "sys/HardwareSerialNumber": "SN" },
            "AlsData": [ { "Sample": { "x": "left", "y": 2, "z": 3 } } ]
        }"#;
        assert!(matches!(
            parse_report(json, Path::new("bad.json")),
            Err(ReportError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_report(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn test_directory_lists_only_json_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), VALID).unwrap();
        fs::write(dir.path().join("b.json"), VALID).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let reports = ReportDirectory::new(dir.path());
        let mut names: Vec<String> = reports
            .paths()
            .unwrap()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.json", "b.json"]);

        // Restartable: a second listing sees the same files
        assert_eq!(reports.paths().unwrap().count(), 2);

        let loaded = load_report(&dir.path().join("a.json")).unwrap();
        assert_eq!(loaded.serial_number, "ALS-0042");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let reports = ReportDirectory::new("/nonexistent/reports");
        assert!(matches!(reports.paths(), Err(ReportError::Io { .. })));
    }
}
