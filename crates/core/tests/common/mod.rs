//! Common test helpers for dataset integration tests

use std::io::Write;
use tempfile::NamedTempFile;

/// Write CSV content to a temporary file that lives as long as the handle
pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

/// The three-record directory used across scenarios
pub const SCENARIO_CSV: &str = "\
name,state,district
ABC College (Id:12),X,D1
XYZ Inst,X,D2
ABC Tech,Y,D3
";
