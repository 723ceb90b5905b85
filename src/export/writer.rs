//! CSV serialization of match records.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::types::MatchRecord;

/// Column order of the output file.
pub const HEADER: [&str; 4] = ["id", "name", "node_list", "coord_list"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to stringify list: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Row<'a> {
    id: &'a str,
    name: &'a str,
    node_list: String,
    coord_list: String,
}

/// Write `records` to `path`, replacing any existing file.
pub fn write_csv(path: &Path, records: &[MatchRecord]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records)?;

    tracing::info!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(())
}

/// Write the header and one row per record. Nested lists are stored as JSON arrays.
pub fn write_records<W: io::Write>(sink: W, records: &[MatchRecord]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(Row {
            id: &record.id,
            name: &record.name,
            node_list: serde_json::to_string(&record.node_list)?,
            coord_list: serde_json::to_string(&record.coord_list)?,
        })?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
