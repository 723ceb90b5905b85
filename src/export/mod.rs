//! Tabular export of matched roads.
//!
//! One CSV per run, header `id,name,node_list,coord_list`, rows in the order
//! features were processed. The file is overwritten, never appended.

pub mod writer;

pub use writer::{write_csv, write_records, ExportError, HEADER};
