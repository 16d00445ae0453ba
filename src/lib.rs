pub mod engine;
pub mod error;
pub mod header;
pub mod transaction;

use crate::engine::{TransformSummary, Transformer};
use crate::error::TransformError;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Record reader for a bank statement export. Rows keep their raw cells:
/// no header handling, no trimming, any width.
pub fn statement_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr)
}

/// Record writer for a Xero import file. The header row is written by the
/// transformer once the statement header has been found.
pub fn import_writer<W: Write>(wtr: W) -> csv::Writer<W> {
    WriterBuilder::new().has_headers(false).from_writer(wtr)
}

pub fn open_statement(path: &Path) -> Result<csv::Reader<File>, TransformError> {
    let file = File::open(path)?;
    Ok(statement_reader(file))
}

pub fn create_import(path: &Path) -> Result<csv::Writer<File>, TransformError> {
    let file = File::create(path)?;
    Ok(import_writer(file))
}

/// Converts the statement at `input` into a Xero import file at `output`.
pub fn transform_file(input: &Path, output: &Path) -> Result<TransformSummary, TransformError> {
    let mut reader = open_statement(input)?;
    let mut writer = create_import(output)?;

    Transformer::new().run(&mut reader, &mut writer)
}
