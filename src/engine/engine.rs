use crate::error::TransformError;
use crate::header::{decode_record, locate_header, HeaderSet};
use crate::transaction::{StatementRow, TransactionType, XeroTransaction, XERO_HEADERS};

use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::{Read, Write};
use tracing::{debug, warn};

/// Counters for one run of the transform.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransformSummary {
    /// Rows written to the import file.
    pub transactions: usize,
    pub skipped: usize,
    pub malformed: usize,
    pub credit_total: Decimal,
    pub debit_total: Decimal,
}

pub struct Transformer {
    summary: TransformSummary,
}

impl Transformer {
    pub fn new() -> Self {
        Self {
            summary: TransformSummary::default(),
        }
    }

    pub fn summary(&self) -> &TransformSummary {
        &self.summary
    }

    /// Turns one data row into an import record. `Ok(None)` means the row is
    /// not a transaction and was skipped. Skip rows are recognised by their
    /// date cell alone, whatever their width.
    pub fn apply_row(
        &mut self,
        headers: &HeaderSet,
        record: &StringRecord,
    ) -> Result<Option<XeroTransaction>, TransformError> {
        let row = StatementRow::zip(headers, record);
        debug!(?row, "Next transaction");

        if let Some(reason) = row.skip_reason() {
            debug!(date = row.date(), %reason, "Skipping row");
            self.summary.skipped += 1;
            return Ok(None);
        }

        if record.len() != headers.len() {
            self.summary.malformed += 1;
            return Err(TransformError::ColumnCountMismatch {
                line: record.position().map(|pos| pos.line()).unwrap_or(0),
                expected: headers.len(),
                found: record.len(),
            });
        }

        self.summary.transactions += 1;

        let tx = XeroTransaction::from(&row);
        self.add_to_totals(&tx);

        Ok(Some(tx))
    }

    fn add_to_totals(&mut self, tx: &XeroTransaction) {
        let Some(kind) = tx.transaction_type else {
            return;
        };

        let Some(amount) = tx.signed_amount() else {
            debug!(date = %tx.date, amount = ?tx.amount, "Amount is not a decimal, left out of totals");
            return;
        };

        match kind {
            TransactionType::Credit => self.summary.credit_total += amount,
            TransactionType::Debit => self.summary.debit_total -= amount,
        }
    }

    /// Reads the statement top to bottom and writes the import file in step.
    ///
    /// Fails without writing anything when the header row never shows up.
    /// Malformed rows are logged and skipped; any read or write failure aborts
    /// the run, leaving whatever was already flushed in place. Counters start
    /// from zero on every call.
    pub fn run<R: Read, W: Write>(
        &mut self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<TransformSummary, TransformError> {
        self.summary = TransformSummary::default();

        let mut records = reader.byte_records();
        let headers = locate_header(&mut records)?;

        writer.write_record(XERO_HEADERS)?;
        writer.flush()?;

        for result in records {
            let record = decode_record(result?);

            match self.apply_row(&headers, &record) {
                Ok(Some(tx)) => {
                    writer.serialize(&tx)?;
                    writer.flush()?;
                }
                Ok(None) => {}
                Err(e @ TransformError::ColumnCountMismatch { .. }) => {
                    warn!("Skipping malformed row: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        writer.flush()?;

        Ok(self.summary.clone())
    }
}
