use crate::header::HeaderSet;

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder the bank export uses for an absent value.
pub const NIL_SENTINEL: &str = "<nil>";
/// Date cell of the section-break row between preamble blocks.
pub const SECTION_BREAK: &str = "Transactions";

pub const DATE: &str = "Date";
pub const DESCRIPTION: &str = "Description";
pub const CUSTOMER_REFERENCE: &str = "Customer Reference";
pub const BANK_REFERENCE: &str = "Bank Reference";
pub const CREDIT: &str = "Credit";
pub const DEBIT: &str = "Debit";

/// Header row of the Xero bank statement import.
pub const XERO_HEADERS: [&str; 7] = [
    "*Date",
    "*Amount",
    "Payee",
    "Description",
    "Reference",
    "Cheque Number",
    "Transaction Type",
];

/// One input record keyed by canonical header name.
#[derive(Debug)]
pub struct StatementRow<'a> {
    fields: HashMap<&'a str, &'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingDate,
    SectionBreak,
    RepeatedHeader,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingDate => write!(f, "missing date"),
            SkipReason::SectionBreak => write!(f, "section break"),
            SkipReason::RepeatedHeader => write!(f, "repeated header"),
        }
    }
}

impl<'a> StatementRow<'a> {
    /// Pairs each cell with the header at the same position. Cells beyond the
    /// header width are dropped, missing trailing cells are simply absent.
    pub fn zip(headers: &'a HeaderSet, record: &'a StringRecord) -> Self {
        Self {
            fields: headers.names().zip(record.iter()).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.fields.get(name).copied()
    }

    /// Field value, or an empty string when the column is absent.
    pub fn field(&self, name: &str) -> &'a str {
        self.get(name).unwrap_or("")
    }

    /// Field value when it carries data: neither empty nor the nil sentinel.
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.get(name)
            .filter(|value| !value.is_empty() && *value != NIL_SENTINEL)
    }

    pub fn date(&self) -> &'a str {
        self.field(DATE)
    }

    /// Why this row is not a transaction, if it isn't one.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self.date() {
            "" | NIL_SENTINEL => Some(SkipReason::MissingDate),
            SECTION_BREAK => Some(SkipReason::SectionBreak),
            crate::header::DATE_SIGNATURE => Some(SkipReason::RepeatedHeader),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    Credit,
    Debit,
}

/// A row of the Xero import file. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XeroTransaction {
    pub date: String,
    pub amount: Option<String>,
    pub payee: String,
    pub description: String,
    pub reference: String,
    pub cheque_number: String,
    pub transaction_type: Option<TransactionType>,
}

impl From<&StatementRow<'_>> for XeroTransaction {
    fn from(row: &StatementRow<'_>) -> Self {
        let mut tx = XeroTransaction {
            date: row.date().to_string(),
            amount: None,
            payee: String::new(),
            description: row.field(CUSTOMER_REFERENCE).to_string(),
            reference: format!("{} {}", row.field(DESCRIPTION), row.field(BANK_REFERENCE)),
            cheque_number: String::new(),
            transaction_type: None,
        };

        if let Some(credit) = row.value(CREDIT) {
            tx.amount = Some(credit.to_string());
            tx.transaction_type = Some(TransactionType::Credit);
        }

        // Evaluated after credit, so a row carrying both ends up as a debit
        if let Some(debit) = row.value(DEBIT) {
            tx.amount = Some(format!("-{}", debit));
            tx.transaction_type = Some(TransactionType::Debit);
        }

        tx
    }
}

impl XeroTransaction {
    /// Amount as a decimal, ignoring thousands separators. `None` when the
    /// row has no amount or the bank wrote something that isn't a number.
    pub fn signed_amount(&self) -> Option<Decimal> {
        let amount = self.amount.as_deref()?.replace(',', "");
        Decimal::from_str(&amount).ok()
    }
}
