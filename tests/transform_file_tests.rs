use rust_decimal::Decimal;
use std::fs;
use tempfile::{tempdir, NamedTempFile};
use xero_bank_transform::error::TransformError;
use xero_bank_transform::transform_file;

const IMPORT_HEADER: &str =
    "*Date,*Amount,Payee,Description,Reference,Cheque Number,Transaction Type";

const STATEMENT: &str = r#"Account Name:,EVERYDAY CHEQUE,,,,,
Account Number:,12-3456-7890123-00,,,,,
Transactions,,,,,,
 Date,Description,Customer  Reference,Bank     Reference,Credit,Debit,Running  Balance  
2024-01-05,POS PURCHASE,Groceries,REF123,,42.50,957.50
2024-01-06,DEPOSIT,Salary,REF999,1000.00,,1957.50
<nil>,INTEREST,,,,,1957.50
Transactions,,,,,,
 Date,Description,Customer  Reference,Bank     Reference,Credit,Debit,Running  Balance  
2024-01-07,TRANSFER,"Rent, January",REF555,,"1,200.00",757.50
"#;

#[test]
fn test_transform_file_statement() {
    let input = NamedTempFile::new().unwrap();
    fs::write(&input, STATEMENT).unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let summary = transform_file(input.path(), &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            IMPORT_HEADER,
            "2024-01-05,-42.50,,Groceries,POS PURCHASE REF123,,Debit",
            "2024-01-06,1000.00,,Salary,DEPOSIT REF999,,Credit",
            "2024-01-07,\"-1,200.00\",,\"Rent, January\",TRANSFER REF555,,Debit",
        ]
    );

    assert_eq!(summary.transactions, 3);
    assert_eq!(summary.transactions, lines.len() - 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.malformed, 0);
    assert_eq!(summary.credit_total, Decimal::new(100000, 2));
    assert_eq!(summary.debit_total, Decimal::new(124250, 2));
}

#[test]
fn test_transform_file_without_header() {
    let input = NamedTempFile::new().unwrap();
    fs::write(
        &input,
        "Date,Description,Credit,Debit\n2024-01-06,DEPOSIT,1000.00,\n",
    )
    .unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let result = transform_file(input.path(), &output);

    match result {
        Err(e @ TransformError::HeaderNotFound) => {
            assert_eq!(e.to_string(), "unable to read header row");
        }
        other => panic!("Expected HeaderNotFound, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_transform_file_empty_input() {
    let input = NamedTempFile::new().unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let result = transform_file(input.path(), &output);

    assert!(matches!(result, Err(TransformError::HeaderNotFound)));
}

#[test]
fn test_transform_file_missing_input() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let result = transform_file(&dir.path().join("nonexistent_file.csv"), &output);

    assert!(matches!(result, Err(TransformError::Io(_))));
}

#[test]
fn test_transform_file_without_credit_column() {
    let input = NamedTempFile::new().unwrap();
    fs::write(
        &input,
        " Date,Description,Customer  Reference,Bank     Reference,Debit\n\
         2024-03-01,CARD FEE,Fees,F1,\n\
         2024-03-02,ATM,Cash,A1,60.00\n",
    )
    .unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let summary = transform_file(input.path(), &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().skip(1).collect();
    assert_eq!(
        lines,
        vec![
            "2024-03-01,,,Fees,CARD FEE F1,,",
            "2024-03-02,-60.00,,Cash,ATM A1,,Debit",
        ]
    );
    assert_eq!(summary.transactions, 2);
}

#[test]
fn test_transform_file_large_statement() {
    let input = NamedTempFile::new().unwrap();
    let mut content =
        String::from(" Date,Description,Customer  Reference,Bank     Reference,Credit,Debit\n");

    // Alternate credits and debits, with a section break every tenth row
    for i in 1..=100 {
        if i % 10 == 0 {
            content.push_str("Transactions,,,,,\n");
        } else if i % 2 == 0 {
            content.push_str(&format!("2024-04-01,DEP{},,R{},{}.00,\n", i, i, i));
        } else {
            content.push_str(&format!("2024-04-01,WDL{},,R{},,{}.00\n", i, i, i));
        }
    }
    fs::write(&input, content).unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let summary = transform_file(input.path(), &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(summary.transactions, 90);
    assert_eq!(summary.skipped, 10);
    assert_eq!(written.lines().count(), 91);
    assert_eq!(
        written.lines().nth(1),
        Some("2024-04-01,-1.00,,,WDL1 R1,,Debit")
    );
}

#[test]
fn test_transform_file_latin1_preamble() {
    let input = NamedTempFile::new().unwrap();
    let mut content = b"Account Name:,CAF\xE9 DU PORT LTD,,,,\n".to_vec();
    content.extend_from_slice(
        b" Date,Description,Customer  Reference,Bank     Reference,Credit,Debit\n\
          2024-05-01,DEPOSIT,Takings,D1,250.00,\n",
    );
    fs::write(&input, content).unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("xero.csv");

    let summary = transform_file(input.path(), &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written.lines().collect::<Vec<_>>(),
        vec![IMPORT_HEADER, "2024-05-01,250.00,,Takings,DEPOSIT D1,,Credit"]
    );
    assert_eq!(summary.transactions, 1);
}
