// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Tabular rendering of generated scenarios.
//!
//! Parses normalized model output as CSV under the fixed four-column header contract, renders the
//! result as a terminal table, and writes the same content out as a CSV file. Parsing is all or
//! nothing. A response that fails the header contract or carries ragged rows produces an error
//! and no partial table.

use crate::{
    model::{TestCaseRow, TestCaseTable, CSV_HEADER},
    Error, Result,
};

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

/// Parse normalized response text into a test case table.
///
/// The first record must match [`CSV_HEADER`] exactly, with fields compared after trimming.
/// Every following record must carry exactly four fields.
///
/// # Errors
///
/// - Return [`Error::HeaderMismatch`] if the first record differs from the expected header.
/// - Return [`Error::MalformedCsv`] if the body is not valid CSV, or a record carries the wrong
///   number of fields.
///
/// [`Error::HeaderMismatch`]: crate::Error::HeaderMismatch
/// [`Error::MalformedCsv`]: crate::Error::MalformedCsv
#[instrument(skip(data), level = "debug")]
pub fn parse(data: &str) -> Result<TestCaseTable> {
    let mut reader =
        csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    let found: Vec<&str> = headers.iter().collect();
    if found != CSV_HEADER {
        return Err(Error::HeaderMismatch {
            expect: CSV_HEADER.join(", "),
            found: found.join(", "),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(TestCaseRow {
            category: record.get(0).unwrap_or_default().to_string(),
            description: record.get(1).unwrap_or_default().to_string(),
            test_data: record.get(2).unwrap_or_default().to_string(),
            expected_result: record.get(3).unwrap_or_default().to_string(),
        });
    }

    if rows.is_empty() {
        warn!("Model produced a valid header but zero scenario rows");
    }

    debug!("Parsed {} scenario rows", rows.len());

    Ok(TestCaseTable::new(rows))
}

/// Tablize generated scenarios for terminal display.
#[derive(Debug)]
pub struct TablizeScenarios<'table> {
    table: &'table TestCaseTable,
}

impl<'table> TablizeScenarios<'table> {
    /// Construct new scenario tablizer.
    pub fn new(table: &'table TestCaseTable) -> Self {
        Self { table }
    }

    /// Render full scenario table with all four columns.
    pub fn fancy(&self) {
        let mut builder = tabled::builder::Builder::new();
        builder.push_record(CSV_HEADER);

        for row in &self.table.rows {
            builder.push_record([
                row.category.as_str(),
                row.description.as_str(),
                row.test_data.as_str(),
                row.expected_result.as_str(),
            ]);
        }

        let mut table = builder.build();
        table.with(tabled::settings::Style::ascii_rounded());
        info!("Generated scenarios:\n{table}");
    }
}

/// Write generated table as CSV file into target directory.
///
/// Creates the target directory if it does not exist yet. The written content is the fixed
/// header plus every row, exactly what [`TestCaseTable::to_csv`] produces.
///
/// # Errors
///
/// - Will fail if target directory cannot be created.
/// - Will fail if serialization of the table fails, or the file cannot be written.
#[instrument(skip(table), level = "debug")]
pub fn write_csv_file(
    table: &TestCaseTable,
    dir: impl AsRef<Path> + std::fmt::Debug,
    file_name: impl AsRef<str> + std::fmt::Debug,
) -> Result<PathBuf> {
    create_dir_all(dir.as_ref())?;
    let path = dir.as_ref().join(file_name.as_ref());
    write(&path, table.to_csv()?)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq as pretty_assert_eq;
    use simple_test_case::test_case;

    const WELL_FORMED: &str = "\
        Category,Test Case Description,Test Data / Input,Expected Result\n\
        Security,SQL injection probe,' OR 1=1 --,Query rejected\n\
        Boundary,Overflow check,2147483648,Value rejected\n\
        Localization,Emoji input,😀😀😀,Stored and displayed intact\n";

    #[test]
    fn parse_well_formed_body_keeps_rows_in_order() {
        let table = parse(WELL_FORMED).unwrap();

        pretty_assert_eq!(table.len(), 3);
        pretty_assert_eq!(table.rows[0].category, "Security");
        pretty_assert_eq!(table.rows[1].category, "Boundary");
        pretty_assert_eq!(table.rows[2].category, "Localization");
        pretty_assert_eq!(table.rows[2].test_data, "😀😀😀");
    }

    #[test]
    fn parse_accepts_padded_header_fields() {
        let data = "Category, Test Case Description, Test Data / Input, Expected Result\n\
                    Boundary,Max length check,21 character string,Rejected\n";
        let table = parse(data).unwrap();
        pretty_assert_eq!(table.len(), 1);
    }

    #[test_case("Wrong,Header,Entirely,Here\nBoundary,check,data,result\n"; "wrong names")]
    #[test_case("Category,Test Case Description,Test Data / Input\nrow,row,row\n"; "three columns")]
    #[test_case("I am not CSV at all, sorry"; "prose first line")]
    #[test]
    fn smoke_parse_rejects_bad_header(data: &str) {
        assert!(matches!(parse(data), Err(Error::HeaderMismatch { .. })));
    }

    #[test]
    fn parse_rejects_ragged_rows_without_partial_table() {
        let data = "Category,Test Case Description,Test Data / Input,Expected Result\n\
                    Security,only,three\n";
        assert!(matches!(parse(data), Err(Error::MalformedCsv(..))));
    }

    #[test]
    fn parse_empty_input_is_header_mismatch() {
        assert!(matches!(parse(""), Err(Error::HeaderMismatch { .. })));
    }

    #[test]
    fn parse_header_only_yields_empty_table() {
        let data = "Category,Test Case Description,Test Data / Input,Expected Result\n";
        let table = parse(data).unwrap();
        assert!(table.is_empty());
    }
}
