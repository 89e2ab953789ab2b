//! Spreadsheet import/export for investments.
//!
//! The interchange format is CSV with a `Date,Weight,Rate,Notes` header.
//! Weight is grams; Rate is per tola (the form users quote). Both are
//! normalized to canonical units (milligrams, per-gram) before anything is
//! stored. Each row validates independently: a bad row becomes a per-row
//! error message and the remaining rows still import.

use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::investments::investments_model::Investment;
use crate::units;

/// Rows at the top of the sheet before data begins (the header row).
const HEADER_ROWS: usize = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated spreadsheet row, still in user-facing units.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// 1-indexed spreadsheet row, counting the header.
    pub row_number: usize,
    pub purchase_date: NaiveDate,
    pub weight_grams: Decimal,
    pub rate_per_tola: Decimal,
    pub notes: Option<String>,
}

/// Outcome of parsing an uploaded sheet: the usable rows plus one message
/// per rejected row.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub rows: Vec<ParsedRow>,
    pub errors: Vec<String>,
}

fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        names.iter().any(|n| h.eq_ignore_ascii_case(n))
    })
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses an uploaded CSV sheet.
///
/// Rows missing any of date, weight, or rate are skipped with an error
/// naming their spreadsheet row; parsing never fails wholesale on a bad row.
pub fn parse_sheet(content: &[u8]) -> Result<ParseOutcome> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| Error::Validation(ValidationError::InvalidInput(e.to_string())))?
        .clone();

    let date_col = column_index(&headers, &["Date"]);
    let weight_col = column_index(&headers, &["Weight"]);
    let rate_col = column_index(&headers, &["Buy Rate", "Rate"]);
    let notes_col = column_index(&headers, &["Notes"]);

    let mut outcome = ParseOutcome::default();

    for (index, record) in reader.records().enumerate() {
        let row_number = index + HEADER_ROWS + 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                outcome.errors.push(format!("Row {}: {}", row_number, e));
                continue;
            }
        };

        let date = field(&record, date_col);
        let weight = field(&record, weight_col);
        let rate = field(&record, rate_col);
        let notes = field(&record, notes_col);

        let (Some(date), Some(weight), Some(rate)) = (date, weight, rate) else {
            outcome
                .errors
                .push(format!("Row {}: Missing required fields", row_number));
            continue;
        };

        let purchase_date = match NaiveDate::parse_from_str(&date, DATE_FORMAT) {
            Ok(d) => d,
            Err(_) => {
                outcome.errors.push(format!(
                    "Row {}: Invalid date '{}' (expected YYYY-MM-DD)",
                    row_number, date
                ));
                continue;
            }
        };
        let weight_grams = match Decimal::from_str(&weight) {
            Ok(w) if w > Decimal::ZERO => w,
            _ => {
                outcome
                    .errors
                    .push(format!("Row {}: Invalid weight '{}'", row_number, weight));
                continue;
            }
        };
        let rate_per_tola = match Decimal::from_str(&rate) {
            Ok(r) if r > Decimal::ZERO => r,
            _ => {
                outcome
                    .errors
                    .push(format!("Row {}: Invalid rate '{}'", row_number, rate));
                continue;
            }
        };

        outcome.rows.push(ParsedRow {
            row_number,
            purchase_date,
            weight_grams,
            rate_per_tola,
            notes,
        });
    }

    Ok(outcome)
}

/// Serializes investments back to the interchange format.
///
/// Inverse of `parse_sheet`: weight comes out in grams and the rate in its
/// per-tola quote form.
pub fn export_sheet(investments: &[Investment]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(["Date", "Weight", "Rate", "Notes"])
        .map_err(|e| Error::Validation(ValidationError::InvalidInput(e.to_string())))?;

    for inv in investments {
        let weight_grams = units::milligrams_to_grams(inv.weight_milligrams)?;
        let rate_per_tola = units::rate_per_gram_to_per_tola(inv.buy_rate_per_gram)?;
        writer
            .write_record([
                inv.purchase_date.format(DATE_FORMAT).to_string(),
                weight_grams.normalize().to_string(),
                rate_per_tola.normalize().to_string(),
                inv.notes.clone().unwrap_or_default(),
            ])
            .map_err(|e| Error::Validation(ValidationError::InvalidInput(e.to_string())))?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Validation(ValidationError::InvalidInput(e.to_string())))
}

/// A blank sheet with the expected header and one example row.
pub fn template_sheet() -> Vec<u8> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    // Writing static records into a Vec cannot fail.
    let _ = writer.write_record(["Date", "Weight", "Rate", "Notes"]);
    let _ = writer.write_record(["2024-01-01", "10.5", "7500", "Example Row"]);
    writer.into_inner().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commodities::Commodity;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_valid_rows() {
        let csv = b"Date,Weight,Rate,Notes\n2024-01-01,10.5,7500,First\n2024-02-01,4,363000,\n";
        let outcome = parse_sheet(csv).unwrap();
        assert_eq!(outcome.errors.len(), 0);
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].weight_grams, dec!(10.5));
        assert_eq!(outcome.rows[0].rate_per_tola, dec!(7500));
        assert_eq!(outcome.rows[0].notes.as_deref(), Some("First"));
        assert_eq!(outcome.rows[1].notes, None);
    }

    #[test]
    fn missing_weight_skips_only_that_row() {
        let csv = b"Date,Weight,Rate,Notes\n\
            2024-01-01,10.5,7500,a\n\
            2024-01-02,,7600,b\n\
            2024-01-03,2,7700,c\n";
        let outcome = parse_sheet(csv).unwrap();
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        // Row 2 of the data is spreadsheet row 3 (header is row 1).
        assert_eq!(outcome.errors[0], "Row 3: Missing required fields");
    }

    #[test]
    fn header_match_is_case_insensitive_and_accepts_buy_rate() {
        let csv = b"date,weight,Buy Rate,notes\n2024-01-01,1,100,x\n";
        let outcome = parse_sheet(csv).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].rate_per_tola, dec!(100));
    }

    #[test]
    fn bad_date_and_bad_numbers_report_their_rows() {
        let csv = b"Date,Weight,Rate,Notes\n\
            01/02/2024,1,100,\n\
            2024-01-02,-5,100,\n\
            2024-01-03,1,abc,\n";
        let outcome = parse_sheet(csv).unwrap();
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.errors[0].starts_with("Row 2: Invalid date"));
        assert!(outcome.errors[1].starts_with("Row 3: Invalid weight"));
        assert!(outcome.errors[2].starts_with("Row 4: Invalid rate"));
    }

    #[test]
    fn export_writes_grams_and_per_tola() {
        let inv = Investment {
            id: "inv-1".to_string(),
            commodity: Commodity::Gold,
            weight_milligrams: 10500,
            buy_rate_per_gram: dec!(1000),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: Some("kept".to_string()),
            owner_id: "user-1".to_string(),
        };
        let bytes = export_sheet(&[inv]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Date,Weight,Rate,Notes"));
        assert_eq!(lines.next(), Some("2024-01-01,10.5,11664,kept"));
    }

    #[test]
    fn exported_sheet_parses_back() {
        let inv = Investment {
            id: "inv-1".to_string(),
            commodity: Commodity::Silver,
            weight_milligrams: 46656,
            buy_rate_per_gram: dec!(90),
            purchase_date: NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
            notes: None,
            owner_id: "user-1".to_string(),
        };
        let bytes = export_sheet(&[inv.clone()]).unwrap();
        let outcome = parse_sheet(&bytes).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].weight_grams, dec!(46.656));
        // 90/g quoted back as per tola.
        assert_eq!(outcome.rows[0].rate_per_tola, dec!(1049.76));
    }

    #[test]
    fn template_has_header_and_example() {
        let text = String::from_utf8(template_sheet()).unwrap();
        assert!(text.starts_with("Date,Weight,Rate,Notes\n"));
        assert!(text.contains("Example Row"));
    }
}
