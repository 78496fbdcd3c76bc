use chrono::{Datelike, NaiveDate};
use log::{debug, warn};

use crate::error::Result;
use crate::ingestion::RawTable;
use crate::schema::{BaseFormula, CoercionCounts, Month, NormalizedRecord, ReportOptions};

/// Strict issue-date pattern of the DIAN export: day-month-year.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Coerces the raw table into typed records.
///
/// Cells that fail coercion become nulls, never errors: the row stays in
/// the working set and the failure is counted. A null issue date yields a
/// null month, which keeps the row out of every monthly bucket downstream.
pub fn normalize(
    table: &RawTable,
    options: &ReportOptions,
) -> Result<(Vec<NormalizedRecord>, CoercionCounts)> {
    let columns = &options.columns;
    let mut records = Vec::with_capacity(table.row_count());
    let mut counts = CoercionCounts::default();

    for row in table.rows() {
        let issue_date = parse_date(table.cell(row, &columns.issue_date));
        if issue_date.is_none() {
            counts.invalid_dates += 1;
        }

        let total = parse_amount(table.cell(row, &columns.total));
        if total.is_none() {
            counts.invalid_totals += 1;
        }

        let tax = parse_amount(table.cell(row, &columns.tax));
        if tax.is_none() {
            counts.invalid_taxes += 1;
        }

        let month = issue_date.and_then(|date| Month::from_number(date.month()));
        let base = derive_base(total, tax, options.base_formula);

        records.push(NormalizedRecord {
            issue_date,
            total,
            tax,
            base,
            month,
            document_type: table.cell(row, &columns.document_type).to_string(),
            direction: table.cell(row, &columns.direction).to_string(),
        });
    }

    if counts.invalid_dates > 0 {
        warn!(
            "{} rows had issue dates not matching {} and were excluded from monthly buckets",
            counts.invalid_dates, DATE_FORMAT
        );
    }
    if counts.invalid_numbers() > 0 {
        warn!(
            "{} total and {} tax values failed numeric coercion and were nulled",
            counts.invalid_totals, counts.invalid_taxes
        );
    }
    debug!("Normalized {} rows", records.len());

    Ok((records, counts))
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT).ok()
}

fn parse_amount(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Base is the rounded display amount: the configured formula over the
/// coerced values with nulls as zero, made absolute, then rounded to the
/// nearest integer. `f64::round` rounds half away from zero, so ties on
/// these non-negative magnitudes round up. Rounding is applied here once;
/// downstream sums of Base are never re-rounded.
fn derive_base(total: Option<f64>, tax: Option<f64>, formula: BaseFormula) -> f64 {
    let tax = tax.unwrap_or(0.0);
    let raw = match formula {
        BaseFormula::TaxOnly => tax,
        BaseFormula::TotalMinusTax => total.unwrap_or(0.0) - tax,
    };
    raw.abs().round()
}
