//! # DIAN Report Analyzer
//!
//! A library for turning a DIAN transaction export (invoice-level rows
//! with issue date, amounts, document type, and direction) into a monthly
//! aggregation report: a wide per-group summary table, percentage-of-annual
//! rows, and a whole-dataset monthly trend series, plus exportable
//! artifacts (CSV summary table, JSON chart document).
//!
//! ## Pipeline
//!
//! One synchronous batch run per uploaded table, no shared state between
//! invocations:
//!
//! 1. **Validator** — required columns present, else an error naming every
//!    missing column.
//! 2. **Normalizer** — strict `%d-%m-%Y` date parsing and numeric coercion;
//!    failures become counted nulls, not errors.
//! 3. **Aggregator** — (document type × direction) × month grouped sums,
//!    zero-filled.
//! 4. **Percentage deriver** — per-row month share of the annual total.
//! 5. **Series builder** — whole-dataset monthly tax sums for the trend
//!    chart.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dian_report_analyzer::{analyze_report, RawTable};
//!
//! let table = RawTable::from_csv_path("export.csv")?;
//! let report = analyze_report(&table)?;
//! for row in &report.aggregates {
//!     println!("{} / {}: {}", row.document_type, row.direction.name(), row.annual_total);
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod normalizer;
pub mod percentage;
pub mod schema;
pub mod series;
pub mod validator;

pub use aggregate::aggregate;
pub use error::{ReportError, Result};
pub use export::{write_chart_document, write_summary_csv, ChartDocument};
pub use ingestion::RawTable;
pub use normalizer::normalize;
pub use percentage::derive_percentages;
pub use schema::*;
pub use series::build_series;
pub use validator::validate_columns;

use log::{debug, info};

/// Runs the full pipeline with a fixed set of options.
pub struct ReportAnalyzer {
    options: ReportOptions,
}

impl ReportAnalyzer {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Processes one uploaded table into a [`Report`].
    ///
    /// Fatal conditions (missing columns) abort before any aggregation
    /// and produce nothing; coercion failures and zero-total groups are
    /// carried in [`Report::warnings`] alongside the produced data.
    pub fn process(&self, table: &RawTable) -> Result<Report> {
        info!("Processing report: {} input rows", table.row_count());

        validate_columns(table, &self.options.columns)?;

        let (records, counts) = normalize(table, &self.options)?;

        let aggregates = aggregate(&records, self.options.basis);
        let (percentages, zero_total_groups) = derive_percentages(&aggregates);
        let series = build_series(&records);

        let warnings = Warnings {
            invalid_dates: counts.invalid_dates,
            invalid_totals: counts.invalid_totals,
            invalid_taxes: counts.invalid_taxes,
            zero_total_groups,
        };
        if !warnings.is_empty() {
            debug!("Non-fatal conditions: {warnings:?}");
        }

        info!(
            "Report complete: {} aggregate rows, {} percentage rows",
            aggregates.len(),
            percentages.len()
        );

        Ok(Report {
            aggregates,
            percentages,
            series,
            warnings,
        })
    }
}

/// Convenience entry point using [`ReportOptions::default`].
pub fn analyze_report(table: &RawTable) -> Result<Report> {
    ReportAnalyzer::new(ReportOptions::default()).process(table)
}
