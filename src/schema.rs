use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar months as a fixed, compile-time dimension.
///
/// Every monthly breakdown in the crate is keyed by this enum, so month
/// columns always exist (zero-filled when empty) and always come out in
/// calendar order, never lexical or appearance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Maps a 1-based calendar month number to the enum, as produced by
    /// `chrono::Datelike::month`.
    pub fn from_number(number: u32) -> Option<Month> {
        match number {
            1..=12 => Some(Month::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// 0-based position within the calendar year, used to index the
    /// fixed-size monthly sum arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

/// Whether a transaction line was issued or received by the reporting
/// entity. Output order is fixed: Issued before Received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Issued,
    Received,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Issued, Direction::Received];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Issued => "Issued",
            Direction::Received => "Received",
        }
    }

    /// Matches a raw cell value against this direction. DIAN exports carry
    /// the Spanish values, so both renderings are accepted. Anything else
    /// matches neither direction and falls outside every bucket.
    pub fn matches(self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Direction::Issued => {
                value.eq_ignore_ascii_case("Issued") || value.eq_ignore_ascii_case("Emitido")
            }
            Direction::Received => {
                value.eq_ignore_ascii_case("Received") || value.eq_ignore_ascii_case("Recibido")
            }
        }
    }
}

/// Column labels expected in the uploaded export, in the deployment
/// locale. Defaults are the labels of the DIAN Excel export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub issue_date: String,
    pub total: String,
    pub tax: String,
    pub document_type: String,
    pub direction: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            issue_date: "Fecha Emisión".to_string(),
            total: "Total".to_string(),
            tax: "IVA".to_string(),
            document_type: "Tipo de documento".to_string(),
            direction: "Grupo".to_string(),
        }
    }
}

impl ColumnNames {
    /// The required labels in a fixed reporting order, used by the
    /// validator to name every missing column.
    pub fn required(&self) -> [&str; 5] {
        [
            &self.issue_date,
            &self.total,
            &self.tax,
            &self.document_type,
            &self.direction,
        ]
    }
}

/// Which formula produces the per-row Base display amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseFormula {
    /// Base = |tax|, nulls as zero.
    TaxOnly,
    /// Base = |total − tax|, nulls as zero.
    TotalMinusTax,
}

/// Which per-row amount the aggregator sums per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SumBasis {
    /// The rounded Base amount. Rounding happens once, when Base is
    /// derived; sums of Base are never re-rounded.
    Base,
    /// The raw tax amount, nulls as zero.
    Tax,
}

/// Pipeline configuration. The historical tool shipped two near-identical
/// pipelines differing only in base formula and rounding; both live here
/// as explicit options instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub columns: ColumnNames,
    pub base_formula: BaseFormula,
    pub basis: SumBasis,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            base_formula: BaseFormula::TaxOnly,
            basis: SumBasis::Base,
        }
    }
}

/// One input row after coercion. Unparseable dates and amounts are null
/// here, not errors; the row stays in the working set either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub issue_date: Option<NaiveDate>,
    pub total: Option<f64>,
    pub tax: Option<f64>,
    /// Rounded display amount per the configured [`BaseFormula`].
    pub base: f64,
    /// Derived from `issue_date`; null dates give a null month, which
    /// excludes the row from every monthly bucket downstream.
    pub month: Option<Month>,
    pub document_type: String,
    /// Kept as the raw cell value; bucket membership is decided by
    /// [`Direction::matches`].
    pub direction: String,
}

/// Coercion failure counts reported by the normalizer. Non-fatal: the
/// affected rows continue through the pipeline with null fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionCounts {
    pub invalid_dates: usize,
    pub invalid_totals: usize,
    pub invalid_taxes: usize,
}

impl CoercionCounts {
    pub fn invalid_numbers(&self) -> usize {
        self.invalid_totals + self.invalid_taxes
    }
}

/// One wide row of the summary table: a (document type, direction) bucket
/// with its twelve monthly sums and annual total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub document_type: String,
    pub direction: Direction,
    /// Indexed by [`Month::index`], zero-filled for empty months.
    pub months: [f64; 12],
    /// Always equals the sum of `months`.
    pub annual_total: f64,
}

impl AggregateRow {
    pub fn month_value(&self, month: Month) -> f64 {
        self.months[month.index()]
    }
}

/// Percentage-of-annual-total variant of an [`AggregateRow`]. Rows whose
/// annual total is zero have no percentage row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageRow {
    pub document_type: String,
    pub direction: Direction,
    /// Each value is monthly sum / annual total × 100.
    pub shares: [f64; 12],
}

impl PercentageRow {
    pub fn share(&self, month: Month) -> f64 {
        self.shares[month.index()]
    }
}

/// Whole-dataset monthly tax sums, independent of document type and
/// direction. Feeds the trend chart only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub totals: [f64; 12],
}

impl MonthlySeries {
    pub fn total_for(&self, month: Month) -> f64 {
        self.totals[month.index()]
    }
}

/// Non-fatal conditions accumulated across one pipeline run, reported
/// alongside the produced report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warnings {
    /// Rows whose issue date failed strict `%d-%m-%Y` parsing.
    pub invalid_dates: usize,
    /// Rows whose total failed numeric coercion.
    pub invalid_totals: usize,
    /// Rows whose tax failed numeric coercion.
    pub invalid_taxes: usize,
    /// (document type, direction) buckets skipped during percentage
    /// derivation because their annual total was zero.
    pub zero_total_groups: usize,
}

impl Warnings {
    pub fn is_empty(&self) -> bool {
        *self == Warnings::default()
    }
}

/// Output of one pipeline invocation: plain data only, ready for the
/// export writers or any rendering sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub aggregates: Vec<AggregateRow>,
    pub percentages: Vec<PercentageRow>,
    pub series: MonthlySeries,
    pub warnings: Warnings,
}
