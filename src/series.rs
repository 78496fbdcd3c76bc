use crate::schema::{MonthlySeries, NormalizedRecord};

/// Sums raw tax (not Base) per month across the whole dataset, ignoring
/// document type and direction. Zero-filled like the aggregate rows, and
/// computed from the normalized records directly rather than derived from
/// them, so the trend series stands on its own.
pub fn build_series(records: &[NormalizedRecord]) -> MonthlySeries {
    let mut totals = [0.0_f64; 12];

    for record in records {
        if let Some(month) = record.month {
            totals[month.index()] += record.tax.unwrap_or(0.0);
        }
    }

    MonthlySeries { totals }
}
