use log::warn;

use crate::schema::{AggregateRow, PercentageRow};

/// Derives percentage-of-annual-total rows from the aggregate rows.
///
/// A row whose annual total is exactly zero has no defined percentages;
/// that row is skipped and counted, and derivation continues for the
/// remaining rows. No division by zero is ever performed.
pub fn derive_percentages(rows: &[AggregateRow]) -> (Vec<PercentageRow>, usize) {
    let mut percentages = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        if row.annual_total == 0.0 {
            warn!(
                "Skipping percentage derivation for {}/{}: annual total is zero",
                row.document_type,
                row.direction.name()
            );
            skipped += 1;
            continue;
        }

        let mut shares = [0.0_f64; 12];
        for (share, value) in shares.iter_mut().zip(row.months.iter()) {
            *share = value / row.annual_total * 100.0;
        }

        percentages.push(PercentageRow {
            document_type: row.document_type.clone(),
            direction: row.direction,
            shares,
        });
    }

    (percentages, skipped)
}
