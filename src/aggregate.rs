use log::debug;

use crate::schema::{AggregateRow, Direction, NormalizedRecord, SumBasis};

/// Builds the wide summary table: one row per (document type, direction)
/// pair, twelve zero-filled monthly sums and an annual total each.
///
/// Document types enumerate in first-occurrence order — that order, not an
/// alphabetical one, governs output row order and keeps reruns
/// byte-identical. Every observed document type is crossed with both
/// directions, so a pair with no matching rows still yields an all-zero
/// row rather than disappearing from the table.
pub fn aggregate(records: &[NormalizedRecord], basis: SumBasis) -> Vec<AggregateRow> {
    let document_types = document_types_in_order(records);
    let mut rows = Vec::with_capacity(document_types.len() * Direction::ALL.len());

    for document_type in &document_types {
        for direction in Direction::ALL {
            let mut months = [0.0_f64; 12];
            for record in records {
                if record.document_type != *document_type {
                    continue;
                }
                if !direction.matches(&record.direction) {
                    continue;
                }
                // Null-month rows never land in a bucket.
                if let Some(month) = record.month {
                    months[month.index()] += basis_value(record, basis);
                }
            }

            let annual_total = months.iter().sum();
            rows.push(AggregateRow {
                document_type: document_type.clone(),
                direction,
                months,
                annual_total,
            });
        }
    }

    debug!(
        "Aggregated {} records into {} rows over {} document types",
        records.len(),
        rows.len(),
        document_types.len()
    );

    rows
}

fn basis_value(record: &NormalizedRecord, basis: SumBasis) -> f64 {
    match basis {
        SumBasis::Base => record.base,
        SumBasis::Tax => record.tax.unwrap_or(0.0),
    }
}

/// Distinct document types, first occurrence first.
fn document_types_in_order(records: &[NormalizedRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.document_type) {
            seen.push(record.document_type.clone());
        }
    }
    seen
}
