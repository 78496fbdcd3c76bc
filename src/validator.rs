use log::debug;

use crate::error::{ReportError, Result};
use crate::ingestion::RawTable;
use crate::schema::ColumnNames;

/// Checks that every required column is present in the table.
///
/// Collects all absent labels before failing so the error names every
/// missing column, not just the first. The table itself is not touched.
pub fn validate_columns(table: &RawTable, columns: &ColumnNames) -> Result<()> {
    let missing: Vec<String> = columns
        .required()
        .iter()
        .filter(|label| table.column_index(label).is_none())
        .map(|label| label.to_string())
        .collect();

    if missing.is_empty() {
        debug!("All {} required columns present", columns.required().len());
        Ok(())
    } else {
        Err(ReportError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(columns: &[&str]) -> RawTable {
        RawTable::new(columns.iter().map(|c| c.to_string()).collect(), Vec::new())
    }

    #[test]
    fn test_all_columns_present() {
        let table = table_with(&["Fecha Emisión", "Total", "IVA", "Tipo de documento", "Grupo"]);
        assert!(validate_columns(&table, &ColumnNames::default()).is_ok());
    }

    #[test]
    fn test_reports_every_missing_column() {
        let table = table_with(&["Total", "Tipo de documento"]);
        let err = validate_columns(&table, &ColumnNames::default()).unwrap_err();
        match err {
            ReportError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["Fecha Emisión", "IVA", "Grupo"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_message_names_all_columns() {
        let table = table_with(&[]);
        let err = validate_columns(&table, &ColumnNames::default()).unwrap_err();
        let message = err.to_string();
        for label in ColumnNames::default().required() {
            assert!(message.contains(label), "missing {label} in: {message}");
        }
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let table = table_with(&[
            "Fecha Emisión",
            "Total",
            "IVA",
            "Tipo de documento",
            "Grupo",
            "Observaciones",
        ]);
        assert!(validate_columns(&table, &ColumnNames::default()).is_ok());
    }
}
