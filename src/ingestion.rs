use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::Result;

/// The uploaded export as read: column labels plus string cell rows.
///
/// Nothing is interpreted at this stage; coercion belongs to the
/// normalizer so that malformed cells become counted nulls instead of
/// read failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Reads a headered CSV export, trimming whitespace around cells.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|label| label.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        debug!(
            "Read raw table: {} columns, {} rows",
            columns.len(),
            rows.len()
        );

        Ok(Self { columns, rows })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by its label, if present.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Cell value at (row, column label). Missing columns and short rows
    /// both read as empty, which the normalizer coerces to null.
    pub fn cell<'a>(&'a self, row: &'a [String], label: &str) -> &'a str {
        self.column_index(label)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_headered_csv() {
        let data = "\
Fecha Emisión,Total,IVA,Tipo de documento,Grupo
05-01-2024,1190,190,Invoice,Emitido
12-02-2024, 595 ,95,Invoice,Recibido
";
        let table = RawTable::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(table.columns().len(), 5);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_index("IVA"), Some(2));
        assert_eq!(table.column_index("Missing"), None);

        // trimmed cells
        assert_eq!(table.rows()[1][1], "595");
    }

    #[test]
    fn test_cell_reads_empty_for_short_rows() {
        let table = RawTable::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec!["1".to_string()]],
        );
        let row = &table.rows()[0];
        assert_eq!(table.cell(row, "A"), "1");
        assert_eq!(table.cell(row, "B"), "");
        assert_eq!(table.cell(row, "C"), "");
    }
}
