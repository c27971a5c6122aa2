//! Batch input from tender registry CSV exports.

mod parser;

use crate::estimation::TenderPricingInput;
use parser::TenderRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum TenderImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for TenderImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenderImportError::Io(err) => write!(f, "failed to read tender export: {}", err),
            TenderImportError::Csv(err) => write!(f, "invalid tender CSV data: {}", err),
        }
    }
}

impl std::error::Error for TenderImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TenderImportError::Io(err) => Some(err),
            TenderImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TenderImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TenderImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One imported tender, keyed by its notice number.
#[derive(Debug, Clone, PartialEq)]
pub struct TenderRow {
    pub tender_id: String,
    pub input: TenderPricingInput,
}

pub struct TenderCsvImporter;

impl TenderCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TenderRow>, TenderImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads rows with registry headers; unknown columns are ignored and
    /// missing ones are treated as absent fields.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TenderRow>, TenderImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (index, record) in csv_reader.deserialize::<TenderRecord>().enumerate() {
            let record = record?;
            rows.push(record.into_row(index + 1));
        }

        debug!(rows = rows.len(), "tender export imported");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::RawNumber;
    use std::io::Cursor;

    #[test]
    fn importer_reads_registry_headers() {
        let csv = "bidNtceNo,bidNtceOrd,bssamt,bdgtAmt,rsrvtnPrceRngBgnRate,rsrvtnPrceRngEndRate,sucsfbidLwltRate,prtcptPsblRgnNms,permsnIndstrytyListNms\n\
20250101234,00,1000000000,,-3,+3,87.745,\"서울특별시, 경기도\",토공사업\n";
        let rows = TenderCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.tender_id, "20250101234-00");
        assert_eq!(
            row.input.basis_amount,
            Some(RawNumber::Text("1000000000".to_string()))
        );
        assert!(row.input.fallback_basis_amount.is_none());
        assert_eq!(
            row.input.participation_regions.as_deref(),
            Some("서울특별시, 경기도")
        );
        assert!(row.input.cost_breakdown.is_none());
    }

    #[test]
    fn importer_numbers_rows_without_notice_number() {
        let csv = "bssamt\n500000000\n\n700000000\n";
        let rows = TenderCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let ids: Vec<_> = rows.iter().map(|row| row.tender_id.as_str()).collect();
        assert_eq!(ids, vec!["row-1", "row-2"]);
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        match TenderCsvImporter::from_path("./no-such-export.csv") {
            Err(TenderImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
