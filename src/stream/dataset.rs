//! Dataset
//!
//! A finite, ordered set of records that a [`SimulatedStreamSource`](super::SimulatedStreamSource)
//! can replay. Records can be built in memory or read from CSV.
use crate::errors::DriftError;
use crate::stream::record::{RecordId, StreamRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Ordered records for replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<StreamRecord>,
}

fn parse_id(field: &str) -> RecordId {
    let field = field.trim();
    match field.parse::<i64>() {
        Ok(ts) => RecordId::Timestamp(ts),
        Err(_) => RecordId::Key(field.to_string()),
    }
}

impl Dataset {
    pub fn from_records(records: Vec<StreamRecord>) -> Self {
        Dataset { records }
    }

    /// Read records from CSV with a header row.
    ///
    /// * `reader` - CSV source.
    /// * `id_column` - Column holding the record identity. Integer values become
    ///   [`RecordId::Timestamp`], anything else [`RecordId::Key`]. Without it,
    ///   each record is identified by its row position.
    ///
    /// Every other column must hold numbers.
    pub fn from_csv_reader<R: Read>(reader: R, id_column: Option<&str>) -> Result<Self, DriftError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| DriftError::UnableToRead(e.to_string()))?
            .clone();

        let id_idx = match id_column {
            Some(name) => Some(
                headers
                    .iter()
                    .position(|h| h.trim() == name)
                    .ok_or_else(|| DriftError::InvalidInput(format!("id column {} not found in CSV header", name)))?,
            ),
            None => None,
        };

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let row_data = result.map_err(|e| DriftError::UnableToRead(e.to_string()))?;
            let mut record = StreamRecord::new(RecordId::Row(row));
            for (col, (name, field)) in headers.iter().zip(row_data.iter()).enumerate() {
                if Some(col) == id_idx {
                    record.id = parse_id(field);
                    continue;
                }
                let value = field.trim().parse::<f64>().map_err(|_| {
                    DriftError::InvalidInput(format!(
                        "row {} column {} holds the non-numeric value {:?}",
                        row,
                        name.trim(),
                        field
                    ))
                })?;
                record.features.insert(name.trim().to_string(), value);
            }
            records.push(record);
        }
        Ok(Dataset { records })
    }

    /// Read records from a CSV file, see [`Dataset::from_csv_reader`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P, id_column: Option<&str>) -> Result<Self, DriftError> {
        let file = File::open(path.as_ref())
            .map_err(|e| DriftError::UnableToRead(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_csv_reader(file, id_column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StreamRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StreamRecord> {
        self.records
    }
}

impl From<Vec<StreamRecord>> for Dataset {
    fn from(records: Vec<StreamRecord>) -> Self {
        Dataset::from_records(records)
    }
}
