//! Stream records and their identities.
use crate::errors::DriftError;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a record, used by polling sources to drop repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordId {
    /// Unix timestamp, in whatever unit the producer uses.
    Timestamp(i64),
    /// Arbitrary row key.
    Key(String),
    /// Position in a replayed dataset.
    Row(usize),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Timestamp(ts) => write!(f, "ts:{}", ts),
            RecordId::Key(key) => write!(f, "key:{}", key),
            RecordId::Row(row) => write!(f, "row:{}", row),
        }
    }
}

/// One observation: named feature values plus an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub id: RecordId,
    pub features: HashMap<String, f64>,
}

impl StreamRecord {
    pub fn new(id: RecordId) -> Self {
        StreamRecord {
            id,
            features: HashMap::new(),
        }
    }

    /// Builder style feature insertion.
    pub fn with_feature(mut self, name: &str, value: f64) -> Self {
        self.features.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }
}

/// Extract the values of one feature, in record order.
///
/// Every record must carry the feature.
pub fn collect_feature(records: &[StreamRecord], name: &str) -> Result<Vec<f64>, DriftError> {
    records
        .iter()
        .map(|r| {
            r.get(name)
                .ok_or_else(|| DriftError::InvalidInput(format!("record {} has no feature {}", r.id, name)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let r = StreamRecord::new(RecordId::Timestamp(10))
            .with_feature("close", 101.5)
            .with_feature("volume", 3.0);
        assert_eq!(r.get("close"), Some(101.5));
        assert_eq!(r.get("open"), None);
        assert_eq!(r.features.len(), 2);
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::Timestamp(5).to_string(), "ts:5");
        assert_eq!(RecordId::Key("a".to_string()).to_string(), "key:a");
        assert_eq!(RecordId::Row(2).to_string(), "row:2");
    }

    #[test]
    fn test_collect_feature() {
        let records: Vec<StreamRecord> = (0..3)
            .map(|i| StreamRecord::new(RecordId::Row(i)).with_feature("x", i as f64))
            .collect();
        assert_eq!(collect_feature(&records, "x").unwrap(), vec![0.0, 1.0, 2.0]);
        assert!(matches!(collect_feature(&records, "y"), Err(DriftError::InvalidInput(_))));
    }

    #[test]
    fn test_record_json() {
        let r = StreamRecord::new(RecordId::Key("AAPL-2024-01-02".to_string())).with_feature("close", 185.6);
        let json = serde_json::to_string(&r).unwrap();
        let r2: StreamRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }
}
