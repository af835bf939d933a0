//! Stream factory.
use crate::config::StreamSettings;
use crate::errors::DriftError;
use crate::stream::polling::{FetchFn, FetchResult, PollingStreamSource};
use crate::stream::record::StreamRecord;
use crate::stream::simulated::SimulatedStreamSource;
use crate::stream::{SendRecordStream, StreamSource};
use crate::utils::items_to_strings;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Kinds of stream a [`StreamManager`] can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Replay of a finite dataset.
    Simulated,
    /// Deduplicating poll of a fetch operation.
    Api,
}

impl FromStr for SourceType {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simulated" => Ok(SourceType::Simulated),
            "api" | "polling" => Ok(SourceType::Api),
            _ => Err(DriftError::Configuration(format!(
                "unsupported stream type {}, expected one of {}",
                s,
                items_to_strings(vec!["simulated", "api", "polling"])
            ))),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Simulated => f.write_str("simulated"),
            SourceType::Api => f.write_str("api"),
        }
    }
}

/// Construction parameters for [`StreamManager`].
///
/// `simulated` streams require `dataset`, `api` streams require `fetch_fn`.
#[derive(Default)]
pub struct StreamConfig {
    pub dataset: Option<Vec<StreamRecord>>,
    pub fetch_fn: Option<FetchFn>,
    pub settings: StreamSettings,
}

impl StreamConfig {
    pub fn with_dataset(mut self, records: Vec<StreamRecord>) -> Self {
        self.dataset = Some(records);
        self
    }

    pub fn with_fetch_fn<F>(mut self, fetch_fn: F) -> Self
    where
        F: FnMut() -> FetchResult + Send + 'static,
    {
        self.fetch_fn = Some(Box::new(fetch_fn));
        self
    }

    pub fn with_settings(mut self, settings: StreamSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Selects and builds a [`StreamSource`] from a type tag.
pub struct StreamManager;

impl StreamManager {
    /// Build the source named by `source_type`.
    ///
    /// Unknown tags and missing required parameters are rejected before
    /// anything is streamed.
    pub fn get_source(source_type: &str, config: StreamConfig) -> Result<Box<dyn StreamSource + Send>, DriftError> {
        let kind: SourceType = source_type.parse()?;
        let StreamConfig {
            dataset,
            fetch_fn,
            settings,
        } = config;
        debug!("Building {} stream with {:?}.", kind, settings);
        match kind {
            SourceType::Simulated => {
                let records = dataset.ok_or_else(|| {
                    DriftError::Configuration("simulated stream requires a dataset".to_string())
                })?;
                Ok(Box::new(SimulatedStreamSource::new(records, settings.delay())))
            }
            SourceType::Api => {
                let fetch_fn = fetch_fn
                    .ok_or_else(|| DriftError::Configuration("api stream requires a fetch_fn".to_string()))?;
                let source =
                    PollingStreamSource::with_capacity(fetch_fn, settings.polling_interval(), settings.max_seen)?;
                Ok(Box::new(source))
            }
        }
    }

    /// Build the source named by `source_type` and return its record sequence.
    ///
    /// The sequence owns the source and is `Send`.
    pub fn get_stream(source_type: &str, config: StreamConfig) -> Result<SendRecordStream, DriftError> {
        let mut source = Self::get_source(source_type, config)?;
        Ok(Box::new(std::iter::from_fn(move || source.next_record())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::record::RecordId;
    use crate::stream::Dataset;

    fn rows(n: usize) -> Vec<StreamRecord> {
        (0..n)
            .map(|i| StreamRecord::new(RecordId::Row(i)).with_feature("x", i as f64))
            .collect()
    }

    #[test]
    fn test_source_type_parsing() {
        assert_eq!("simulated".parse::<SourceType>().unwrap(), SourceType::Simulated);
        assert_eq!("api".parse::<SourceType>().unwrap(), SourceType::Api);
        assert_eq!("polling".parse::<SourceType>().unwrap(), SourceType::Api);
        assert!(matches!(
            "websocket".parse::<SourceType>(),
            Err(DriftError::Configuration(_))
        ));
    }

    #[test]
    fn test_get_stream_simulated() {
        let config = StreamConfig::default().with_dataset(rows(4));
        let ids: Vec<RecordId> = StreamManager::get_stream("simulated", config)
            .unwrap()
            .map(|r| r.unwrap().id)
            .collect();
        assert_eq!(ids, (0..4).map(RecordId::Row).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_stream_simulated_from_dataset() {
        let dataset = Dataset::from_csv_reader("x\n1\n2\n".as_bytes(), None).unwrap();
        let config = StreamConfig::default().with_dataset(dataset.into_records());
        let mut source = StreamManager::get_source("simulated", config).unwrap();
        assert_eq!(source.stream().count(), 2);
    }

    #[test]
    fn test_get_stream_api() {
        let mut call = 0i64;
        let settings = StreamSettings {
            polling_interval_ms: 0,
            ..Default::default()
        };
        let config = StreamConfig::default()
            .with_settings(settings)
            .with_fetch_fn(move || {
                call += 1;
                Ok(vec![
                    StreamRecord::new(RecordId::Timestamp(call)),
                    StreamRecord::new(RecordId::Timestamp(call + 1)),
                ])
            });
        let ids: Vec<RecordId> = StreamManager::get_stream("api", config)
            .unwrap()
            .take(5)
            .map(|r| r.unwrap().id)
            .collect();
        assert_eq!(ids, (1..=5).map(RecordId::Timestamp).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_stream_moves_to_worker_thread() {
        let stream = StreamManager::get_stream("simulated", StreamConfig::default().with_dataset(rows(3))).unwrap();
        let handle = std::thread::spawn(move || stream.map(|r| r.unwrap().id).collect::<Vec<RecordId>>());
        assert_eq!(handle.join().unwrap(), (0..3).map(RecordId::Row).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_stream_unknown_type() {
        let result = StreamManager::get_stream("websocket", StreamConfig::default().with_dataset(rows(1)));
        assert!(matches!(result, Err(DriftError::Configuration(_))));
    }

    #[test]
    fn test_get_stream_missing_parameters() {
        assert!(matches!(
            StreamManager::get_stream("simulated", StreamConfig::default()),
            Err(DriftError::Configuration(_))
        ));
        assert!(matches!(
            StreamManager::get_stream("api", StreamConfig::default().with_dataset(rows(2))),
            Err(DriftError::Configuration(_))
        ));
    }

    #[test]
    fn test_get_stream_invalid_capacity() {
        let settings = StreamSettings {
            max_seen: 0,
            ..Default::default()
        };
        let config = StreamConfig::default()
            .with_settings(settings)
            .with_fetch_fn(|| Ok(Vec::new()));
        assert!(matches!(
            StreamManager::get_stream("api", config),
            Err(DriftError::Configuration(_))
        ));
    }
}
