//! Replay of a finite dataset.
use crate::errors::DriftError;
use crate::stream::dataset::Dataset;
use crate::stream::record::StreamRecord;
use crate::stream::StreamSource;
use log::info;
use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

/// Replays records in their original order, optionally pausing `delay`
/// between two emissions. The sequence ends after the last record.
#[derive(Debug)]
pub struct SimulatedStreamSource {
    pending: VecDeque<StreamRecord>,
    delay: Duration,
    emitted: usize,
    finished: bool,
}

impl SimulatedStreamSource {
    pub fn new(records: Vec<StreamRecord>, delay: Duration) -> Self {
        SimulatedStreamSource {
            pending: records.into(),
            delay,
            emitted: 0,
            finished: false,
        }
    }

    pub fn from_dataset(dataset: Dataset, delay: Duration) -> Self {
        Self::new(dataset.into_records(), delay)
    }

    /// Number of records already handed out.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl StreamSource for SimulatedStreamSource {
    fn next_record(&mut self) -> Option<Result<StreamRecord, DriftError>> {
        if self.pending.is_empty() {
            if !self.finished {
                self.finished = true;
                info!("Replay finished after {} records.", self.emitted);
            }
            return None;
        }
        if self.emitted > 0 && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let record = self.pending.pop_front()?;
        self.emitted += 1;
        Some(Ok(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::record::RecordId;
    use std::time::Instant;

    fn rows(n: usize) -> Vec<StreamRecord> {
        (0..n)
            .map(|i| StreamRecord::new(RecordId::Row(i)).with_feature("x", i as f64 * 0.5))
            .collect()
    }

    #[test]
    fn test_replay_is_complete_and_ordered() {
        let mut source = SimulatedStreamSource::new(rows(25), Duration::ZERO);
        let out: Vec<StreamRecord> = source.stream().map(|r| r.unwrap()).collect();
        assert_eq!(out, rows(25));
        assert_eq!(source.emitted(), 25);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_replay_resumes_instead_of_rewinding() {
        let mut source = SimulatedStreamSource::new(rows(5), Duration::ZERO);
        let first: Vec<RecordId> = source.stream().take(2).map(|r| r.unwrap().id).collect();
        let rest: Vec<RecordId> = source.stream().map(|r| r.unwrap().id).collect();
        assert_eq!(first, vec![RecordId::Row(0), RecordId::Row(1)]);
        assert_eq!(rest, vec![RecordId::Row(2), RecordId::Row(3), RecordId::Row(4)]);
        assert_eq!(source.stream().count(), 0);
    }

    #[test]
    fn test_replay_empty_dataset() {
        let mut source = SimulatedStreamSource::from_dataset(Dataset::default(), Duration::ZERO);
        assert!(source.next_record().is_none());
    }

    #[test]
    fn test_replay_delay_between_emissions() {
        let mut source = SimulatedStreamSource::new(rows(3), Duration::from_millis(20));
        let start = Instant::now();
        assert_eq!(source.stream().count(), 3);
        // Two pauses, one between each pair of records.
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
