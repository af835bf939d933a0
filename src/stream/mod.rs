//! Streaming
//!
//! Sources producing the record sequences the drift engine consumes. A source
//! owns its cursor state: calling [`StreamSource::stream`] again resumes where
//! the previous sequence stopped, it never rewinds.

pub mod dataset;
pub mod manager;
pub mod polling;
pub mod record;
pub mod simulated;

pub use dataset::Dataset;
pub use manager::{SourceType, StreamConfig, StreamManager};
pub use polling::{FetchFn, FetchResult, PollState, PollingStreamSource, SeenSet};
pub use record::{collect_feature, RecordId, StreamRecord};
pub use simulated::SimulatedStreamSource;

use crate::errors::DriftError;

/// Lazy record sequence. Fetch failures surface as `Err` items.
pub type RecordStream<'a> = Box<dyn Iterator<Item = Result<StreamRecord, DriftError>> + 'a>;

/// Owned record sequence that can be moved to another thread.
pub type SendRecordStream = Box<dyn Iterator<Item = Result<StreamRecord, DriftError>> + Send>;

/// Anything able to produce a lazy, ordered sequence of records.
pub trait StreamSource {
    /// Pull the next record, `None` once a finite source is exhausted.
    fn next_record(&mut self) -> Option<Result<StreamRecord, DriftError>>;

    /// Lazy view over the remaining records.
    fn stream(&mut self) -> RecordStream<'_> {
        Box::new(std::iter::from_fn(move || self.next_record()))
    }
}
