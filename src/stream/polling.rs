//! Polling
//!
//! A source that repeatedly calls a caller supplied fetch operation, emits
//! the records it has not seen before, then sleeps for a fixed interval.
//! The sequence never ends on its own.
use crate::constants::DEFAULT_MAX_SEEN;
use crate::errors::DriftError;
use crate::stream::record::{RecordId, StreamRecord};
use crate::stream::StreamSource;
use hashbrown::HashSet;
use log::{debug, warn};
use std::collections::VecDeque;
use std::error::Error;
use std::thread;
use std::time::Duration;

/// Outcome of one call to a fetch operation.
pub type FetchResult = Result<Vec<StreamRecord>, Box<dyn Error + Send + Sync>>;

/// Boxed fetch operation, as stored by [`StreamConfig`](super::StreamConfig).
pub type FetchFn = Box<dyn FnMut() -> FetchResult + Send>;

/// Phase of the poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
    Emitting,
    Sleeping,
}

/// Capacity bounded set of record identities.
///
/// Once full, inserting a new identity evicts the oldest one, so a record
/// evicted long ago could be emitted again.
#[derive(Debug)]
pub struct SeenSet {
    ids: HashSet<RecordId>,
    order: VecDeque<RecordId>,
    capacity: usize,
    evicted: usize,
}

impl SeenSet {
    pub fn new(capacity: usize) -> Result<Self, DriftError> {
        if capacity < 1 {
            return Err(DriftError::Configuration(
                "seen-set capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self::bounded(capacity))
    }

    // Callers guarantee `capacity >= 1`.
    fn bounded(capacity: usize) -> Self {
        SeenSet {
            ids: HashSet::new(),
            order: VecDeque::new(),
            capacity,
            evicted: 0,
        }
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// Record `id`, returning `false` if it was already present.
    pub fn insert(&mut self, id: RecordId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        if self.ids.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
                self.evicted += 1;
                if self.evicted == 1 {
                    warn!(
                        "Seen-set reached its capacity of {}, evicting the oldest identities.",
                        self.capacity
                    );
                }
            }
        }
        self.ids.insert(id.clone());
        self.order.push_back(id);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Identities dropped to stay within capacity.
    pub fn evicted(&self) -> usize {
        self.evicted
    }
}

/// Polls `fetch_fn` every `interval`, deduplicating by [`RecordId`].
///
/// A failing fetch produces a single [`DriftError::Fetch`] item; the source
/// then sleeps and polls again on the next pull. There is no retry or backoff.
pub struct PollingStreamSource<F> {
    fetch_fn: F,
    interval: Duration,
    seen: SeenSet,
    pending: VecDeque<StreamRecord>,
    state: PollState,
    polls: usize,
}

impl<F> PollingStreamSource<F>
where
    F: FnMut() -> FetchResult,
{
    pub fn new(fetch_fn: F, interval: Duration) -> Self {
        PollingStreamSource {
            fetch_fn,
            interval,
            seen: SeenSet::bounded(DEFAULT_MAX_SEEN),
            pending: VecDeque::new(),
            state: PollState::Idle,
            polls: 0,
        }
    }

    /// Like [`PollingStreamSource::new`] but remembering at most `max_seen` identities.
    pub fn with_capacity(fetch_fn: F, interval: Duration, max_seen: usize) -> Result<Self, DriftError> {
        let mut source = Self::new(fetch_fn, interval);
        source.seen = SeenSet::new(max_seen)?;
        Ok(source)
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Maximum number of identities remembered for deduplication.
    pub fn seen_capacity(&self) -> usize {
        self.seen.capacity()
    }

    /// Number of completed calls to the fetch operation.
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl<F> StreamSource for PollingStreamSource<F>
where
    F: FnMut() -> FetchResult,
{
    fn next_record(&mut self) -> Option<Result<StreamRecord, DriftError>> {
        loop {
            match self.state {
                PollState::Idle => self.state = PollState::Fetching,
                PollState::Fetching => {
                    let batch = (self.fetch_fn)();
                    self.polls += 1;
                    match batch {
                        Ok(batch) => {
                            debug!("Poll {} fetched {} candidate records.", self.polls, batch.len());
                            self.pending = batch.into();
                            self.state = PollState::Emitting;
                        }
                        Err(e) => {
                            warn!("Poll {} failed: {}", self.polls, e);
                            self.state = PollState::Sleeping;
                            return Some(Err(DriftError::Fetch(e.to_string())));
                        }
                    }
                }
                PollState::Emitting => {
                    while let Some(record) = self.pending.pop_front() {
                        if self.seen.insert(record.id.clone()) {
                            return Some(Ok(record));
                        }
                        debug!("Dropping already seen record {}.", record.id);
                    }
                    self.state = PollState::Sleeping;
                }
                PollState::Sleeping => {
                    if !self.interval.is_zero() {
                        thread::sleep(self.interval);
                    }
                    self.state = PollState::Idle;
                }
            }
        }
    }
}
