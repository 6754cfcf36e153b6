//! Merging of per-entity event streams coming from several backends.
//!
//! Every backend contributes one [`EventSource`]: a lazy, finite iterator of
//! `(key, proposition)` pairs. Within a source, keys arrive in non-decreasing
//! order and the propositions of one key arrive in their temporal order.
//!
//! A [`Multiplexer`] turns any number of such sources into one iterator that
//! emits all propositions of a key contiguously, keys in ascending order, and
//! the propositions of a key merged across sources by a comparator
//! ([`by_interval`] unless another one is given). It holds at most one
//! look-ahead item per source and only refills the source it last emitted
//! from when the next item is requested. A failing source aborts the merge:
//! every source still open is closed and the error is yielded once. Sources
//! are closed exactly once, whether they run dry, the merge fails, or the
//! merger is closed or dropped early.
//!
//! ```
//! use tempoline::granularity::Granularity;
//! use tempoline::interval::IntervalFactory;
//! use tempoline::multiplex::{BoxedSource, IterSource, Multiplexer};
//! use tempoline::proposition::Event;
//!
//! let intervals = IntervalFactory::new();
//! let at = |t: i64| Event::new(format!("t{t}"), "lab", intervals.instance_at(t, Granularity::Day));
//! let a: Vec<Result<(u32, Event), String>> = vec![Ok((1, at(1))), Ok((1, at(3)))];
//! let b: Vec<Result<(u32, Event), String>> = vec![Ok((1, at(2))), Ok((2, at(5)))];
//! let sources: Vec<BoxedSource<u32, Event>> = vec![
//!     Box::new(IterSource::new(a.into_iter())),
//!     Box::new(IterSource::new(b.into_iter())),
//! ];
//! let merged: Vec<(u32, String)> = Multiplexer::new(sources)
//!     .map(|item| item.map(|(key, event)| (key, event.id().to_string())))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! let expected: Vec<(u32, String)> = vec![
//!     (1, "t1".to_string()),
//!     (1, "t2".to_string()),
//!     (1, "t3".to_string()),
//!     (2, "t5".to_string()),
//! ];
//! assert_eq!(merged, expected);
//! ```

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::error::{Result, SourceError, TemporalError};
use crate::ordering::by_interval;
use crate::proposition::TemporalProposition;
use crate::sequence::Sequence;

/// One backend's stream of `(key, proposition)` pairs.
pub trait EventSource<K, T>: Iterator<Item = std::result::Result<(K, T), SourceError>> {
    /// Releases whatever the source holds. Called exactly once by the merger.
    fn close(&mut self);
}

pub type BoxedSource<K, T> = Box<dyn EventSource<K, T> + Send>;

// ------------- IterSource -------------
/// Adapts a plain iterator into an [`EventSource`]. Closing drops the iterator.
#[derive(Debug)]
pub struct IterSource<I> {
    inner: Option<I>,
}

impl<I> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { inner: Some(iter) }
    }
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<I, K, T, E> Iterator for IterSource<I>
where
    I: Iterator<Item = std::result::Result<(K, T), E>>,
    E: Into<SourceError>,
{
    type Item = std::result::Result<(K, T), SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .as_mut()?
            .next()
            .map(|item| item.map_err(Into::into))
    }
}

impl<I, K, T, E> EventSource<K, T> for IterSource<I>
where
    I: Iterator<Item = std::result::Result<(K, T), E>>,
    E: Into<SourceError>,
{
    fn close(&mut self) {
        self.inner = None;
    }
}

// ------------- Multiplexer -------------
struct Lane<K, T> {
    source: BoxedSource<K, T>,
    head: Option<(K, T)>,
    open: bool,
}

pub struct Multiplexer<K, T> {
    lanes: Vec<Lane<K, T>>,
    order: fn(&T, &T) -> Ordering,
    current_key: Option<K>,
    primed: bool,
    // the lane whose head was emitted last and must be refilled before choosing again
    stale: Option<usize>,
    finished: bool,
}

impl<K: Ord + Clone, T: TemporalProposition> Multiplexer<K, T> {
    /// Merges same-key propositions in interval order.
    pub fn new(sources: Vec<BoxedSource<K, T>>) -> Self {
        Self::with_order(sources, by_interval::<T>)
    }
}

impl<K, T> Multiplexer<K, T> {
    pub fn with_order(sources: Vec<BoxedSource<K, T>>, order: fn(&T, &T) -> Ordering) -> Self {
        let lanes = sources
            .into_iter()
            .map(|source| Lane {
                source,
                head: None,
                open: true,
            })
            .collect();
        Self {
            lanes,
            order,
            current_key: None,
            primed: false,
            stale: None,
            finished: false,
        }
    }
    /// Stops the merge and closes every source that is still open.
    pub fn close(&mut self) {
        self.finished = true;
        self.release();
    }
    pub fn is_finished(&self) -> bool {
        self.finished
    }
    pub fn open_sources(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.open).count()
    }
    fn release(&mut self) {
        for (index, lane) in self.lanes.iter_mut().enumerate() {
            if lane.open {
                lane.open = false;
                lane.head = None;
                lane.source.close();
                trace!(source = index, "closed source");
            }
        }
    }
    fn abort(&mut self, error: TemporalError) -> Option<Result<(K, T)>> {
        warn!(%error, "aborting merge");
        self.close();
        Some(Err(error))
    }
}

impl<K: Ord + Clone, T> Multiplexer<K, T> {
    /// Groups the merged stream into one [`Sequence`] per key.
    pub fn into_sequences(self) -> SequenceGroups<K, T> {
        SequenceGroups {
            merger: self,
            pending: None,
        }
    }
    fn advance(&mut self, index: usize) -> Result<()> {
        let lane = &mut self.lanes[index];
        if !lane.open {
            lane.head = None;
            return Ok(());
        }
        match lane.source.next() {
            Some(Ok((key, item))) => {
                if let Some(current) = &self.current_key {
                    if key < *current {
                        return Err(TemporalError::StreamRead {
                            source_index: index,
                            cause: "key order violated: source went back to an earlier key".into(),
                        });
                    }
                }
                lane.head = Some((key, item));
            }
            Some(Err(cause)) => {
                return Err(TemporalError::StreamRead {
                    source_index: index,
                    cause,
                });
            }
            None => {
                lane.head = None;
                lane.open = false;
                lane.source.close();
                debug!(source = index, "source exhausted");
            }
        }
        Ok(())
    }
    fn holds_current_key(&self) -> bool {
        match &self.current_key {
            Some(current) => self
                .lanes
                .iter()
                .any(|lane| matches!(&lane.head, Some((key, _)) if key == current)),
            None => false,
        }
    }
    // the lane with the earliest item for the current key, lowest index on ties
    fn earliest_lane(&self) -> Option<usize> {
        let current = self.current_key.as_ref()?;
        let mut best: Option<(usize, &T)> = None;
        for (index, lane) in self.lanes.iter().enumerate() {
            if let Some((key, item)) = &lane.head {
                if key != current {
                    continue;
                }
                best = match best {
                    Some((_, best_item)) if (self.order)(item, best_item) != Ordering::Less => best,
                    _ => Some((index, item)),
                };
            }
        }
        best.map(|(index, _)| index)
    }
}

impl<K: Ord + Clone, T> Iterator for Multiplexer<K, T> {
    type Item = Result<(K, T)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.primed {
            self.primed = true;
            for index in 0..self.lanes.len() {
                if let Err(error) = self.advance(index) {
                    return self.abort(error);
                }
            }
        }
        if let Some(index) = self.stale.take() {
            if let Err(error) = self.advance(index) {
                return self.abort(error);
            }
        }
        if !self.holds_current_key() {
            let next_key = self
                .lanes
                .iter()
                .filter_map(|lane| lane.head.as_ref().map(|(key, _)| key))
                .min()
                .cloned();
            match next_key {
                Some(key) => {
                    trace!("advancing to next key");
                    self.current_key = Some(key);
                }
                None => {
                    debug!("all sources exhausted");
                    self.close();
                    return None;
                }
            }
        }
        let index = self.earliest_lane()?;
        self.stale = Some(index);
        self.lanes[index].head.take().map(Ok)
    }
}

impl<K, T> Drop for Multiplexer<K, T> {
    fn drop(&mut self) {
        self.release();
    }
}

// ------------- SequenceGroups -------------
/// Yields `(key, Sequence)` pairs, buffering a single key at a time.
///
/// A failure while a key is being collected yields the error instead of the
/// partially collected sequence.
pub struct SequenceGroups<K, T> {
    merger: Multiplexer<K, T>,
    pending: Option<(K, T)>,
}

impl<K: Ord + Clone, T> Iterator for SequenceGroups<K, T> {
    type Item = Result<(K, Sequence<T>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, first) = match self.pending.take() {
            Some(pending) => pending,
            None => match self.merger.next()? {
                Ok(pair) => pair,
                Err(error) => return Some(Err(error)),
            },
        };
        let mut elements = vec![first];
        loop {
            match self.merger.next() {
                Some(Ok((next_key, item))) if next_key == key => elements.push(item),
                Some(Ok(other)) => {
                    self.pending = Some(other);
                    break;
                }
                Some(Err(error)) => return Some(Err(error)),
                None => break,
            }
        }
        Some(Ok((key, Sequence::new(elements))))
    }
}
