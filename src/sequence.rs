//! Ordered, read-only runs of temporal propositions and segments over them.
//!
//! A [`Sequence`] owns its elements and keeps them in the order they were
//! given. A [`Segment`] borrows a sequence and covers the inclusive index range
//! `[first, last]`; it is itself a temporal proposition whose interval is the
//! envelope of the covered elements, computed on first use and cached.
//!
//! ```
//! use tempoline::granularity::Granularity;
//! use tempoline::interval::IntervalFactory;
//! use tempoline::proposition::{Event, TemporalProposition};
//! use tempoline::sequence::Sequence;
//!
//! let intervals = IntervalFactory::new();
//! let sequence: Sequence<Event> = [(1, 3), (2, 8), (5, 6)]
//!     .into_iter()
//!     .map(|(start, finish)| {
//!         let interval = intervals
//!             .instance_between(Some(start), Granularity::Day, Some(finish), Granularity::Day)
//!             .unwrap();
//!         Event::new(format!("e{start}"), "visit", interval)
//!     })
//!     .collect();
//! let segment = sequence.segment(0, 2).unwrap();
//! let envelope = segment.interval().unwrap();
//! assert_eq!(envelope.min_start(), Some(1));
//! assert_eq!(envelope.max_finish(), Some(8));
//! ```

use std::cmp;
use std::sync::{Arc, OnceLock};

use crate::error::{Result, TemporalError};
use crate::granularity::Position;
use crate::interval::{Interval, IntervalFactory};
use crate::proposition::TemporalProposition;

fn check_range(first: usize, last: usize, len: usize) -> Result<()> {
    if first > last || last >= len {
        return Err(TemporalError::IndexRange { first, last, len });
    }
    Ok(())
}

// ------------- Sequence -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence<T> {
    elements: Vec<T>,
}

impl<T> Sequence<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }
    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
    /// The elements at positions `first..=last`.
    pub fn sub_sequence(&self, first: usize, last: usize) -> Result<&[T]> {
        check_range(first, last, self.len())?;
        Ok(&self.elements[first..=last])
    }
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: TemporalProposition> Sequence<T> {
    pub fn segment(&self, first: usize, last: usize) -> Result<Segment<'_, T>> {
        Segment::new(self, first, last)
    }
    /// A segment over every element; empty when the sequence is.
    pub fn whole(&self) -> Segment<'_, T> {
        let range = match self.len() {
            0 => None,
            len => Some((0, len - 1)),
        };
        Segment {
            sequence: self,
            range,
            interval: OnceLock::new(),
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

// ------------- Segment -------------
#[derive(Debug)]
pub struct Segment<'s, T> {
    sequence: &'s Sequence<T>,
    range: Option<(usize, usize)>,
    interval: OnceLock<Option<Arc<Interval>>>,
}

impl<'s, T: TemporalProposition> Segment<'s, T> {
    pub fn new(sequence: &'s Sequence<T>, first: usize, last: usize) -> Result<Self> {
        check_range(first, last, sequence.len())?;
        Ok(Self {
            sequence,
            range: Some((first, last)),
            interval: OnceLock::new(),
        })
    }
    /// A new segment over the same sequence.
    pub fn with_range(&self, first: usize, last: usize) -> Result<Segment<'s, T>> {
        Segment::new(self.sequence, first, last)
    }
    pub fn sequence(&self) -> &'s Sequence<T> {
        self.sequence
    }
    pub fn first(&self) -> Option<usize> {
        self.range.map(|(first, _)| first)
    }
    pub fn last(&self) -> Option<usize> {
        self.range.map(|(_, last)| last)
    }
    pub fn len(&self) -> usize {
        self.range.map_or(0, |(first, last)| last - first + 1)
    }
    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }
    pub fn elements(&self) -> &'s [T] {
        match self.range {
            Some((first, last)) => &self.sequence.as_slice()[first..=last],
            None => &[],
        }
    }
    fn compute_interval(&self) -> Option<Arc<Interval>> {
        let factory = IntervalFactory::global();
        // members without an extent of their own do not widen the envelope
        let members: Vec<&Interval> = self
            .elements()
            .iter()
            .filter_map(|element| element.interval())
            .collect();
        match members.as_slice() {
            [] => None,
            [only] => Some(factory.keep((*only).clone())),
            [first, .., last] => {
                let min_start = envelope_bound(members.iter().map(|i| i.min_start()), cmp::min);
                let max_start = envelope_bound(members.iter().map(|i| i.max_start()), cmp::min);
                let min_finish = envelope_bound(members.iter().map(|i| i.min_finish()), cmp::max);
                let max_finish = envelope_bound(members.iter().map(|i| i.max_finish()), cmp::max);
                Some(factory.keep(Interval::from_bounds(
                    min_start,
                    max_start,
                    first.start_granularity(),
                    min_finish,
                    max_finish,
                    last.finish_granularity(),
                )))
            }
        }
    }
}

// An undefined bound on any member leaves the envelope unbounded there too.
fn envelope_bound(
    bounds: impl Iterator<Item = Option<Position>>,
    pick: fn(Position, Position) -> Position,
) -> Option<Position> {
    let mut result: Option<Position> = None;
    for bound in bounds {
        let bound = bound?;
        result = Some(match result {
            Some(so_far) => pick(so_far, bound),
            None => bound,
        });
    }
    result
}

impl<T: TemporalProposition> TemporalProposition for Segment<'_, T> {
    fn interval(&self) -> Option<&Interval> {
        self.interval
            .get_or_init(|| self.compute_interval())
            .as_deref()
    }
}
