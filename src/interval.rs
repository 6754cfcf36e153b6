//! Uncertain time intervals and their canonicalizing factory.
//!
//! An [`Interval`] bounds its start by `[min_start, max_start]` and its finish
//! by `[min_finish, max_finish]`. Any bound may be undefined, meaning the
//! interval is unbounded in that direction. Whenever bounds are defined they
//! obey `min_start <= max_start <= min_finish <= max_finish`.
//!
//! Intervals are obtained from an [`IntervalFactory`], which keeps one shared
//! instance per distinct bound tuple. Two factory-produced intervals with the
//! same bounds are therefore the same allocation, and `Arc::ptr_eq` is a valid
//! shortcut for equality between them (but not for intervals built elsewhere).

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use tracing::trace;

use crate::config::DEFAULT_INTERVAL_CACHE_CAPACITY;
use crate::error::{Result, TemporalError};
use crate::granularity::{Granularity, Position};
use crate::keeper::Keeper;
use crate::weight::Weight;

#[derive(Eq, PartialEq, Hash, Clone, Debug)]
pub struct Interval {
    min_start: Option<Position>,
    max_start: Option<Position>,
    start_granularity: Granularity,
    min_finish: Option<Position>,
    max_finish: Option<Position>,
    finish_granularity: Granularity,
}

impl Interval {
    /// Validates the bounds; see [`IntervalFactory::instance_with_bounds`] for
    /// a shared instance.
    pub fn new(
        min_start: Option<Position>,
        max_start: Option<Position>,
        start_granularity: Granularity,
        min_finish: Option<Position>,
        max_finish: Option<Position>,
        finish_granularity: Granularity,
    ) -> Result<Self> {
        let named = [
            ("min_start", min_start),
            ("max_start", max_start),
            ("min_finish", min_finish),
            ("max_finish", max_finish),
        ];
        // checking consecutive defined bounds is enough, the order is transitive
        let mut previous: Option<(&str, Position)> = None;
        for (name, bound) in named {
            if let Some(bound) = bound {
                if let Some((previous_name, previous_bound)) = previous {
                    if previous_bound > bound {
                        return Err(TemporalError::InvalidInterval {
                            message: format!(
                                "{} {} is after {} {}",
                                previous_name, previous_bound, name, bound
                            ),
                        });
                    }
                }
                previous = Some((name, bound));
            }
        }
        Ok(Self {
            min_start,
            max_start,
            start_granularity,
            min_finish,
            max_finish,
            finish_granularity,
        })
    }
    // used where the bounds are consistent by construction
    pub(crate) fn from_bounds(
        min_start: Option<Position>,
        max_start: Option<Position>,
        start_granularity: Granularity,
        min_finish: Option<Position>,
        max_finish: Option<Position>,
        finish_granularity: Granularity,
    ) -> Self {
        Self {
            min_start,
            max_start,
            start_granularity,
            min_finish,
            max_finish,
            finish_granularity,
        }
    }
    pub fn min_start(&self) -> Option<Position> {
        self.min_start
    }
    pub fn max_start(&self) -> Option<Position> {
        self.max_start
    }
    pub fn start_granularity(&self) -> Granularity {
        self.start_granularity
    }
    pub fn min_finish(&self) -> Option<Position> {
        self.min_finish
    }
    pub fn max_finish(&self) -> Option<Position> {
        self.max_finish
    }
    pub fn finish_granularity(&self) -> Granularity {
        self.finish_granularity
    }
    /// True when all four bounds are defined and equal.
    pub fn is_point(&self) -> bool {
        match (self.min_start, self.max_start, self.min_finish, self.max_finish) {
            (Some(a), Some(b), Some(c), Some(d)) => a == b && b == c && c == d,
            _ => false,
        }
    }
    /// The shortest duration the interval can have.
    pub fn min_length(&self) -> Weight {
        match (self.max_start, self.min_finish) {
            (Some(start), Some(finish)) => Weight::finite(finish.saturating_sub(start).max(0)),
            _ => Weight::ZERO,
        }
    }
    /// The longest duration the interval can have. A span too wide for an
    /// `i64` is unbounded.
    pub fn max_length(&self) -> Weight {
        match (self.min_start, self.max_finish) {
            (Some(start), Some(finish)) => finish
                .checked_sub(start)
                .map_or(Weight::POS_INFINITY, Weight::finite),
            _ => Weight::POS_INFINITY,
        }
    }
}

/// Orders finish bounds: an undefined finish is open into the future and
/// sorts after every defined one.
pub(crate) fn cmp_finish(a: Option<Position>, b: Option<Position>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

// start bounds use Option's own order, an undefined start sorts first
impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.min_start
            .cmp(&other.min_start)
            .then_with(|| self.max_start.cmp(&other.max_start))
            .then_with(|| cmp_finish(self.min_finish, other.min_finish))
            .then_with(|| cmp_finish(self.max_finish, other.max_finish))
            .then_with(|| self.start_granularity.cmp(&other.start_granularity))
            .then_with(|| self.finish_granularity.cmp(&other.finish_granularity))
    }
}
impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bound = |position: Option<Position>, granularity: Granularity| match position {
            Some(position) => granularity.format(position),
            None => String::from("?"),
        };
        write!(
            f,
            "[{}, {}] - [{}, {}]",
            bound(self.min_start, self.start_granularity),
            bound(self.max_start, self.start_granularity),
            bound(self.min_finish, self.finish_granularity),
            bound(self.max_finish, self.finish_granularity)
        )
    }
}

/// Hands out shared, canonical [`Interval`] instances.
#[derive(Debug)]
pub struct IntervalFactory {
    keeper: Mutex<Keeper<Interval>>,
}

lazy_static! {
    static ref INTERVAL_FACTORY: IntervalFactory =
        IntervalFactory::with_capacity(Some(DEFAULT_INTERVAL_CACHE_CAPACITY));
}

impl IntervalFactory {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            keeper: Mutex::new(Keeper::with_capacity(capacity)),
        }
    }
    /// The process-wide factory.
    pub fn global() -> &'static IntervalFactory {
        &INTERVAL_FACTORY
    }
    // the keeper only ever holds immutable values, so a poisoned lock is still usable
    fn keeper(&self) -> MutexGuard<'_, Keeper<Interval>> {
        self.keeper.lock().unwrap_or_else(PoisonError::into_inner)
    }
    pub fn keep(&self, interval: Interval) -> Arc<Interval> {
        let (kept, previously_kept) = self.keeper().keep(interval);
        if !previously_kept {
            trace!(interval = %kept, "kept new interval");
        }
        kept
    }
    /// An interval with every bound undefined.
    pub fn instance(&self) -> Arc<Interval> {
        self.keep(Interval::from_bounds(
            None,
            None,
            Granularity::default(),
            None,
            None,
            Granularity::default(),
        ))
    }
    /// A point interval: all four bounds at `position`.
    pub fn instance_at(&self, position: Position, granularity: Granularity) -> Arc<Interval> {
        self.keep(Interval::from_bounds(
            Some(position),
            Some(position),
            granularity,
            Some(position),
            Some(position),
            granularity,
        ))
    }
    /// An interval with a precisely known start and finish.
    pub fn instance_between(
        &self,
        start: Option<Position>,
        start_granularity: Granularity,
        finish: Option<Position>,
        finish_granularity: Granularity,
    ) -> Result<Arc<Interval>> {
        if let (Some(start), Some(finish)) = (start, finish) {
            if start > finish {
                return Err(TemporalError::InvalidInterval {
                    message: format!("start {} is after finish {}", start, finish),
                });
            }
        }
        Ok(self.keep(Interval::from_bounds(
            start,
            start,
            start_granularity,
            finish,
            finish,
            finish_granularity,
        )))
    }
    pub fn instance_with_bounds(
        &self,
        min_start: Option<Position>,
        max_start: Option<Position>,
        start_granularity: Granularity,
        min_finish: Option<Position>,
        max_finish: Option<Position>,
        finish_granularity: Granularity,
    ) -> Result<Arc<Interval>> {
        let interval = Interval::new(
            min_start,
            max_start,
            start_granularity,
            min_finish,
            max_finish,
            finish_granularity,
        )?;
        Ok(self.keep(interval))
    }
    pub fn purge(&self) -> usize {
        self.keeper().purge()
    }
    pub fn set_capacity(&self, capacity: Option<usize>) {
        self.keeper().set_capacity(capacity);
    }
    pub fn len(&self) -> usize {
        self.keeper().len()
    }
    pub fn is_empty(&self) -> bool {
        self.keeper().is_empty()
    }
}

impl Default for IntervalFactory {
    fn default() -> Self {
        Self::new()
    }
}
