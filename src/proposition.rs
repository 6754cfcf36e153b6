use std::fmt;
use std::sync::Arc;

use crate::interval::Interval;

/// Anything that holds over a span of time.
///
/// `None` is reserved for propositions without a representable extent, such
/// as a segment over an empty sequence.
pub trait TemporalProposition {
    fn interval(&self) -> Option<&Interval>;
}

impl<P: TemporalProposition + ?Sized> TemporalProposition for &P {
    fn interval(&self) -> Option<&Interval> {
        (**self).interval()
    }
}
impl<P: TemporalProposition + ?Sized> TemporalProposition for Arc<P> {
    fn interval(&self) -> Option<&Interval> {
        (**self).interval()
    }
}
impl<P: TemporalProposition + ?Sized> TemporalProposition for Box<P> {
    fn interval(&self) -> Option<&Interval> {
        (**self).interval()
    }
}

// ------------- Event -------------
/// A recorded occurrence of some kind, e.g. an encounter or a lab draw.
#[derive(Eq, PartialEq, Hash, Clone, Debug)]
pub struct Event {
    id: String,
    kind: String,
    interval: Arc<Interval>,
}

impl Event {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, interval: Arc<Interval>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            interval,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    pub fn shared_interval(&self) -> Arc<Interval> {
        Arc::clone(&self.interval)
    }
}

impl TemporalProposition for Event {
    fn interval(&self) -> Option<&Interval> {
        Some(&self.interval)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.id, self.interval)
    }
}
