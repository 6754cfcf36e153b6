//! Total orders over temporal propositions.
//!
//! Both functions fit `slice::sort_by` and the merger's `with_order`.

use std::cmp::Ordering;

use crate::interval::cmp_finish;
use crate::proposition::TemporalProposition;

/// Orders by the intervals' natural order: start first, then finish.
/// Propositions without an interval come first.
pub fn by_interval<P: TemporalProposition + ?Sized>(a: &P, b: &P) -> Ordering {
    a.interval().cmp(&b.interval())
}

/// Orders by `max_finish` alone. An undefined `max_finish` is open-ended and
/// sorts after any defined one.
pub fn by_max_finish<P: TemporalProposition + ?Sized>(a: &P, b: &P) -> Ordering {
    cmp_finish(
        a.interval().and_then(|i| i.max_finish()),
        b.interval().and_then(|i| i.max_finish()),
    )
}
