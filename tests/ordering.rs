use std::cmp::Ordering;

use tempoline::granularity::{Granularity, Position};
use tempoline::interval::IntervalFactory;
use tempoline::ordering::{by_interval, by_max_finish};
use tempoline::proposition::Event;
use tempoline::sequence::Sequence;

fn event(id: &str, start: Option<Position>, finish: Option<Position>) -> Event {
    let interval = IntervalFactory::global()
        .instance_between(start, Granularity::Minute, finish, Granularity::Minute)
        .expect("valid interval");
    Event::new(id, "observation", interval)
}

fn ids(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.id()).collect()
}

#[test]
fn interval_order_sorts_by_start_then_finish() {
    let mut events = vec![
        event("late", Some(30), Some(40)),
        event("long", Some(10), Some(90)),
        event("short", Some(10), Some(20)),
        event("no onset", None, Some(5)),
    ];
    events.sort_by(by_interval);
    assert_eq!(ids(&events), vec!["no onset", "short", "long", "late"]);
}

#[test]
fn undefined_max_finish_sorts_last() {
    let open = event("open", Some(0), None);
    for finish in [i64::MIN + 1, -5, 0, 5, i64::MAX] {
        let closed = event("closed", Some(i64::MIN + 1), Some(finish));
        assert_eq!(by_max_finish(&open, &closed), Ordering::Greater);
        assert_eq!(by_max_finish(&closed, &open), Ordering::Less);
    }
    assert_eq!(by_max_finish(&open, &event("also open", Some(3), None)), Ordering::Equal);
}

#[test]
fn max_finish_compares_numeric_values() {
    // values beyond any small-number cache still compare equal by value
    let a = event("a", Some(0), Some(1_000_000));
    let b = event("b", Some(500), Some(1_000_000));
    assert_eq!(by_max_finish(&a, &b), Ordering::Equal);
    let c = event("c", Some(0), Some(999_999));
    assert_eq!(by_max_finish(&c, &a), Ordering::Less);

    let mut events = vec![
        event("ongoing", Some(1), None),
        event("second", Some(4), Some(20)),
        event("first", Some(8), Some(10)),
    ];
    events.sort_by(by_max_finish);
    assert_eq!(ids(&events), vec!["first", "second", "ongoing"]);
}

#[test]
fn segments_are_ordered_like_events() {
    let sequence = Sequence::new(vec![
        event("a", Some(1), Some(2)),
        event("b", Some(5), None),
        event("c", Some(6), Some(7)),
    ]);
    let early = sequence.segment(0, 0).expect("in range");
    let open = sequence.segment(1, 2).expect("in range");
    let empty_sequence: Sequence<Event> = Sequence::new(Vec::new());
    let empty = empty_sequence.whole();
    assert_eq!(by_interval(&early, &open), Ordering::Less);
    assert_eq!(by_max_finish(&open, &early), Ordering::Greater);
    // no extent at all sorts first in interval order and last in max-finish order
    assert_eq!(by_interval(&empty, &early), Ordering::Less);
    assert_eq!(by_max_finish(&empty, &early), Ordering::Greater);
}
