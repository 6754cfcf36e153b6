use tempoline::TemporalError;
use tempoline::granularity::{Granularity, Position};
use tempoline::interval::IntervalFactory;
use tempoline::proposition::{Event, TemporalProposition};
use tempoline::sequence::{Segment, Sequence};

fn event(id: &str, start: Option<Position>, finish: Option<Position>) -> Event {
    let interval = IntervalFactory::global()
        .instance_between(start, Granularity::Day, finish, Granularity::Day)
        .expect("valid interval");
    Event::new(id, "encounter", interval)
}

fn setup() -> Sequence<Event> {
    Sequence::new(vec![
        event("a", Some(1), Some(4)),
        event("b", Some(3), Some(9)),
        event("c", Some(5), Some(6)),
        event("d", Some(8), Some(12)),
    ])
}

#[test]
fn sequence_preserves_construction_order() {
    // deliberately out of temporal order
    let sequence: Sequence<Event> = vec![
        event("late", Some(50), Some(60)),
        event("early", Some(1), Some(2)),
    ]
    .into_iter()
    .collect();
    let ids: Vec<&str> = sequence.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["late", "early"]);
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.get(1).map(|e| e.id()), Some("early"));
    assert!(sequence.get(2).is_none());
}

#[test]
fn sub_sequence_is_inclusive() {
    let sequence = setup();
    let middle = sequence.sub_sequence(1, 2).expect("in range");
    let ids: Vec<&str> = middle.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert_eq!(sequence.sub_sequence(3, 3).expect("in range").len(), 1);
}

#[test]
fn bad_ranges_fail_at_construction() {
    let sequence = setup();
    for (first, last) in [(2, 1), (0, 4), (4, 4), (7, 9)] {
        assert!(matches!(
            sequence.segment(first, last),
            Err(TemporalError::IndexRange { .. })
        ));
        assert!(matches!(
            sequence.sub_sequence(first, last),
            Err(TemporalError::IndexRange { len: 4, .. })
        ));
    }
    let empty: Sequence<Event> = Sequence::new(Vec::new());
    assert!(Segment::new(&empty, 0, 0).is_err());
}

#[test]
fn empty_segment_has_no_interval() {
    let empty: Sequence<Event> = Sequence::new(Vec::new());
    let segment = empty.whole();
    assert!(segment.is_empty());
    assert_eq!(segment.len(), 0);
    assert!(segment.interval().is_none());
    assert!(segment.elements().is_empty());
}

#[test]
fn singleton_segment_matches_its_element() {
    let sequence = setup();
    let segment = sequence.segment(2, 2).expect("in range");
    let element = sequence.get(2).expect("present");
    assert_eq!(segment.interval(), element.interval());
    // both come from the global factory, so they are the same instance
    let from_segment = segment.interval().expect("interval");
    assert!(std::ptr::eq(from_segment, &*element.shared_interval()));
}

#[test]
fn multi_element_segment_is_the_envelope() {
    let sequence = setup();
    let segment = sequence.segment(0, 2).expect("in range");
    let envelope = segment.interval().expect("interval");
    assert_eq!(envelope.min_start(), Some(1));
    assert_eq!(envelope.max_start(), Some(1));
    assert_eq!(envelope.min_finish(), Some(9));
    assert_eq!(envelope.max_finish(), Some(9));
    let all = sequence.whole();
    let envelope = all.interval().expect("interval");
    assert_eq!(envelope.min_start(), Some(1));
    assert_eq!(envelope.max_finish(), Some(12));
    assert_eq!(all.len(), 4);
}

#[test]
fn envelope_granularities_come_from_the_ends() {
    let factory = IntervalFactory::global();
    let sequence = Sequence::new(vec![
        Event::new(
            "first",
            "lab",
            factory
                .instance_between(Some(1), Granularity::Hour, Some(2), Granularity::Minute)
                .expect("valid"),
        ),
        Event::new(
            "last",
            "lab",
            factory
                .instance_between(Some(3), Granularity::Second, Some(4), Granularity::Year)
                .expect("valid"),
        ),
    ]);
    let envelope = sequence.whole();
    let interval = envelope.interval().expect("interval");
    assert_eq!(interval.start_granularity(), Granularity::Hour);
    assert_eq!(interval.finish_granularity(), Granularity::Year);
}

#[test]
fn undefined_member_bounds_propagate() {
    let sequence = Sequence::new(vec![
        event("known", Some(2), Some(4)),
        event("unknown onset", None, Some(3)),
        event("ongoing", Some(5), None),
    ]);
    let segment = sequence.whole();
    let envelope = segment.interval().expect("interval");
    assert_eq!(envelope.min_start(), None);
    assert_eq!(envelope.max_start(), None);
    assert_eq!(envelope.min_finish(), None);
    assert_eq!(envelope.max_finish(), None);

    // without the open-ended member the finish is known again
    let bounded = segment.with_range(0, 1).expect("in range");
    let envelope = bounded.interval().expect("interval");
    assert_eq!(envelope.min_start(), None);
    assert_eq!(envelope.max_finish(), Some(4));
}

#[test]
fn interval_is_computed_once() {
    let sequence = setup();
    let segment = sequence.segment(1, 3).expect("in range");
    let first = segment.interval().expect("interval") as *const _;
    let second = segment.interval().expect("interval") as *const _;
    assert_eq!(first, second);
}

#[test]
fn with_range_creates_a_new_segment() {
    let sequence = setup();
    let segment = sequence.segment(0, 1).expect("in range");
    let wider = segment.with_range(0, 3).expect("in range");
    assert_eq!(segment.last(), Some(1));
    assert_eq!(wider.last(), Some(3));
    assert_eq!(wider.first(), Some(0));
    assert!(std::ptr::eq(segment.sequence(), wider.sequence()));
    assert_eq!(segment.interval().and_then(|i| i.max_finish()), Some(9));
    assert_eq!(wider.interval().and_then(|i| i.max_finish()), Some(12));
    assert!(segment.with_range(3, 4).is_err());
}

#[test]
fn segments_nest_into_sequences() {
    let sequence = setup();
    let segments = Sequence::new(vec![
        sequence.segment(0, 1).expect("in range"),
        sequence.segment(2, 3).expect("in range"),
    ]);
    let outer = segments.whole();
    let envelope = outer.interval().expect("interval");
    assert_eq!(envelope.min_start(), Some(1));
    assert_eq!(envelope.max_finish(), Some(12));
}
