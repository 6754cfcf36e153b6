//! Tempoline – uncertain time intervals, ordered sequences and multi-source
//! event merging, the groundwork for temporal abstraction over clinical data.
//!
//! Tempoline centers on the *temporal proposition*: anything that holds over
//! a span of time, such as an encounter, a lab result or a derived
//! abstraction. Its extent is an [`interval::Interval`] in which both the start
//! and the finish may be uncertain:
//! * The start lies somewhere in `[min_start, max_start]`, the finish in
//!   `[min_finish, max_finish]`.
//! * Any bound may be undefined, meaning unbounded in that direction.
//! * Each side carries a [`granularity::Granularity`] telling the precision it
//!   was recorded with.
//!
//! Intervals and [`weight::Weight`]s are immutable values obtained through
//! factories that keep one shared `Arc` per distinct value (see [`keeper`]).
//! Both factories exist once per process ([`interval::IntervalFactory::global`]
//! and [`weight::WeightFactory::global`]) and may also be instantiated locally.
//!
//! ## Modules
//! * [`interval`] – The interval value and its canonicalizing factory.
//! * [`weight`] – Extended-real weights (finite, ±infinity, ±epsilon).
//! * [`keeper`] – Interning storage with reclaim-on-idle and a capacity bound.
//! * [`granularity`] – Units of time precision and their rendering.
//! * [`proposition`] – The [`proposition::TemporalProposition`] capability and
//!   a basic [`proposition::Event`].
//! * [`ordering`] – Interval order and max-finish order.
//! * [`sequence`] – Ordered sequences and the segments carved out of them.
//! * [`multiplex`] – Merging of per-entity event streams from many backends.
//! * [`config`] – Cache and logging settings.
//!
//! ## Data Flow
//! Backends expose one ordered stream of `(entity key, proposition)` pairs
//! each. A [`multiplex::Multiplexer`] merges them into one stream that visits
//! every entity once, with the entity's propositions in temporal order.
//! [`multiplex::Multiplexer::into_sequences`] packs each entity's history into
//! a [`sequence::Sequence`], and abstraction logic carves
//! [`sequence::Segment`]s out of it; a segment's interval is the envelope of
//! the propositions it covers.
//!
//! ## Quick Start
//! ```
//! use tempoline::granularity::Granularity;
//! use tempoline::interval::IntervalFactory;
//! use tempoline::weight::{Weight, WeightFactory};
//!
//! let intervals = IntervalFactory::global();
//! let a = intervals.instance_between(Some(10), Granularity::Day, Some(20), Granularity::Day).unwrap();
//! let b = intervals.instance_between(Some(10), Granularity::Day, Some(20), Granularity::Day).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! assert!(intervals.instance_between(Some(20), Granularity::Day, Some(10), Granularity::Day).is_err());
//!
//! let weights = WeightFactory::global();
//! assert!(*weights.instance() < *weights.pos_epsilon());
//! assert!(*weights.pos_epsilon() < Weight::finite(1));
//! ```

pub mod config;
pub mod error;
pub mod granularity;
pub mod interval;
pub mod keeper;
pub mod multiplex;
pub mod ordering;
pub mod proposition;
pub mod sequence;
pub mod weight;

pub use error::{Result, SourceError, TemporalError};
