//! Extended-real weights used when comparing and scoring interval distances.
//!
//! A [`Weight`] is either a finite `i64`, one of the two infinities, or one of
//! the two epsilons that sit infinitesimally below and above zero. The order
//! is total:
//!
//! `NEG_INFINITY < ... < -1 < NEG_EPSILON < ZERO < POS_EPSILON < 1 < ... < POS_INFINITY`
//!
//! Weights are interned through a [`WeightFactory`] so that equal values
//! share one allocation.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;

use crate::config::DEFAULT_WEIGHT_CACHE_CAPACITY;
use crate::keeper::Keeper;

// custom made ordering: variants and offsets are declared in ascending order
#[derive(Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
enum Offset {
    Below,
    Exact,
    Above,
}

#[derive(Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
enum Magnitude {
    NegInfinity,
    Finite(i64, Offset),
    PosInfinity,
}

#[derive(Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Weight {
    magnitude: Magnitude,
}

impl Weight {
    pub const NEG_INFINITY: Weight = Weight {
        magnitude: Magnitude::NegInfinity,
    };
    pub const NEG_EPSILON: Weight = Weight {
        magnitude: Magnitude::Finite(0, Offset::Below),
    };
    pub const ZERO: Weight = Weight {
        magnitude: Magnitude::Finite(0, Offset::Exact),
    };
    pub const POS_EPSILON: Weight = Weight {
        magnitude: Magnitude::Finite(0, Offset::Above),
    };
    pub const POS_INFINITY: Weight = Weight {
        magnitude: Magnitude::PosInfinity,
    };

    pub const fn finite(value: i64) -> Self {
        Self {
            magnitude: Magnitude::Finite(value, Offset::Exact),
        }
    }
    /// The underlying number. Epsilons report zero, infinities `None`.
    pub fn value(&self) -> Option<i64> {
        match self.magnitude {
            Magnitude::Finite(value, _) => Some(value),
            _ => None,
        }
    }
    pub fn is_infinite(&self) -> bool {
        matches!(
            self.magnitude,
            Magnitude::NegInfinity | Magnitude::PosInfinity
        )
    }
    pub fn is_epsilon(&self) -> bool {
        matches!(
            self.magnitude,
            Magnitude::Finite(_, Offset::Below | Offset::Above)
        )
    }
    pub fn is_finite(&self) -> bool {
        matches!(self.magnitude, Magnitude::Finite(_, Offset::Exact))
    }
}

impl From<i64> for Weight {
    fn from(value: i64) -> Self {
        Weight::finite(value)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.magnitude {
            Magnitude::NegInfinity => write!(f, "-inf"),
            Magnitude::PosInfinity => write!(f, "+inf"),
            Magnitude::Finite(0, Offset::Below) => write!(f, "-eps"),
            Magnitude::Finite(0, Offset::Above) => write!(f, "+eps"),
            Magnitude::Finite(value, Offset::Below) => write!(f, "{}-eps", value),
            Magnitude::Finite(value, Offset::Above) => write!(f, "{}+eps", value),
            Magnitude::Finite(value, Offset::Exact) => write!(f, "{}", value),
        }
    }
}

/// Hands out shared, canonical [`Weight`] instances.
///
/// The five named constants are pinned for the lifetime of the factory and
/// live outside the cache, so they neither count toward its capacity nor
/// show up in [`WeightFactory::len`]. Finite values are reclaimable once no
/// caller holds them.
#[derive(Debug)]
pub struct WeightFactory {
    keeper: Mutex<Keeper<Weight>>,
    neg_infinity: Arc<Weight>,
    neg_epsilon: Arc<Weight>,
    zero: Arc<Weight>,
    pos_epsilon: Arc<Weight>,
    pos_infinity: Arc<Weight>,
}

lazy_static! {
    static ref WEIGHT_FACTORY: WeightFactory =
        WeightFactory::with_capacity(Some(DEFAULT_WEIGHT_CACHE_CAPACITY));
}

impl WeightFactory {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            keeper: Mutex::new(Keeper::with_capacity(capacity)),
            neg_infinity: Arc::new(Weight::NEG_INFINITY),
            neg_epsilon: Arc::new(Weight::NEG_EPSILON),
            zero: Arc::new(Weight::ZERO),
            pos_epsilon: Arc::new(Weight::POS_EPSILON),
            pos_infinity: Arc::new(Weight::POS_INFINITY),
        }
    }
    /// The process-wide factory.
    pub fn global() -> &'static WeightFactory {
        &WEIGHT_FACTORY
    }
    // the keeper only ever holds immutable values, so a poisoned lock is still usable
    fn keeper(&self) -> MutexGuard<'_, Keeper<Weight>> {
        self.keeper.lock().unwrap_or_else(PoisonError::into_inner)
    }
    pub fn instance(&self) -> Arc<Weight> {
        Arc::clone(&self.zero)
    }
    pub fn instance_of(&self, value: i64) -> Arc<Weight> {
        if value == 0 {
            return self.instance();
        }
        self.keep(Weight::finite(value))
    }
    pub fn keep(&self, weight: Weight) -> Arc<Weight> {
        let pinned = match weight {
            Weight::NEG_INFINITY => &self.neg_infinity,
            Weight::NEG_EPSILON => &self.neg_epsilon,
            Weight::ZERO => &self.zero,
            Weight::POS_EPSILON => &self.pos_epsilon,
            Weight::POS_INFINITY => &self.pos_infinity,
            _ => return self.keeper().keep(weight).0,
        };
        Arc::clone(pinned)
    }
    pub fn neg_infinity(&self) -> Arc<Weight> {
        Arc::clone(&self.neg_infinity)
    }
    pub fn neg_epsilon(&self) -> Arc<Weight> {
        Arc::clone(&self.neg_epsilon)
    }
    pub fn pos_epsilon(&self) -> Arc<Weight> {
        Arc::clone(&self.pos_epsilon)
    }
    pub fn pos_infinity(&self) -> Arc<Weight> {
        Arc::clone(&self.pos_infinity)
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

impl Default for WeightFactory {
    fn default() -> Self {
        Self::new()
    }
}
