//! Runtime settings for the shared caches and logging.
//!
//! Settings are layered: built-in defaults, then an optional settings file
//! (any format the `config` crate understands, e.g. `tempoline.toml`), then
//! environment variables prefixed with `TEMPOLINE_` such as
//! `TEMPOLINE_INTERVAL_CACHE_CAPACITY=100000`.

use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::interval::IntervalFactory;
use crate::weight::WeightFactory;

pub const DEFAULT_INTERVAL_CACHE_CAPACITY: usize = 65_536;
pub const DEFAULT_WEIGHT_CACHE_CAPACITY: usize = 4_096;
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Entries the interval cache may hold before idle ones are purged.
    /// Zero disables the bound.
    pub interval_cache_capacity: usize,
    /// Same as above, for weights.
    pub weight_cache_capacity: usize,
    /// A `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_cache_capacity: DEFAULT_INTERVAL_CACHE_CAPACITY,
            weight_cache_capacity: DEFAULT_WEIGHT_CACHE_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn bound(capacity: usize) -> Option<usize> {
    match capacity {
        0 => None,
        capacity => Some(capacity),
    }
}

impl Settings {
    /// Loads settings from `path` (if given and present) and the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = ::config::Config::builder()
            .set_default(
                "interval_cache_capacity",
                defaults.interval_cache_capacity as i64,
            )?
            .set_default("weight_cache_capacity", defaults.weight_cache_capacity as i64)?
            .set_default("log_filter", defaults.log_filter)?;
        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix("TEMPOLINE"))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
    /// Applies the cache bounds to the process-wide factories. Without this
    /// call they are bounded by the `DEFAULT_*_CACHE_CAPACITY` constants.
    pub fn apply(&self) {
        IntervalFactory::global().set_capacity(bound(self.interval_cache_capacity));
        WeightFactory::global().set_capacity(bound(self.weight_cache_capacity));
        info!(
            interval_cache_capacity = self.interval_cache_capacity,
            weight_cache_capacity = self.weight_cache_capacity,
            "applied cache settings"
        );
    }
    /// Installs a formatting subscriber. `RUST_LOG` wins over `log_filter`.
    /// Does nothing if a global subscriber is already set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_filter));
        if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
            debug!(error = %e, "subscriber not installed");
        }
    }
}
