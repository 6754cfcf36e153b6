use thiserror::Error;

/// Whatever a backend source reports when it fails to produce its next item.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum TemporalError {
    #[error("Invalid interval: {message}")]
    InvalidInterval { message: String },
    #[error("Stream read error in source {source_index}: {cause}")]
    StreamRead {
        source_index: usize,
        #[source]
        cause: SourceError,
    },
    #[error("Index range error: [{first}, {last}] is not a valid range in a sequence of length {len}")]
    IndexRange { first: usize, last: usize, len: usize },
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TemporalError>;

// Helper conversions
impl From<::config::ConfigError> for TemporalError {
    fn from(e: ::config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
