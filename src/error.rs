use std::{error, io, sync::Arc};

use thiserror::Error;

use crate::model::LabelId;

/// Shared, cloneable source error. Sticky errors are handed out on every
/// `err()` call, so everything an `Error` carries has to be `Clone`.
pub type Source = Arc<dyn error::Error + Send + Sync>;

#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("invalid row data: {times} timestamps but {values} values")]
    InvalidRowData { times: usize, values: usize },

    #[error("missing label for id {0}")]
    MissingLabelForId(LabelId),

    #[error("row fetch failed: {0}")]
    RowFetch(#[source] Source),

    #[error("label resolution failed: {0}")]
    Resolution(#[source] Source),

    #[error("error retrieving series set: {0}")]
    SeriesSet(#[source] Box<Error>),

    #[error("invalid label matcher '{0}'")]
    InvalidMatcher(String),

    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("timestamp parsing failed: {0}")]
    Time(#[from] chrono::ParseError),

    #[error("malformed input: {0}")]
    Json(#[source] Arc<serde_json::Error>),

    #[error("I/O failed: {0}")]
    Io(#[source] Arc<io::Error>),

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn row_fetch(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
        Error::RowFetch(Arc::from(err.into()))
    }

    pub fn resolution(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
        Error::Resolution(Arc::from(err.into()))
    }

    /// Strips the series set context, if any.
    pub fn inner(&self) -> &Error {
        match self {
            Error::SeriesSet(inner) => inner.inner(),
            other => other,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(Arc::new(err))
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Usage(message.into())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Usage(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
