pub mod cliopt;
pub mod common;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod runner;
pub mod series;

pub use error::{Error, Result};
pub use series::{build_series_set, LabelResolver, Row, SampleIterator, Series, SeriesSet};
