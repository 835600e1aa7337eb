//! Adapts per-series query rows to labeled series with lazy sample iterators.
//!
//! ```text
//! Vec<Row> --build_series_set--> SeriesSet --at()--> Series --iterator()--> SampleIterator
//!                 |
//!           LabelResolver (one call for every label id of every row)
//! ```
mod iterator;
mod resolver;
mod row;
mod series;
mod set;

pub use iterator::{RowSampleIterator, SampleIterator, Samples};
pub use resolver::{LabelDictionary, LabelIdMap, LabelResolver};
pub use row::{Row, TimestampSeries, ValueSeries};
pub use series::Series;
pub use set::{build_series_set, ErrorSeriesSet, RowSeriesSet, SeriesSet};
