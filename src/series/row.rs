use tracing::trace;

use crate::error::Error;
use crate::model::{LabelId, Labels, SampleValue, Timestamp};

/// Positional view over a decoded timestamp column.
pub trait TimestampSeries {
    fn len(&self) -> usize;

    /// `None` when the timestamp at `idx` can't be read.
    fn at(&self, idx: usize) -> Option<Timestamp>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frees whatever backs the sequence. May be called more than once.
    fn release(&mut self) {}
}

/// Positional view over a nullable value column.
pub trait ValueSeries {
    fn len(&self) -> usize;

    /// `None` for an absent (null) value.
    fn at(&self, idx: usize) -> Option<SampleValue>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frees whatever backs the sequence. May be called more than once.
    fn release(&mut self) {}
}

impl TimestampSeries for Vec<Timestamp> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn at(&self, idx: usize) -> Option<Timestamp> {
        self.get(idx).copied()
    }

    fn release(&mut self) {
        self.clear();
        self.shrink_to_fit();
    }
}

impl ValueSeries for Vec<Option<SampleValue>> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn at(&self, idx: usize) -> Option<SampleValue> {
        self.get(idx).copied().flatten()
    }

    fn release(&mut self) {
        self.clear();
        self.shrink_to_fit();
    }
}

/// Raw query result of a single series.
pub struct Row {
    times: Box<dyn TimestampSeries>,
    values: Box<dyn ValueSeries>,
    label_ids: Vec<LabelId>,
    metric_override: Option<String>,
    additional_labels: Labels,
    err: Option<Error>,
    released: bool,
}

impl Row {
    pub fn new<T, V>(times: T, values: V, label_ids: Vec<LabelId>) -> Self
    where
        T: TimestampSeries + 'static,
        V: ValueSeries + 'static,
    {
        Self {
            times: Box::new(times),
            values: Box::new(values),
            label_ids,
            metric_override: None,
            additional_labels: Labels::new(),
            err: None,
            released: false,
        }
    }

    /// A row that failed upstream and carries no data.
    pub fn failed(err: Error) -> Self {
        let times: Vec<Timestamp> = Vec::new();
        let values: Vec<Option<SampleValue>> = Vec::new();
        Self::new(times, values, vec![]).with_error(err)
    }

    /// An empty override is the same as no override.
    pub fn with_metric_override<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        self.metric_override = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn with_additional_labels(mut self, labels: Labels) -> Self {
        self.additional_labels = labels;
        self
    }

    pub fn with_error(mut self, err: Error) -> Self {
        self.err = Some(err);
        self
    }

    #[inline]
    pub fn times(&self) -> &dyn TimestampSeries {
        self.times.as_ref()
    }

    #[inline]
    pub fn values(&self) -> &dyn ValueSeries {
        self.values.as_ref()
    }

    #[inline]
    pub fn label_ids(&self) -> &[LabelId] {
        &self.label_ids
    }

    #[inline]
    pub fn metric_override(&self) -> Option<&str> {
        self.metric_override.as_deref()
    }

    #[inline]
    pub fn additional_labels(&self) -> &Labels {
        &self.additional_labels
    }

    #[inline]
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Releases the backing sequences. Only the first call has an effect.
    pub fn close(&mut self) {
        if self.released {
            return;
        }
        trace!(samples = self.times.len(), "releasing row");
        self.times.release();
        self.values.release();
        self.released = true;
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Row")
            .field("times", &self.times.len())
            .field("values", &self.values.len())
            .field("label_ids", &self.label_ids)
            .field("metric_override", &self.metric_override)
            .field("additional_labels", &self.additional_labels)
            .field("err", &self.err)
            .field("released", &self.released)
            .finish()
    }
}
