use super::row::{TimestampSeries, ValueSeries};
use crate::error::Error;
use crate::model::{SampleValue, Timestamp};

/// Forward-only cursor over the samples of a series.
///
/// Starts before the first sample: `next()` or `seek()` must succeed before
/// `at()` returns anything meaningful.
pub trait SampleIterator {
    /// Parks the iterator at the first sample with timestamp >= `t`.
    fn seek(&mut self, t: Timestamp) -> bool;

    /// The current sample, or `(0, 0.0)` when not positioned on one.
    fn at(&self) -> (Timestamp, SampleValue);

    fn next(&mut self) -> bool;

    fn err(&self) -> Option<Error> {
        None
    }
}

/// Walks the timestamp and value columns of a row in lockstep, skipping
/// positions with a null value or an unreadable timestamp.
pub struct RowSampleIterator<'a> {
    // None until the first next()/seek().
    cur: Option<usize>,
    total_samples: usize,
    times: &'a dyn TimestampSeries,
    values: &'a dyn ValueSeries,
}

impl<'a> RowSampleIterator<'a> {
    /// Expects `times` and `values` to be of the same length.
    pub fn new(times: &'a dyn TimestampSeries, values: &'a dyn ValueSeries) -> Self {
        Self {
            cur: None,
            total_samples: times.len(),
            times,
            values,
        }
    }

    #[inline]
    fn position(&self) -> Option<usize> {
        self.cur.filter(|&cur| cur < self.total_samples)
    }
}

impl<'a> SampleIterator for RowSampleIterator<'a> {
    // Timestamps are only forward-iterable, hence the linear scan from the
    // very beginning on every call.
    fn seek(&mut self, t: Timestamp) -> bool {
        self.cur = None;

        while self.next() {
            if self.at().0 >= t {
                return true;
            }
        }
        false
    }

    fn at(&self) -> (Timestamp, SampleValue) {
        match self.position() {
            Some(cur) => (
                self.times.at(cur).unwrap_or_default(),
                self.values.at(cur).unwrap_or_default(),
            ),
            None => (0, 0.0),
        }
    }

    fn next(&mut self) -> bool {
        let mut cur = self.cur.map_or(0, |cur| cur.saturating_add(1));

        while cur < self.total_samples {
            if self.times.at(cur).is_some() && self.values.at(cur).is_some() {
                self.cur = Some(cur);
                return true;
            }
            cur += 1;
        }

        self.cur = Some(self.total_samples);
        false
    }
}

/// Adapts a `SampleIterator` to `std::iter::Iterator`.
pub struct Samples<I> {
    inner: I,
}

impl<I: SampleIterator> Samples<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I: SampleIterator> std::iter::Iterator for Samples<I> {
    type Item = (Timestamp, SampleValue);

    fn next(&mut self) -> Option<Self::Item> {
        if SampleIterator::next(&mut self.inner) {
            Some(self.inner.at())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> (Vec<Timestamp>, Vec<Option<SampleValue>>) {
        (vec![0, 1, 2, 3], vec![Some(1.0), None, Some(3.0), None])
    }

    #[test]
    fn test_next_skips_absent_values() {
        let (times, values) = columns();
        let mut it = RowSampleIterator::new(&times, &values);

        assert_eq!((0, 0.0), it.at());

        assert!(it.next());
        assert_eq!((0, 1.0), it.at());
        assert!(it.next());
        assert_eq!((2, 3.0), it.at());

        assert!(!it.next());
        assert!(!it.next());
        assert_eq!((0, 0.0), it.at());
        assert!(it.err().is_none());
    }

    #[test]
    fn test_seek() {
        let (times, values) = columns();
        let mut it = RowSampleIterator::new(&times, &values);

        assert!(it.seek(2));
        assert_eq!((2, 3.0), it.at());

        // Backwards works too, the scan restarts from the beginning.
        assert!(it.seek(0));
        assert_eq!((0, 1.0), it.at());

        // Lands on the next present sample.
        assert!(it.seek(1));
        assert_eq!((2, 3.0), it.at());

        assert!(!it.seek(10));
        assert_eq!((0, 0.0), it.at());
        assert!(!it.next());
    }

    #[test]
    fn test_unreadable_timestamps_are_skipped() {
        struct Sparse(Vec<Option<Timestamp>>);

        impl TimestampSeries for Sparse {
            fn len(&self) -> usize {
                self.0.len()
            }

            fn at(&self, idx: usize) -> Option<Timestamp> {
                self.0.get(idx).copied().flatten()
            }
        }

        let times = Sparse(vec![Some(5), None, Some(7)]);
        let values: Vec<Option<SampleValue>> = vec![Some(1.0), Some(2.0), Some(3.0)];

        let samples: Vec<_> = Samples::new(RowSampleIterator::new(&times, &values)).collect();
        assert_eq!(vec![(5, 1.0), (7, 3.0)], samples);
    }

    #[test]
    fn test_empty() {
        let times: Vec<Timestamp> = vec![];
        let values: Vec<Option<SampleValue>> = vec![];
        let mut it = RowSampleIterator::new(&times, &values);

        assert!(!it.next());
        assert!(!it.seek(Timestamp::MIN));
        assert_eq!((0, 0.0), it.at());
    }
}
