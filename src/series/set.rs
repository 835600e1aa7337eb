use tracing::{debug, warn};

use super::resolver::{LabelIdMap, LabelResolver};
use super::row::Row;
use super::series::Series;
use crate::error::Error;
use crate::model::{Label, NO_LABEL_ID};

/// Cursor over a set of series.
///
/// `next()` must be called before every `at()`. Errors don't stop the
/// iteration; callers check `err()` once `next()` returns false.
pub trait SeriesSet {
    fn next(&mut self) -> bool;

    /// The series at the current position, if any.
    fn at(&mut self) -> Option<Series<'_>>;

    fn err(&self) -> Option<Error>;

    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Releases the resources of every row.
    fn close(&mut self);
}

/// Resolves the labels referenced by all the `rows` in a single
/// `resolver` call and returns a cursor over the rows.
pub fn build_series_set<R>(rows: Vec<Row>, resolver: &R) -> Box<dyn SeriesSet>
where
    R: LabelResolver + ?Sized,
{
    let mut label_ids = LabelIdMap::new();
    for row in rows.iter() {
        for &id in row.label_ids() {
            if id != NO_LABEL_ID {
                label_ids.entry(id).or_insert_with(Label::default);
            }
        }
    }

    debug!(rows = rows.len(), label_ids = label_ids.len(), "resolving label ids");
    if let Err(err) = resolver.resolve(&mut label_ids) {
        warn!(error = %err, "label resolution failed");
        return Box::new(ErrorSeriesSet::new(err));
    }

    Box::new(RowSeriesSet::new(rows, label_ids))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Position {
    Unstarted,
    At(usize),
    Exhausted,
}

pub struct RowSeriesSet {
    rows: Vec<Row>,
    label_ids: LabelIdMap,
    position: Position,
    // The first error seen. Never cleared.
    err: Option<Error>,
}

impl RowSeriesSet {
    pub fn new(rows: Vec<Row>, label_ids: LabelIdMap) -> Self {
        Self {
            rows,
            label_ids,
            position: Position::Unstarted,
            err: None,
        }
    }
}

impl SeriesSet for RowSeriesSet {
    fn next(&mut self) -> bool {
        let idx = match self.position {
            Position::Exhausted => return false,
            Position::Unstarted => 0,
            Position::At(idx) => idx + 1,
        };

        if idx >= self.rows.len() {
            self.position = Position::Exhausted;
            return false;
        }
        self.position = Position::At(idx);

        if self.err.is_none() {
            if let Some(err) = self.rows[idx].err() {
                debug!(row = idx, error = %err, "row carries an error");
                self.err = Some(err.clone());
            }
        }
        true
    }

    fn at(&mut self) -> Option<Series<'_>> {
        let idx = match self.position {
            Position::At(idx) => idx,
            _ => return None,
        };

        let row = self.rows.get(idx)?;
        if row.err().is_some() {
            return None;
        }

        match Series::assemble(row, &self.label_ids) {
            Ok(series) => Some(series),
            Err(err) => {
                debug!(row = idx, error = %err, "series assembly failed");
                if self.err.is_none() {
                    self.err = Some(err);
                }
                None
            }
        }
    }

    fn err(&self) -> Option<Error> {
        self.err
            .as_ref()
            .map(|err| Error::SeriesSet(Box::new(err.clone())))
    }

    fn close(&mut self) {
        for row in self.rows.iter_mut() {
            row.close();
        }
    }
}

/// A series set that failed before it could expose any series.
#[derive(Debug)]
pub struct ErrorSeriesSet {
    err: Error,
}

impl ErrorSeriesSet {
    pub fn new(err: Error) -> Self {
        Self { err }
    }
}

impl SeriesSet for ErrorSeriesSet {
    fn next(&mut self) -> bool {
        false
    }

    fn at(&mut self) -> Option<Series<'_>> {
        None
    }

    fn err(&self) -> Option<Error> {
        Some(self.err.clone())
    }

    fn close(&mut self) {}
}
