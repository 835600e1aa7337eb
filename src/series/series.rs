use super::iterator::{RowSampleIterator, Samples};
use super::resolver::LabelIdMap;
use super::row::{Row, TimestampSeries, ValueSeries};
use crate::error::{Error, Result};
use crate::model::{Label, Labels, LabelsTrait, METRIC_NAME_LABEL, NO_LABEL_ID};

/// A labeled view over the samples of one row. Borrows the row's columns,
/// releases nothing.
pub struct Series<'a> {
    labels: Labels,
    times: &'a dyn TimestampSeries,
    values: &'a dyn ValueSeries,
}

impl<'a> Series<'a> {
    /// Builds the canonical series of `row` from the already resolved
    /// `label_ids`. Nothing partial is ever returned.
    pub(super) fn assemble(row: &'a Row, label_ids: &LabelIdMap) -> Result<Self> {
        let (times, values) = (row.times(), row.values());
        if times.len() != values.len() {
            return Err(Error::InvalidRowData {
                times: times.len(),
                values: values.len(),
            });
        }

        // Practically never empty because of __name__.
        if row.label_ids().is_empty() {
            return Ok(Self {
                labels: Labels::new(),
                times,
                values,
            });
        }

        let mut labels =
            Labels::with_capacity(row.label_ids().len() + row.additional_labels().len());
        for &id in row.label_ids() {
            if id == NO_LABEL_ID {
                continue;
            }
            match label_ids.get(&id) {
                Some(label) if !label.is_empty() => labels.push(label.clone()),
                _ => return Err(Error::MissingLabelForId(id)),
            }
        }

        if let Some(metric) = row.metric_override() {
            if let Some(label) = labels.iter_mut().find(|l| l.name == METRIC_NAME_LABEL) {
                label.value = metric.to_string();
            }
        }

        // Not deduplicated against the resolved labels.
        labels.extend(row.additional_labels().iter().cloned());
        labels.sort_by_name();

        Ok(Self {
            labels,
            times,
            values,
        })
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn iterator(&self) -> RowSampleIterator<'a> {
        RowSampleIterator::new(self.times, self.values)
    }

    pub fn samples(&self) -> Samples<RowSampleIterator<'a>> {
        Samples::new(self.iterator())
    }
}

impl<'a> std::fmt::Debug for Series<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Series")
            .field("labels", &self.labels)
            .field("samples", &self.times.len())
            .finish()
    }
}
