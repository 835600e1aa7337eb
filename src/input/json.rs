use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Label, LabelId, SampleValue, Timestamp, TimestampTrait};
use crate::series::{LabelDictionary, Row};

/// The zero point of the timestamps stored in a result set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Epoch {
    Unix,
    Postgres,
}

impl Epoch {
    #[inline]
    fn to_unix_millis(self, ts: Timestamp) -> Timestamp {
        match self {
            Epoch::Unix => ts,
            Epoch::Postgres => Timestamp::from_pg_millis(ts),
        }
    }
}

// {
//   "times": [1609459200000, 1609459260000],
//   "values": [1.5, null],
//   "label_ids": [1, 2],
//   "metric_override": "bar",
//   "additional_labels": {"zone": "eu"},
//   "error": "chunk decoding failed"
// }
#[derive(Debug, Deserialize)]
struct RowRecord {
    #[serde(default)]
    times: Vec<Timestamp>,
    #[serde(default)]
    values: Vec<Option<SampleValue>>,
    #[serde(default)]
    label_ids: Vec<LabelId>,
    #[serde(default)]
    metric_override: Option<String>,
    #[serde(default)]
    additional_labels: BTreeMap<String, String>,
    #[serde(default)]
    error: Option<String>,
}

impl RowRecord {
    fn into_row(self, epoch: Epoch) -> Row {
        let times: Vec<Timestamp> = self
            .times
            .into_iter()
            .map(|ts| epoch.to_unix_millis(ts))
            .collect();

        let mut row = Row::new(times, self.values, self.label_ids).with_additional_labels(
            self.additional_labels
                .into_iter()
                .map(|(name, value)| Label::new(name, value))
                .collect(),
        );
        if let Some(name) = self.metric_override {
            row = row.with_metric_override(name);
        }
        if let Some(message) = self.error {
            row = row.with_error(Error::row_fetch(message));
        }
        row
    }
}

// {"id": 1, "name": "__name__", "value": "http_requests_total"}
#[derive(Debug, Deserialize)]
struct LabelRecord {
    id: LabelId,
    name: String,
    value: String,
}

/// Reads a JSON array of rows.
pub fn read_rows<R: Read>(reader: R, epoch: Epoch) -> Result<Vec<Row>> {
    let records: Vec<RowRecord> = serde_json::from_reader(reader)?;
    debug!(rows = records.len(), ?epoch, "decoded rows");

    Ok(records
        .into_iter()
        .map(|record| record.into_row(epoch))
        .collect())
}

/// Reads a JSON array of `{"id", "name", "value"}` objects.
pub fn read_label_dictionary<R: Read>(reader: R) -> Result<LabelDictionary> {
    let records: Vec<LabelRecord> = serde_json::from_reader(reader)?;
    debug!(labels = records.len(), "decoded label dictionary");

    Ok(records
        .into_iter()
        .map(|r| (r.id, Label::new(r.name, r.value)))
        .collect())
}
