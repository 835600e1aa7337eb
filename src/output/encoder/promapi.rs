use std::collections::BTreeMap;

use serde::Serialize;

use super::encoder::{format_value, Encoder};
use crate::error::Result;
use crate::model::{Label, LabelsTrait, SampleValue, Timestamp};

// One element of a range query "matrix" result, one per line:
// {
//   "metric": {"__name__": "foo", "job": "a"},
//   "values": [[1622104474.588, "0.938"], [1622104489.591, "0.94"]]
// }
#[derive(Serialize)]
struct MatrixItem<'a> {
    metric: BTreeMap<&'a str, &'a str>,
    values: Vec<(f64, String)>,
}

impl<'a> MatrixItem<'a> {
    fn new(labels: &'a [Label], samples: &[(Timestamp, SampleValue)]) -> Self {
        Self {
            metric: labels.to_map(),
            values: samples
                .iter()
                .map(|(ts, value)| (*ts as f64 / 1000.0, format_value(*value)))
                .collect(),
        }
    }
}

#[derive(Default)]
pub struct PromApiEncoder {}

impl PromApiEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for PromApiEncoder {
    fn encode(&self, labels: &[Label], samples: &[(Timestamp, SampleValue)]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&MatrixItem::new(labels, samples))?)
    }
}
