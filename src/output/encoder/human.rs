use super::encoder::{format_value, Encoder};
use crate::error::Result;
use crate::model::{
    Label, LabelsTrait, SampleValue, Timestamp, TimestampTrait, METRIC_NAME_LABEL,
};

/// `foo{job="a"}` followed by one tab-indented `<time>\t<value>` line per
/// sample.
#[derive(Default)]
pub struct HumanReadableEncoder {}

impl HumanReadableEncoder {
    pub fn new() -> Self {
        Self {}
    }

    fn format_labels(&self, labels: &[Label]) -> String {
        let rest: Vec<_> = labels
            .iter()
            .filter(|l| l.name != METRIC_NAME_LABEL)
            .map(|l| l.to_string())
            .collect();

        format!(
            "{}{{{}}}",
            labels.name().map_or("", String::as_str),
            rest.join(", ")
        )
    }
}

impl Encoder for HumanReadableEncoder {
    fn encode(&self, labels: &[Label], samples: &[(Timestamp, SampleValue)]) -> Result<Vec<u8>> {
        let mut lines = vec![self.format_labels(labels)];
        for (ts, value) in samples {
            lines.push(format!("\t{}\t{}", ts.to_string_millis(), format_value(*value)));
        }
        Ok(lines.join("\n").into_bytes())
    }
}
