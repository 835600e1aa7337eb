use crate::error::Result;
use crate::model::{Label, SampleValue, Timestamp};

pub trait Encoder {
    fn encode(&self, labels: &[Label], samples: &[(Timestamp, SampleValue)]) -> Result<Vec<u8>>;
}

/// Formats a sample value the way the Prometheus HTTP API does.
pub fn format_value(value: SampleValue) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == SampleValue::INFINITY {
        "+Inf".to_string()
    } else if value == SampleValue::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        #[rustfmt::skip]
        let tests = [
            (1.0, "1"),
            (0.25, "0.25"),
            (-3.5, "-3.5"),
            (f64::NAN, "NaN"),
            (f64::INFINITY, "+Inf"),
            (f64::NEG_INFINITY, "-Inf"),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, format_value(*input));
        }
    }
}
