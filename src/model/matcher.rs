use std::convert::TryFrom;

use regex::Regex;

use super::labels::{Label, LabelName, LabelValue, LabelsTrait, METRIC_NAME_LABEL};
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct LabelMatcher {
    label: LabelName,
    match_op: MatchOp,
    value: LabelValue,
    re: Option<Regex>,
}

impl LabelMatcher {
    pub fn new<N, V>(label: N, match_op: MatchOp, value: V) -> Result<Self>
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        let label = label.into();
        let value = value.into();

        if label.is_empty() {
            return Err(Error::InvalidMatcher(format!("{}{}", match_op, value)));
        }

        let re = match match_op {
            MatchOp::EqlRe | MatchOp::NeqRe => Some(Regex::new(&format!("^(?:{})$", value))?),
            _ => None,
        };

        Ok(Self {
            label,
            match_op,
            value,
            re,
        })
    }

    pub fn name_matcher<V>(name: V) -> Result<Self>
    where
        V: Into<LabelValue>,
    {
        Self::new(METRIC_NAME_LABEL, MatchOp::Eql, name)
    }

    pub fn label(&self) -> &LabelName {
        &self.label
    }

    pub fn match_op(&self) -> &MatchOp {
        &self.match_op
    }

    pub fn value(&self) -> &LabelValue {
        &self.value
    }

    pub fn matches(&self, v: &str) -> bool {
        match (&self.match_op, &self.re) {
            (MatchOp::Eql, _) => self.value == v,
            (MatchOp::Neq, _) => self.value != v,
            (MatchOp::EqlRe, Some(re)) => re.is_match(v),
            (MatchOp::NeqRe, Some(re)) => !re.is_match(v),
            (_, None) => false,
        }
    }

    /// A label missing from the set is matched as an empty value.
    pub fn matches_labels(&self, labels: &[Label]) -> bool {
        self.matches(labels.value_of(&self.label).map_or("", String::as_str))
    }
}

impl PartialEq for LabelMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.match_op == other.match_op && self.value == other.value
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchOp {
    Eql,
    Neq,
    EqlRe,
    NeqRe,
}

impl MatchOp {
    fn as_str(&self) -> &'static str {
        match self {
            MatchOp::Eql => "=",
            MatchOp::Neq => "!=",
            MatchOp::EqlRe => "=~",
            MatchOp::NeqRe => "!~",
        }
    }
}

impl std::fmt::Display for MatchOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MatchOp {
    type Error = Error;

    fn try_from(op: &str) -> Result<Self> {
        match op {
            "=" => Ok(MatchOp::Eql),
            "!=" => Ok(MatchOp::Neq),
            "=~" => Ok(MatchOp::EqlRe),
            "!~" => Ok(MatchOp::NeqRe),
            _ => Err(Error::InvalidMatcher(op.to_string())),
        }
    }
}

/// Parses `name<op>value` where the value may be double-quoted,
/// e.g. `job=~"api.*"` or `__name__=foo`.
pub fn parse_matcher(s: &str) -> Result<LabelMatcher> {
    let at = s
        .find(|c: char| c == '=' || c == '!')
        .ok_or_else(|| Error::InvalidMatcher(s.to_string()))?;
    let (label, rest) = s.split_at(at);

    let op_len = match rest.as_bytes().get(1) {
        Some(b'=') | Some(b'~') => 2,
        _ => 1,
    };
    let match_op = MatchOp::try_from(&rest[..op_len])
        .map_err(|_| Error::InvalidMatcher(s.to_string()))?;

    let value = rest[op_len..].trim();
    let value = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    };

    LabelMatcher::new(label.trim(), match_op, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matcher() -> std::result::Result<(), Box<dyn std::error::Error>> {
        #[rustfmt::skip]
        let tests = [
            ("job=api", "job", MatchOp::Eql, "api"),
            ("job!=api", "job", MatchOp::Neq, "api"),
            ("job=~\"api.*\"", "job", MatchOp::EqlRe, "api.*"),
            ("job!~a|b", "job", MatchOp::NeqRe, "a|b"),
            ("__name__=", "__name__", MatchOp::Eql, ""),
        ];

        for (input, label, op, value) in &tests {
            let matcher = parse_matcher(input)?;
            assert_eq!(*label, matcher.label().as_str());
            assert_eq!(op, matcher.match_op());
            assert_eq!(*value, matcher.value().as_str());
        }

        Ok(())
    }

    #[test]
    fn test_parse_matcher_invalid() {
        for input in &["job", "=api", "job!api", "job=~(", ""] {
            assert!(parse_matcher(input).is_err(), "{} should not parse", input);
        }
    }

    #[test]
    fn test_matches_labels() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let labels = vec![Label::new(METRIC_NAME_LABEL, "foo"), Label::new("job", "api-1")];

        assert!(LabelMatcher::name_matcher("foo")?.matches_labels(&labels));
        assert!(parse_matcher("job=~api-.*")?.matches_labels(&labels));
        assert!(!parse_matcher("job!~api-.*")?.matches_labels(&labels));
        assert!(parse_matcher("env=\"\"")?.matches_labels(&labels));
        assert!(!parse_matcher("env=prod")?.matches_labels(&labels));
        assert!(parse_matcher("env!=prod")?.matches_labels(&labels));

        Ok(())
    }
}
