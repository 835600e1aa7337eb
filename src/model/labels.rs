use std::collections::BTreeMap;
use std::fmt;

pub type LabelName = String;

pub type LabelValue = String;

/// Numeric surrogate key of a (name, value) pair in the label store.
pub type LabelId = i64;

/// Reserved identifier meaning "no label at this position".
pub const NO_LABEL_ID: LabelId = 0;

pub const METRIC_NAME_LABEL: &str = "__name__";

/// The zero value (empty name and value) doubles as the "not resolved yet"
/// placeholder of a label id mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    pub name: LabelName,
    pub value: LabelValue,
}

impl Label {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={:?}", self.name, self.value)
    }
}

pub type Labels = Vec<Label>;

pub trait LabelsTrait {
    fn name(&self) -> Option<&LabelValue>;
    fn value_of(&self, name: &str) -> Option<&LabelValue>;
    fn sort_by_name(&mut self);
    fn to_map(&self) -> BTreeMap<&str, &str>;
}

impl LabelsTrait for [Label] {
    #[inline]
    fn name(&self) -> Option<&LabelValue> {
        self.value_of(METRIC_NAME_LABEL)
    }

    fn value_of(&self, name: &str) -> Option<&LabelValue> {
        self.iter().find(|l| l.name == name).map(|l| &l.value)
    }

    // Stable, so labels sharing a name keep their relative order.
    fn sort_by_name(&mut self) {
        self.sort_by(|a, b| a.name.cmp(&b.name));
    }

    // Last one wins if a name repeats.
    fn to_map(&self) -> BTreeMap<&str, &str> {
        self.iter()
            .map(|l| (l.name.as_str(), l.value.as_str()))
            .collect()
    }
}
