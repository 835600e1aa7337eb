use std::cell::Cell;
use std::collections::HashMap;
use std::iter::FromIterator;

use crate::error::Result;
use crate::model::{Label, LabelId};

/// Label ids of interest mapped to their labels. Keys are inserted with a
/// zero-value `Label` placeholder and filled in by a `LabelResolver`.
pub type LabelIdMap = HashMap<LabelId, Label>;

pub trait LabelResolver {
    /// Fills in the label of every key of `ids` in place. On error the
    /// contents of `ids` are unspecified.
    fn resolve(&self, ids: &mut LabelIdMap) -> Result<()>;
}

impl<F> LabelResolver for F
where
    F: Fn(&mut LabelIdMap) -> Result<()>,
{
    fn resolve(&self, ids: &mut LabelIdMap) -> Result<()> {
        self(ids)
    }
}

/// In-memory label store.
///
/// Unknown ids are left as placeholders rather than failing the whole batch,
/// so they surface as missing labels for the rows that reference them.
#[derive(Debug, Default)]
pub struct LabelDictionary {
    labels: HashMap<LabelId, Label>,
    calls: Cell<usize>,
}

impl LabelDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of `resolve` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl FromIterator<(LabelId, Label)> for LabelDictionary {
    fn from_iter<I: IntoIterator<Item = (LabelId, Label)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
            calls: Cell::new(0),
        }
    }
}

impl LabelResolver for LabelDictionary {
    fn resolve(&self, ids: &mut LabelIdMap) -> Result<()> {
        self.calls.set(self.calls.get() + 1);

        for (id, label) in ids.iter_mut() {
            if let Some(known) = self.labels.get(id) {
                *label = known.clone();
            }
        }
        Ok(())
    }
}
