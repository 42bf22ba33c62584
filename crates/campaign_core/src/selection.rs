use std::collections::BTreeSet;

use crate::effect::SelectionRequest;
use crate::record::RecordId;

/// Which records are currently chosen, without ever holding more ids than
/// the operator has actually touched.
///
/// `Explicit` is an included-id set; `Complement` means "every record
/// matching the paired filter snapshot, minus the excluded set" and is the
/// only way to select a result set too large to enumerate on the client.
/// A selection is meaningless detached from its filter snapshot; the owning
/// state resets it whenever the snapshot changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Explicit { included: BTreeSet<RecordId> },
    Complement { excluded: BTreeSet<RecordId> },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Explicit {
            included: BTreeSet::new(),
        }
    }
}

impl Selection {
    /// Flips membership of `id`. Involutive in both representations.
    pub fn toggle(&mut self, id: RecordId) {
        let set = match self {
            Selection::Explicit { included } => included,
            Selection::Complement { excluded } => excluded,
        };
        if !set.remove(&id) {
            set.insert(id);
        }
    }

    /// Switches to "all records matching the current filter".
    pub fn select_all_matching(&mut self) {
        *self = Selection::Complement {
            excluded: BTreeSet::new(),
        };
    }

    /// Resets to the empty explicit selection.
    pub fn clear(&mut self) {
        *self = Selection::default();
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        match self {
            Selection::Explicit { included } => included.contains(&id),
            Selection::Complement { excluded } => !excluded.contains(&id),
        }
    }

    /// Effective number of selected records, given the total for the
    /// paired filter. The selection never caches the total itself.
    pub fn count(&self, total: u64) -> u64 {
        match self {
            Selection::Explicit { included } => included.len() as u64,
            Selection::Complement { excluded } => total.saturating_sub(excluded.len() as u64),
        }
    }

    /// Drops `id` from whichever set holds it, e.g. after the record was
    /// deleted server-side.
    pub fn forget(&mut self, id: RecordId) {
        match self {
            Selection::Explicit { included } => {
                included.remove(&id);
            }
            Selection::Complement { excluded } => {
                excluded.remove(&id);
            }
        }
    }

    pub fn is_complement(&self) -> bool {
        matches!(self, Selection::Complement { .. })
    }

    /// The compact form sent to the bulk resolver. A complement selection
    /// stays a complement; it is never expanded into an id list.
    pub fn to_request(&self) -> SelectionRequest {
        match self {
            Selection::Explicit { included } => SelectionRequest::Explicit {
                ids: included.iter().copied().collect(),
            },
            Selection::Complement { excluded } => SelectionRequest::Complement {
                excluded_ids: excluded.iter().copied().collect(),
            },
        }
    }
}
