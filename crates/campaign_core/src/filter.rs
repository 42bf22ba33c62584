use crate::record::CallStatus;

/// Monotonic counter distinguishing filter snapshots in time.
pub type Epoch = u64;

/// The immutable (status, search) pair a selection and a total count are
/// valid against.
///
/// Filter identity is defined by status and search only; the page index
/// lives outside the snapshot. The epoch is bumped on every status change,
/// search change, or explicit refresh, so two snapshots with equal fields
/// taken at different times are still distinct values. In-flight fetches
/// are tagged with the epoch they were issued for, and results carrying a
/// stale epoch are discarded instead of cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSnapshot {
    status: Option<CallStatus>,
    search: Option<String>,
    epoch: Epoch,
}

impl FilterSnapshot {
    pub fn status(&self) -> Option<CallStatus> {
        self.status
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// A new snapshot with a different status filter.
    pub(crate) fn with_status(&self, status: Option<CallStatus>) -> Self {
        Self {
            status,
            search: self.search.clone(),
            epoch: self.epoch + 1,
        }
    }

    /// A new snapshot with a different search term (`None` for no search).
    pub(crate) fn with_search(&self, search: Option<String>) -> Self {
        Self {
            status: self.status,
            search,
            epoch: self.epoch + 1,
        }
    }

    /// The same filter fields captured at a later point in time.
    pub(crate) fn bumped(&self) -> Self {
        Self {
            status: self.status,
            search: self.search.clone(),
            epoch: self.epoch + 1,
        }
    }
}
