use crate::filter::Epoch;
use crate::record::{CallStatus, NumberRecord, RecordId};
use crate::state::BulkAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Operator picked a status filter (`None` for "all statuses").
    StatusFilterChanged(Option<CallStatus>),
    /// Operator edited the search box (debounced text; empty clears it).
    SearchChanged(String),
    /// Operator asked for a refresh of page and count.
    RefreshRequested,
    NextPage,
    PrevPage,
    /// A page fetch finished. Discarded when `epoch` or `page` is stale.
    PageLoaded {
        epoch: Epoch,
        page: usize,
        result: Result<Vec<NumberRecord>, String>,
    },
    /// A count fetch finished. Discarded when `epoch` is stale.
    CountLoaded {
        epoch: Epoch,
        result: Result<u64, String>,
    },
    /// Row checkbox toggled.
    RowToggled { id: RecordId },
    /// Header checkbox toggled: select or deselect every visible row.
    PageToggled,
    /// "Select all matching" across every page of the current filter.
    SelectAllMatching,
    SelectionCleared,
    /// Operator asked to run a bulk action on the current selection.
    BulkRequested { action: BulkAction },
    /// Operator confirmed a pending destructive bulk action.
    BulkConfirmed,
    /// Operator backed out of a pending destructive bulk action.
    BulkDismissed,
    BulkCompleted {
        result: Result<BulkOutcome, String>,
    },
    UpdateStatusRequested {
        id: RecordId,
        status: CallStatus,
    },
    ResetRequested { id: RecordId },
    DeleteRequested { id: RecordId },
    /// A single-record mutation finished.
    MutationCompleted {
        id: RecordId,
        kind: MutationKind,
        result: Result<(), String>,
    },
    /// Operator submitted the "add numbers" textarea.
    NumbersSubmitted { raw: String },
    /// Operator picked a file of numbers to upload.
    UploadPicked { filename: String, bytes: Vec<u8> },
    ImportCompleted {
        result: Result<ImportReport, String>,
    },
    DismissError,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Which single-record mutation a completion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    UpdateStatus,
    Reset,
    Delete,
}

/// Per-action counts reported by the bulk resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkOutcome {
    pub updated: u64,
    pub reset: u64,
    pub deleted: u64,
}

/// Counts returned by the ingestion service, consumed verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub inserted: u64,
    pub duplicates: u64,
    pub invalid: u64,
    pub invalid_samples: Vec<String>,
}
