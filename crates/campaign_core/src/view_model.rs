use crate::msg::{BulkOutcome, ImportReport};
use crate::record::{CallStatus, RecordId};
use crate::state::BulkAction;

/// Read-only projection of the screen state for whatever shell renders it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenViewModel {
    pub rows: Vec<NumberRowView>,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
    pub total: Option<u64>,
    pub selected_count: u64,
    /// True while the selection is in complement ("all matching") mode.
    pub select_all_active: bool,
    /// True when every row on the current page is selected.
    pub all_visible_selected: bool,
    pub bulk_in_flight: bool,
    pub pending_confirm: Option<BulkAction>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_bulk_outcome: Option<BulkOutcome>,
    pub last_import: Option<ImportReport>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberRowView {
    pub id: RecordId,
    pub phone_number: String,
    pub status: CallStatus,
    pub total_attempts: u32,
    pub last_attempt_at: Option<String>,
    pub selected: bool,
}
