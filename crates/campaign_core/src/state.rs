use std::fmt;

use crate::effect::{BulkRequest, CountQuery, Effect, PageQuery};
use crate::filter::FilterSnapshot;
use crate::msg::{BulkOutcome, ImportReport};
use crate::record::{CallStatus, NumberRecord, RecordId};
use crate::selection::Selection;
use crate::view_model::{NumberRowView, ScreenViewModel};

/// Fixed page size of the record listing.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// An action applied to the whole selection by the bulk resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    UpdateStatus(CallStatus),
    Reset,
    Delete,
}

impl BulkAction {
    /// Destructive actions require an explicit confirmation step.
    pub fn is_destructive(self) -> bool {
        matches!(self, BulkAction::Delete)
    }
}

/// Errors surfaced on the screen. The first two are rejected locally and
/// never produce a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// The effective selection is empty.
    EmptySelection,
    /// A bulk dispatch was attempted while another is still in flight.
    ConflictingRequest,
    /// A network or server failure; the operation was not applied.
    Remote { message: String },
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::EmptySelection => f.write_str("no rows are selected"),
            ScreenError::ConflictingRequest => {
                f.write_str("a bulk action is already in flight")
            }
            ScreenError::Remote { message } => write!(f, "request failed: {message}"),
        }
    }
}

/// Everything the numbers screen owns for its lifetime.
///
/// All mutation goes through [`crate::update`]; the shell only ever reads
/// the state through [`ScreenState::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenState {
    filter: FilterSnapshot,
    page: usize,
    page_size: usize,
    records: Vec<NumberRecord>,
    /// Length of the most recently applied page, for the has-more fallback.
    last_page_len: Option<usize>,
    total: Option<u64>,
    selection: Selection,
    bulk_in_flight: bool,
    pending_confirm: Option<BulkAction>,
    last_error: Option<ScreenError>,
    last_bulk_outcome: Option<BulkOutcome>,
    last_import: Option<ImportReport>,
    loading: bool,
    dirty: bool,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenState {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Mostly for tests; production screens use [`DEFAULT_PAGE_SIZE`].
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            filter: FilterSnapshot::default(),
            page: 0,
            page_size,
            records: Vec::new(),
            last_page_len: None,
            total: None,
            selection: Selection::default(),
            bulk_in_flight: false,
            pending_confirm: None,
            last_error: None,
            last_bulk_outcome: None,
            last_import: None,
            loading: false,
            dirty: false,
        }
    }

    pub fn filter(&self) -> &FilterSnapshot {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn records(&self) -> &[NumberRecord] {
        &self.records
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn bulk_in_flight(&self) -> bool {
        self.bulk_in_flight
    }

    pub fn pending_confirm(&self) -> Option<BulkAction> {
        self.pending_confirm
    }

    pub fn last_error(&self) -> Option<&ScreenError> {
        self.last_error.as_ref()
    }

    /// Whether a next page exists.
    ///
    /// Derived from the authoritative total when the count has arrived.
    /// Until then we fall back to the "last page was full" heuristic, which
    /// can be wrong by exactly one page when the true count is an exact
    /// multiple of the page size.
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) => ((self.page as u64) + 1) * (self.page_size as u64) < total,
            None => self.last_page_len == Some(self.page_size),
        }
    }

    /// Effective selected count against the current total. A complement
    /// selection whose total has not arrived yet counts as zero.
    pub fn selected_count(&self) -> u64 {
        self.selection.count(self.total.unwrap_or(0))
    }

    pub fn view(&self) -> ScreenViewModel {
        let rows: Vec<NumberRowView> = self
            .records
            .iter()
            .map(|record| NumberRowView {
                id: record.id,
                phone_number: record.phone_number.clone(),
                status: record.status,
                total_attempts: record.total_attempts,
                last_attempt_at: record.last_attempt_at.clone(),
                selected: self.selection.is_selected(record.id),
            })
            .collect();
        let all_visible_selected = !rows.is_empty() && rows.iter().all(|row| row.selected);

        ScreenViewModel {
            rows,
            page: self.page,
            page_size: self.page_size,
            has_more: self.has_more(),
            total: self.total,
            selected_count: self.selected_count(),
            select_all_active: self.selection.is_complement(),
            all_visible_selected,
            bulk_in_flight: self.bulk_in_flight,
            pending_confirm: self.pending_confirm,
            loading: self.loading,
            error: self.last_error.as_ref().map(ScreenError::to_string),
            last_bulk_outcome: self.last_bulk_outcome,
            last_import: self.last_import.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag; the shell re-renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        let was = self.dirty;
        self.dirty = false;
        was
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Applies a new status filter. Returns false when nothing changed.
    pub(crate) fn set_status_filter(&mut self, status: Option<CallStatus>) -> bool {
        if self.filter.status() == status {
            return false;
        }
        self.filter = self.filter.with_status(status);
        self.reset_for_new_filter();
        true
    }

    /// Applies a new search term. Returns false when nothing changed.
    pub(crate) fn set_search(&mut self, search: Option<String>) -> bool {
        if self.filter.search() == search.as_deref() {
            return false;
        }
        self.filter = self.filter.with_search(search);
        self.reset_for_new_filter();
        true
    }

    /// An explicit refresh: same filter fields, new point in time. Keeps
    /// the page and the stale total for display, resets the selection.
    pub(crate) fn refresh(&mut self) {
        self.filter = self.filter.bumped();
        self.selection.clear();
        self.pending_confirm = None;
        self.mark_dirty();
    }

    fn reset_for_new_filter(&mut self) {
        self.page = 0;
        self.total = None;
        self.last_page_len = None;
        self.selection.clear();
        self.pending_confirm = None;
        self.mark_dirty();
    }

    pub(crate) fn advance_page(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.page += 1;
        self.mark_dirty();
        true
    }

    pub(crate) fn retreat_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        self.mark_dirty();
        true
    }

    /// Effects to (re)load the current page, optionally with the count.
    pub(crate) fn fetch_effects(&mut self, include_count: bool) -> Vec<Effect> {
        self.loading = true;
        let mut effects = vec![Effect::FetchPage {
            epoch: self.filter.epoch(),
            page: self.page,
            query: PageQuery {
                status: self.filter.status(),
                search: self.filter.search().map(str::to_owned),
                skip: self.page * self.page_size,
                limit: self.page_size,
            },
        }];
        if include_count {
            effects.push(Effect::FetchCount {
                epoch: self.filter.epoch(),
                query: CountQuery {
                    status: self.filter.status(),
                    search: self.filter.search().map(str::to_owned),
                },
            });
        }
        effects
    }

    pub(crate) fn apply_page(&mut self, records: Vec<NumberRecord>) {
        self.last_page_len = Some(records.len());
        self.records = records;
        self.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn apply_count(&mut self, total: u64) {
        self.total = Some(total);
        self.mark_dirty();
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub(crate) fn set_error(&mut self, error: ScreenError) {
        self.last_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_row(&mut self, id: RecordId) {
        self.selection.toggle(id);
        self.mark_dirty();
    }

    /// Header checkbox: deselect every visible row if all are selected,
    /// otherwise select every visible row.
    pub(crate) fn toggle_page(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let all_selected = self
            .records
            .iter()
            .all(|record| self.selection.is_selected(record.id));
        for record in &self.records {
            if self.selection.is_selected(record.id) == all_selected {
                self.selection.toggle(record.id);
            }
        }
        self.mark_dirty();
    }

    /// Enters complement mode. Requires the total for the current filter
    /// to be known; a zero total is allowed and yields a zero count.
    pub(crate) fn select_all_matching(&mut self) -> bool {
        if self.total.is_none() {
            return false;
        }
        self.selection.select_all_matching();
        self.mark_dirty();
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.mark_dirty();
    }

    pub(crate) fn forget_record(&mut self, id: RecordId) {
        self.selection.forget(id);
        self.mark_dirty();
    }

    pub(crate) fn stage_confirmation(&mut self, action: BulkAction) {
        self.pending_confirm = Some(action);
        self.mark_dirty();
    }

    pub(crate) fn take_pending_confirmation(&mut self) -> Option<BulkAction> {
        let action = self.pending_confirm.take();
        if action.is_some() {
            self.mark_dirty();
        }
        action
    }

    /// Marks the single in-flight slot and builds the resolver request.
    pub(crate) fn begin_bulk(&mut self, action: BulkAction) -> Effect {
        self.bulk_in_flight = true;
        self.last_bulk_outcome = None;
        self.mark_dirty();
        Effect::DispatchBulk {
            request: BulkRequest {
                action,
                selection: self.selection.to_request(),
                filter_status: self.filter.status(),
                search: self.filter.search().map(str::to_owned),
            },
        }
    }

    pub(crate) fn finish_bulk(&mut self, outcome: Option<BulkOutcome>) {
        self.bulk_in_flight = false;
        if let Some(outcome) = outcome {
            self.last_bulk_outcome = Some(outcome);
            self.selection.clear();
        }
        self.mark_dirty();
    }

    pub(crate) fn note_import(&mut self, report: ImportReport) {
        self.last_import = Some(report);
        self.mark_dirty();
    }
}
