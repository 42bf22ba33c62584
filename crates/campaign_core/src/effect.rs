use crate::filter::Epoch;
use crate::record::{CallStatus, RecordId};
use crate::state::BulkAction;

/// IO the shell must perform on behalf of the core.
///
/// Fetch effects carry the epoch they were issued for; the matching
/// completion message is discarded when the epoch has moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage {
        epoch: Epoch,
        page: usize,
        query: PageQuery,
    },
    FetchCount {
        epoch: Epoch,
        query: CountQuery,
    },
    UpdateStatus {
        id: RecordId,
        status: CallStatus,
    },
    ResetRecord {
        id: RecordId,
    },
    DeleteRecord {
        id: RecordId,
    },
    DispatchBulk {
        request: BulkRequest,
    },
    SubmitNumbers {
        numbers: Vec<String>,
    },
    UploadFile {
        filename: String,
        bytes: Vec<u8>,
    },
}

/// One page worth of the record listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub status: Option<CallStatus>,
    pub search: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

/// Total count for the active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    pub status: Option<CallStatus>,
    pub search: Option<String>,
}

/// The selection half of a bulk request, in the compact form the resolver
/// evaluates against the authoritative record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
    Explicit { ids: Vec<RecordId> },
    Complement { excluded_ids: Vec<RecordId> },
}

/// A bulk action plus the selection and filter snapshot it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRequest {
    pub action: BulkAction,
    pub selection: SelectionRequest,
    pub filter_status: Option<CallStatus>,
    pub search: Option<String>,
}
