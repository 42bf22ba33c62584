use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call outcome as the service spells it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    Queued,
    Missed,
    Connected,
    Failed,
    NotInterested,
    Hangup,
    Disconnected,
}

/// One phone-number record as returned by the listing endpoint.
///
/// The service sends more fields than these; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumberRecord {
    pub id: u64,
    pub phone_number: String,
    pub status: CallStatus,
    pub total_attempts: u32,
    #[serde(default)]
    pub last_attempt_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_status_change_at: Option<DateTime<Utc>>,
}

/// Query string for `GET /api/numbers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

/// Query string for `GET /api/numbers/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct StatsResponse {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AddNumbersRequest {
    pub phone_numbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StatusUpdateRequest {
    pub status: CallStatus,
}

/// Counts returned by both ingestion endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportReport {
    pub inserted: u64,
    pub duplicates: u64,
    pub invalid: u64,
    #[serde(default)]
    pub invalid_samples: Vec<String>,
}

/// Bulk action verb on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkActionKind {
    UpdateStatus,
    Reset,
    Delete,
}

/// Body of `POST /api/numbers/bulk`.
///
/// Explicit selections carry `ids` with `select_all = false`; complement
/// selections carry `select_all = true` plus `excluded_ids` and the filter
/// snapshot fields, so the resolver evaluates the filter server-side and
/// the id list is never expanded on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkRequest {
    pub action: BulkActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    pub ids: Vec<u64>,
    pub select_all: bool,
    pub excluded_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Per-action counts reported by the bulk resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BulkOutcome {
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub reset: u64,
    #[serde(default)]
    pub deleted: u64,
}

/// Transport and protocol failures, surfaced to the screen as messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("server returned status {0}")]
    HttpStatus(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
