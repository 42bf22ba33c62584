use std::fmt;

/// Stable identity of a phone-number record, assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Call outcome of a number in the campaign queue.
///
/// `Queued` is the re-entry state; every other state is terminal until an
/// operator reassigns it. Transitions are deliberately unvalidated so that
/// corrections are always possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStatus {
    Queued,
    Missed,
    Connected,
    Failed,
    NotInterested,
    Hangup,
    Disconnected,
}

impl CallStatus {
    /// All statuses, in display order.
    pub const ALL: [CallStatus; 7] = [
        CallStatus::Queued,
        CallStatus::Missed,
        CallStatus::Connected,
        CallStatus::Failed,
        CallStatus::NotInterested,
        CallStatus::Hangup,
        CallStatus::Disconnected,
    ];

    /// The wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Queued => "QUEUED",
            CallStatus::Missed => "MISSED",
            CallStatus::Connected => "CONNECTED",
            CallStatus::Failed => "FAILED",
            CallStatus::NotInterested => "NOT_INTERESTED",
            CallStatus::Hangup => "HANGUP",
            CallStatus::Disconnected => "DISCONNECTED",
        }
    }

    /// Parses a wire name back into a status.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single paged-in record.
///
/// This is a read-only snapshot owned by the service; it may be stale the
/// moment it arrives. Timestamps are pre-formatted by the shell, the core
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberRecord {
    pub id: RecordId,
    pub phone_number: String,
    pub status: CallStatus,
    pub total_attempts: u32,
    pub last_attempt_at: Option<String>,
    pub last_status_change_at: Option<String>,
}
