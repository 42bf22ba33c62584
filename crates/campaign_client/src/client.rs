use std::sync::{mpsc, Arc};
use std::thread;

use campaign_logging::campaign_debug;

use crate::api::CampaignApi;
use crate::types::{
    ApiError, BulkOutcome, BulkRequest, CallStatus, CountQuery, ImportReport, NumberRecord,
    PageQuery,
};

/// Work handed to the background IO thread.
///
/// Fetch commands carry the epoch (and page) tags the core issued them
/// with; the matching event echoes them back untouched so the core can
/// discard stale results.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    FetchPage {
        epoch: u64,
        page: usize,
        query: PageQuery,
    },
    FetchCount {
        epoch: u64,
        query: CountQuery,
    },
    UpdateStatus {
        id: u64,
        status: CallStatus,
    },
    Reset {
        id: u64,
    },
    Delete {
        id: u64,
    },
    Bulk {
        request: BulkRequest,
    },
    SubmitNumbers {
        numbers: Vec<String>,
    },
    Upload {
        filename: String,
        bytes: Vec<u8>,
    },
}

/// Which single-record mutation an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    UpdateStatus,
    Reset,
    Delete,
}

/// Completed IO, pumped back to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Page {
        epoch: u64,
        page: usize,
        result: Result<Vec<NumberRecord>, ApiError>,
    },
    Count {
        epoch: u64,
        result: Result<u64, ApiError>,
    },
    Mutation {
        id: u64,
        kind: MutationKind,
        result: Result<(), ApiError>,
    },
    Bulk {
        result: Result<BulkOutcome, ApiError>,
    },
    Import {
        result: Result<ImportReport, ApiError>,
    },
}

/// Channel-based front of the IO thread.
///
/// Owns a tokio runtime on a dedicated thread so the synchronous shell can
/// fire commands and poll events without touching async itself. Commands
/// run concurrently; ordering is the core's problem (epoch tags and the
/// single bulk in-flight slot).
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    /// Spawns the IO thread. The returned receiver yields one event per
    /// command, in completion order.
    pub fn new(api: Arc<dyn CampaignApi>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    api: &dyn CampaignApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        ClientCommand::FetchPage { epoch, page, query } => {
            let result = api.fetch_page(&query).await;
            ClientEvent::Page {
                epoch,
                page,
                result,
            }
        }
        ClientCommand::FetchCount { epoch, query } => {
            let result = api.fetch_count(&query).await;
            ClientEvent::Count { epoch, result }
        }
        ClientCommand::UpdateStatus { id, status } => {
            let result = api.update_status(id, status).await.map(drop);
            ClientEvent::Mutation {
                id,
                kind: MutationKind::UpdateStatus,
                result,
            }
        }
        ClientCommand::Reset { id } => {
            let result = api.reset(id).await.map(drop);
            ClientEvent::Mutation {
                id,
                kind: MutationKind::Reset,
                result,
            }
        }
        ClientCommand::Delete { id } => {
            let result = api.delete(id).await;
            ClientEvent::Mutation {
                id,
                kind: MutationKind::Delete,
                result,
            }
        }
        ClientCommand::Bulk { request } => {
            campaign_debug!(
                "bulk dispatch action={:?} select_all={} ids={} excluded={}",
                request.action,
                request.select_all,
                request.ids.len(),
                request.excluded_ids.len()
            );
            let result = api.bulk(&request).await;
            ClientEvent::Bulk { result }
        }
        ClientCommand::SubmitNumbers { numbers } => {
            let result = api.submit_numbers(&numbers).await;
            ClientEvent::Import { result }
        }
        ClientCommand::Upload { filename, bytes } => {
            campaign_debug!("upload file={} bytes={}", filename, bytes.len());
            let result = api.upload(&filename, bytes).await;
            ClientEvent::Import { result }
        }
    };
    let _ = event_tx.send(event);
}
