use std::sync::{mpsc, Arc};
use std::thread;

use campaign_client as client;
use campaign_client::{CampaignApi, ClientCommand, ClientEvent, ClientHandle};
use campaign_core::{
    BulkAction, BulkOutcome, Effect, ImportReport, Msg, MutationKind, NumberRecord, RecordId,
    SelectionRequest,
};
use campaign_logging::{campaign_info, campaign_warn};
use chrono::{DateTime, Utc};

/// Executes core effects against the campaign service and pumps the
/// resulting client events back into the message channel as core messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn CampaignApi>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (client, events) = ClientHandle::new(api);
        spawn_event_pump(events, msg_tx);
        Self { client }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { epoch, page, query } => {
                    self.client.send(ClientCommand::FetchPage {
                        epoch,
                        page,
                        query: client::PageQuery {
                            status: query.status.map(map_status_out),
                            search: query.search,
                            skip: query.skip,
                            limit: query.limit,
                        },
                    });
                }
                Effect::FetchCount { epoch, query } => {
                    self.client.send(ClientCommand::FetchCount {
                        epoch,
                        query: client::CountQuery {
                            status: query.status.map(map_status_out),
                            search: query.search,
                        },
                    });
                }
                Effect::UpdateStatus { id, status } => {
                    self.client.send(ClientCommand::UpdateStatus {
                        id: id.0,
                        status: map_status_out(status),
                    });
                }
                Effect::ResetRecord { id } => {
                    self.client.send(ClientCommand::Reset { id: id.0 });
                }
                Effect::DeleteRecord { id } => {
                    self.client.send(ClientCommand::Delete { id: id.0 });
                }
                Effect::DispatchBulk { request } => {
                    campaign_info!(
                        "dispatching bulk action {:?} (count unknown to shell)",
                        request.action
                    );
                    self.client.send(ClientCommand::Bulk {
                        request: map_bulk_request(request),
                    });
                }
                Effect::SubmitNumbers { numbers } => {
                    campaign_info!("submitting {} pasted numbers", numbers.len());
                    self.client.send(ClientCommand::SubmitNumbers { numbers });
                }
                Effect::UploadFile { filename, bytes } => {
                    campaign_info!("uploading {} ({} bytes)", filename, bytes.len());
                    self.client.send(ClientCommand::Upload { filename, bytes });
                }
            }
        }
    }
}

fn spawn_event_pump(events: mpsc::Receiver<ClientEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Page {
            epoch,
            page,
            result,
        } => Msg::PageLoaded {
            epoch,
            page,
            result: result
                .map(|records| records.into_iter().map(map_record_in).collect())
                .map_err(|err| err.to_string()),
        },
        ClientEvent::Count { epoch, result } => Msg::CountLoaded {
            epoch,
            result: result.map_err(|err| err.to_string()),
        },
        ClientEvent::Mutation { id, kind, result } => {
            if let Err(err) = &result {
                campaign_warn!("mutation on record {} failed: {}", id, err);
            }
            Msg::MutationCompleted {
                id: RecordId(id),
                kind: match kind {
                    client::MutationKind::UpdateStatus => MutationKind::UpdateStatus,
                    client::MutationKind::Reset => MutationKind::Reset,
                    client::MutationKind::Delete => MutationKind::Delete,
                },
                result: result.map_err(|err| err.to_string()),
            }
        }
        ClientEvent::Bulk { result } => {
            if let Err(err) = &result {
                campaign_warn!("bulk action failed: {}", err);
            }
            Msg::BulkCompleted {
                result: result
                    .map(|outcome| BulkOutcome {
                        updated: outcome.updated,
                        reset: outcome.reset,
                        deleted: outcome.deleted,
                    })
                    .map_err(|err| err.to_string()),
            }
        }
        ClientEvent::Import { result } => Msg::ImportCompleted {
            result: result
                .map(|report| ImportReport {
                    inserted: report.inserted,
                    duplicates: report.duplicates,
                    invalid: report.invalid,
                    invalid_samples: report.invalid_samples,
                })
                .map_err(|err| err.to_string()),
        },
    }
}

fn map_bulk_request(request: campaign_core::BulkRequest) -> client::BulkRequest {
    let (action, status) = match request.action {
        BulkAction::UpdateStatus(status) => (
            client::BulkActionKind::UpdateStatus,
            Some(map_status_out(status)),
        ),
        BulkAction::Reset => (client::BulkActionKind::Reset, None),
        BulkAction::Delete => (client::BulkActionKind::Delete, None),
    };
    let (ids, select_all, excluded_ids) = match request.selection {
        SelectionRequest::Explicit { ids } => {
            (ids.into_iter().map(|id| id.0).collect(), false, Vec::new())
        }
        SelectionRequest::Complement { excluded_ids } => (
            Vec::new(),
            true,
            excluded_ids.into_iter().map(|id| id.0).collect(),
        ),
    };
    client::BulkRequest {
        action,
        status,
        ids,
        select_all,
        excluded_ids,
        filter_status: request.filter_status.map(map_status_out),
        search: request.search,
    }
}

fn map_record_in(record: client::NumberRecord) -> NumberRecord {
    NumberRecord {
        id: RecordId(record.id),
        phone_number: record.phone_number,
        status: map_status_in(record.status),
        total_attempts: record.total_attempts,
        last_attempt_at: record.last_attempt_at.map(format_timestamp),
        last_status_change_at: record.last_status_change_at.map(format_timestamp),
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn map_status_out(status: campaign_core::CallStatus) -> client::CallStatus {
    match status {
        campaign_core::CallStatus::Queued => client::CallStatus::Queued,
        campaign_core::CallStatus::Missed => client::CallStatus::Missed,
        campaign_core::CallStatus::Connected => client::CallStatus::Connected,
        campaign_core::CallStatus::Failed => client::CallStatus::Failed,
        campaign_core::CallStatus::NotInterested => client::CallStatus::NotInterested,
        campaign_core::CallStatus::Hangup => client::CallStatus::Hangup,
        campaign_core::CallStatus::Disconnected => client::CallStatus::Disconnected,
    }
}

fn map_status_in(status: client::CallStatus) -> campaign_core::CallStatus {
    match status {
        client::CallStatus::Queued => campaign_core::CallStatus::Queued,
        client::CallStatus::Missed => campaign_core::CallStatus::Missed,
        client::CallStatus::Connected => campaign_core::CallStatus::Connected,
        client::CallStatus::Failed => campaign_core::CallStatus::Failed,
        client::CallStatus::NotInterested => campaign_core::CallStatus::NotInterested,
        client::CallStatus::Hangup => campaign_core::CallStatus::Hangup,
        client::CallStatus::Disconnected => campaign_core::CallStatus::Disconnected,
    }
}
