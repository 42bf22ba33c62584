//! Campaign client: typed wire contracts and IO against the campaign service.
mod api;
mod client;
mod types;

pub use api::{ApiSettings, CampaignApi, ReqwestCampaignApi};
pub use client::{ClientCommand, ClientEvent, ClientHandle, MutationKind};
pub use types::{
    ApiError, BulkActionKind, BulkOutcome, BulkRequest, CallStatus, CountQuery, ImportReport,
    NumberRecord, PageQuery,
};
