//! Campaign core: pure state machine for the numbers screen.
//!
//! Everything here is synchronous and IO-free. The shell feeds [`Msg`]
//! values into [`update`], executes the returned [`Effect`]s against the
//! campaign service, and feeds the outcomes back in as further messages.
mod effect;
mod filter;
mod msg;
mod record;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::{BulkRequest, CountQuery, Effect, PageQuery, SelectionRequest};
pub use filter::{Epoch, FilterSnapshot};
pub use msg::{BulkOutcome, ImportReport, Msg, MutationKind};
pub use record::{CallStatus, NumberRecord, RecordId};
pub use selection::Selection;
pub use state::{BulkAction, ScreenError, ScreenState, DEFAULT_PAGE_SIZE};
pub use update::update;
pub use view_model::{NumberRowView, ScreenViewModel};
