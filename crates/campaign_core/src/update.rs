use crate::{BulkAction, Effect, Msg, MutationKind, ScreenError, ScreenState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ScreenState, msg: Msg) -> (ScreenState, Vec<Effect>) {
    let effects = match msg {
        Msg::StatusFilterChanged(status) => {
            if state.set_status_filter(status) {
                state.fetch_effects(true)
            } else {
                Vec::new()
            }
        }
        Msg::SearchChanged(raw) => {
            let trimmed = raw.trim();
            let search = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            };
            if state.set_search(search) {
                state.fetch_effects(true)
            } else {
                Vec::new()
            }
        }
        Msg::RefreshRequested => {
            state.refresh();
            state.fetch_effects(true)
        }
        Msg::NextPage => {
            if state.advance_page() {
                state.fetch_effects(false)
            } else {
                Vec::new()
            }
        }
        Msg::PrevPage => {
            if state.retreat_page() {
                state.fetch_effects(false)
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded {
            epoch,
            page,
            result,
        } => {
            // A fetch issued for an older snapshot or another page must not
            // overwrite newer state; dropping it substitutes for cancellation.
            if epoch != state.filter().epoch() || page != state.page() {
                return (state, Vec::new());
            }
            match result {
                Ok(records) => state.apply_page(records),
                Err(message) => {
                    state.finish_loading();
                    state.set_error(ScreenError::Remote { message });
                }
            }
            Vec::new()
        }
        Msg::CountLoaded { epoch, result } => {
            if epoch != state.filter().epoch() {
                return (state, Vec::new());
            }
            match result {
                Ok(total) => state.apply_count(total),
                Err(message) => state.set_error(ScreenError::Remote { message }),
            }
            Vec::new()
        }
        Msg::RowToggled { id } => {
            state.toggle_row(id);
            Vec::new()
        }
        Msg::PageToggled => {
            state.toggle_page();
            Vec::new()
        }
        Msg::SelectAllMatching => {
            state.select_all_matching();
            Vec::new()
        }
        Msg::SelectionCleared => {
            state.clear_selection();
            Vec::new()
        }
        Msg::BulkRequested { action } => {
            if state.bulk_in_flight() {
                state.set_error(ScreenError::ConflictingRequest);
                Vec::new()
            } else if state.selected_count() == 0 {
                state.set_error(ScreenError::EmptySelection);
                Vec::new()
            } else if action.is_destructive() {
                // Not an error: the dispatch is simply not issued until the
                // operator confirms.
                state.stage_confirmation(action);
                Vec::new()
            } else {
                dispatch_bulk(&mut state, action)
            }
        }
        Msg::BulkConfirmed => match state.take_pending_confirmation() {
            Some(action) => dispatch_bulk(&mut state, action),
            None => Vec::new(),
        },
        Msg::BulkDismissed => {
            state.take_pending_confirmation();
            Vec::new()
        }
        Msg::BulkCompleted { result } => match result {
            Ok(outcome) => {
                state.finish_bulk(Some(outcome));
                // Page contents and count may both have shifted.
                state.fetch_effects(true)
            }
            Err(message) => {
                // Selection stays intact so the operator can retry.
                state.finish_bulk(None);
                state.set_error(ScreenError::Remote { message });
                Vec::new()
            }
        },
        Msg::UpdateStatusRequested { id, status } => {
            vec![Effect::UpdateStatus { id, status }]
        }
        Msg::ResetRequested { id } => vec![Effect::ResetRecord { id }],
        Msg::DeleteRequested { id } => vec![Effect::DeleteRecord { id }],
        Msg::MutationCompleted { id, kind, result } => match result {
            Ok(()) => {
                if kind == MutationKind::Delete {
                    state.forget_record(id);
                    state.fetch_effects(true)
                } else {
                    state.fetch_effects(false)
                }
            }
            Err(message) => {
                state.set_error(ScreenError::Remote { message });
                Vec::new()
            }
        },
        Msg::NumbersSubmitted { raw } => {
            let numbers = parse_numbers(&raw);
            if numbers.is_empty() {
                Vec::new()
            } else {
                vec![Effect::SubmitNumbers { numbers }]
            }
        }
        Msg::UploadPicked { filename, bytes } => {
            if bytes.is_empty() {
                Vec::new()
            } else {
                vec![Effect::UploadFile { filename, bytes }]
            }
        }
        Msg::ImportCompleted { result } => match result {
            Ok(report) => {
                state.note_import(report);
                state.fetch_effects(true)
            }
            Err(message) => {
                state.set_error(ScreenError::Remote { message });
                Vec::new()
            }
        },
        Msg::DismissError => {
            state.clear_error();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn dispatch_bulk(state: &mut ScreenState, action: BulkAction) -> Vec<Effect> {
    if state.bulk_in_flight() {
        state.set_error(ScreenError::ConflictingRequest);
        return Vec::new();
    }
    if state.selected_count() == 0 {
        state.set_error(ScreenError::EmptySelection);
        return Vec::new();
    }
    vec![state.begin_bulk(action)]
}

/// One number per line; commas are accepted as separators too.
fn parse_numbers(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
