use campaign_core::{update, CallStatus, Effect, Msg, NumberRecord, RecordId, ScreenState};

fn page_of(ids: std::ops::Range<u64>) -> Vec<NumberRecord> {
    ids.map(|id| NumberRecord {
        id: RecordId(id),
        phone_number: format!("0912000{id:04}"),
        status: CallStatus::Queued,
        total_attempts: 0,
        last_attempt_at: None,
        last_status_change_at: None,
    })
    .collect()
}

#[test]
fn has_more_follows_authoritative_total() {
    // total=120, pageSize=50: pages 0 and 1 have more, page 2 does not.
    let state = ScreenState::new();
    let epoch = state.filter().epoch();
    let (state, _) = update(
        state,
        Msg::CountLoaded {
            epoch,
            result: Ok(120),
        },
    );
    assert!(state.has_more());

    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.page(), 1);
    assert!(state.has_more());

    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.page(), 2);
    assert!(!state.has_more());
}

#[test]
fn full_page_heuristic_applies_until_count_arrives() {
    let state = ScreenState::new();
    let epoch = state.filter().epoch();

    // No count yet: a full page suggests more pages exist.
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            epoch,
            page: 0,
            result: Ok(page_of(0..50)),
        },
    );
    assert!(state.has_more());

    // A short page means we are on the last one.
    let (state, _) = update(state, Msg::NextPage);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            epoch,
            page: 1,
            result: Ok(page_of(50..70)),
        },
    );
    assert!(!state.has_more());
}

#[test]
fn authoritative_total_overrides_the_heuristic() {
    // Exactly 50 records: the full-page heuristic would claim another page,
    // the count knows better.
    let state = ScreenState::new();
    let epoch = state.filter().epoch();
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            epoch,
            page: 0,
            result: Ok(page_of(0..50)),
        },
    );
    assert!(state.has_more());

    let (state, _) = update(
        state,
        Msg::CountLoaded {
            epoch,
            result: Ok(50),
        },
    );
    assert!(!state.has_more());
}

#[test]
fn next_page_fetches_with_matching_offset() {
    let state = ScreenState::new();
    let epoch = state.filter().epoch();
    let (state, _) = update(
        state,
        Msg::CountLoaded {
            epoch,
            result: Ok(120),
        },
    );

    let (state, effects) = update(state, Msg::NextPage);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::FetchPage { epoch, page, query } => {
            assert_eq!(*epoch, state.filter().epoch());
            assert_eq!(*page, 1);
            assert_eq!(query.skip, 50);
            assert_eq!(query.limit, 50);
        }
        other => panic!("expected FetchPage, got {other:?}"),
    }
}

#[test]
fn next_page_is_refused_on_the_last_page() {
    let state = ScreenState::new();
    let epoch = state.filter().epoch();
    let (state, _) = update(
        state,
        Msg::CountLoaded {
            epoch,
            result: Ok(10),
        },
    );

    let (state, effects) = update(state, Msg::NextPage);
    assert_eq!(state.page(), 0);
    assert!(effects.is_empty());
}

#[test]
fn prev_page_is_refused_on_the_first_page() {
    let state = ScreenState::new();
    let (state, effects) = update(state, Msg::PrevPage);
    assert_eq!(state.page(), 0);
    assert!(effects.is_empty());
}

#[test]
fn page_navigation_keeps_filter_identity() {
    let state = ScreenState::new();
    let epoch = state.filter().epoch();
    let (state, _) = update(
        state,
        Msg::CountLoaded {
            epoch,
            result: Ok(120),
        },
    );
    let (state, _) = update(state, Msg::SelectAllMatching);

    let (state, _) = update(state, Msg::NextPage);

    // Complement-mode semantics survive page moves: same epoch, same count.
    assert_eq!(state.filter().epoch(), epoch);
    assert_eq!(state.selected_count(), 120);
}
