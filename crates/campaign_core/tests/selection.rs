use campaign_core::{RecordId, Selection, SelectionRequest};

#[test]
fn toggle_is_involutive_in_explicit_mode() {
    let mut selection = Selection::default();
    let before = selection.clone();

    selection.toggle(RecordId(9));
    assert!(selection.is_selected(RecordId(9)));
    selection.toggle(RecordId(9));
    assert_eq!(selection, before);
}

#[test]
fn toggle_is_involutive_in_complement_mode() {
    let mut selection = Selection::default();
    selection.select_all_matching();
    let before = selection.clone();

    selection.toggle(RecordId(4));
    assert!(!selection.is_selected(RecordId(4)));
    selection.toggle(RecordId(4));
    assert_eq!(selection, before);
}

#[test]
fn explicit_count_is_included_size() {
    let mut selection = Selection::default();
    assert_eq!(selection.count(1000), 0);

    selection.toggle(RecordId(1));
    selection.toggle(RecordId(2));
    selection.toggle(RecordId(3));
    assert_eq!(selection.count(1000), 3);
}

#[test]
fn complement_count_is_total_minus_excluded() {
    let mut selection = Selection::default();
    selection.select_all_matching();
    let total = 120;
    assert_eq!(selection.count(total), 120);

    for id in [5, 17, 33] {
        selection.toggle(RecordId(id));
    }
    assert_eq!(selection.count(total), 117);
}

#[test]
fn complement_count_saturates_at_zero() {
    let mut selection = Selection::default();
    selection.select_all_matching();
    selection.toggle(RecordId(1));
    selection.toggle(RecordId(2));

    // Excluding more ids than the filter matches cannot go negative.
    assert_eq!(selection.count(1), 0);
}

#[test]
fn select_all_with_zero_total_yields_zero_count() {
    let mut selection = Selection::default();
    selection.select_all_matching();
    assert_eq!(selection.count(0), 0);
}

#[test]
fn clear_resets_either_mode_to_explicit_empty() {
    let mut explicit = Selection::default();
    explicit.toggle(RecordId(7));
    explicit.clear();
    assert_eq!(explicit, Selection::default());

    let mut complement = Selection::default();
    complement.select_all_matching();
    complement.toggle(RecordId(7));
    complement.clear();
    assert_eq!(complement, Selection::default());
}

#[test]
fn forget_drops_id_from_active_set() {
    let mut explicit = Selection::default();
    explicit.toggle(RecordId(7));
    explicit.forget(RecordId(7));
    assert_eq!(explicit.count(10), 0);

    let mut complement = Selection::default();
    complement.select_all_matching();
    complement.toggle(RecordId(7));
    complement.forget(RecordId(7));
    assert!(complement.is_selected(RecordId(7)));
    assert_eq!(complement.count(10), 10);
}

#[test]
fn complement_request_never_expands_ids() {
    let mut selection = Selection::default();
    selection.select_all_matching();
    selection.toggle(RecordId(3));
    selection.toggle(RecordId(7));

    // total=10, two exclusions: the request stays a 2-element complement,
    // never an 8-element id list.
    assert_eq!(selection.count(10), 8);
    assert_eq!(
        selection.to_request(),
        SelectionRequest::Complement {
            excluded_ids: vec![RecordId(3), RecordId(7)],
        }
    );
}

#[test]
fn explicit_request_lists_ids_in_order() {
    let mut selection = Selection::default();
    selection.toggle(RecordId(12));
    selection.toggle(RecordId(3));

    assert_eq!(
        selection.to_request(),
        SelectionRequest::Explicit {
            ids: vec![RecordId(3), RecordId(12)],
        }
    );
}
