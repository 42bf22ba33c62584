use campaign_core::{update, Effect, ImportReport, Msg, ScreenState};

#[test]
fn pasted_numbers_are_split_and_trimmed() {
    let state = ScreenState::new();
    let raw = "09120000001\n 09120000002 ,09120000003\n\n".to_string();

    let (_state, effects) = update(state, Msg::NumbersSubmitted { raw });

    assert_eq!(
        effects,
        vec![Effect::SubmitNumbers {
            numbers: vec![
                "09120000001".to_string(),
                "09120000002".to_string(),
                "09120000003".to_string(),
            ],
        }]
    );
}

#[test]
fn empty_paste_is_a_local_noop() {
    let state = ScreenState::new();
    let (_state, effects) = update(
        state,
        Msg::NumbersSubmitted {
            raw: " \n , \n".to_string(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn picked_file_is_forwarded_verbatim() {
    let state = ScreenState::new();
    let bytes = b"09120000001\n09120000002\n".to_vec();

    let (_state, effects) = update(
        state,
        Msg::UploadPicked {
            filename: "numbers.csv".to_string(),
            bytes: bytes.clone(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::UploadFile {
            filename: "numbers.csv".to_string(),
            bytes,
        }]
    );
}

#[test]
fn import_report_is_displayed_verbatim_and_triggers_refetch() {
    // First upload: all new. Second upload of the same file: all duplicates.
    // The counts come from the service; the core only displays them.
    let state = ScreenState::new();

    let first = ImportReport {
        inserted: 5,
        duplicates: 0,
        invalid: 0,
        invalid_samples: Vec::new(),
    };
    let (state, effects) = update(
        state,
        Msg::ImportCompleted {
            result: Ok(first.clone()),
        },
    );
    assert_eq!(state.view().last_import, Some(first));
    assert_eq!(effects.len(), 2);

    let second = ImportReport {
        inserted: 0,
        duplicates: 5,
        invalid: 0,
        invalid_samples: Vec::new(),
    };
    let (state, effects) = update(
        state,
        Msg::ImportCompleted {
            result: Ok(second.clone()),
        },
    );
    assert_eq!(state.view().last_import, Some(second));
    assert_eq!(effects.len(), 2);
}

#[test]
fn failed_import_is_surfaced() {
    let state = ScreenState::new();
    let (state, effects) = update(
        state,
        Msg::ImportCompleted {
            result: Err("file rejected".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().error.as_deref(),
        Some("request failed: file rejected")
    );
}
