//! Terminal shell for the campaign numbers screen.
//!
//! Reads commands from stdin, feeds them through the core update loop and
//! re-renders whenever the state reports itself dirty.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use campaign_client::{ApiSettings, ReqwestCampaignApi};
use campaign_core::{
    update, BulkAction, CallStatus, Msg, RecordId, ScreenState, ScreenViewModel,
};
use campaign_logging::campaign_info;
use url::Url;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};

const API_URL_VAR: &str = "CAMPAIGN_API_URL";
const API_TOKEN_VAR: &str = "CAMPAIGN_API_TOKEN";
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let settings = settings_from_env()?;
    campaign_info!("connecting to {}", settings.base_url);
    let api = ReqwestCampaignApi::new(settings)?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(Arc::new(api), msg_tx.clone());

    let (line_tx, line_rx) = mpsc::channel::<String>();
    spawn_stdin_reader(line_tx);

    let mut state = ScreenState::new();
    dispatch(&mut state, Msg::RefreshRequested, &runner);

    println!("campaign console. Type 'help' for commands.");
    loop {
        match line_rx.try_recv() {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }
                if let Some(msg) = parse_command(trimmed) {
                    dispatch(&mut state, msg, &runner);
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        match msg_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(msg) => dispatch(&mut state, msg, &runner),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if state.consume_dirty() {
            render(&state.view());
        }
    }

    campaign_info!("shutting down");
    Ok(())
}

fn settings_from_env() -> anyhow::Result<ApiSettings> {
    let raw = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
    let base_url = Url::parse(&raw).with_context(|| format!("invalid {API_URL_VAR}: {raw}"))?;
    let mut settings = ApiSettings::new(base_url);
    settings.auth_token = env::var(API_TOKEN_VAR).ok();
    Ok(settings)
}

fn spawn_stdin_reader(line_tx: mpsc::Sender<String>) {
    thread::spawn(move || {
        use std::io::BufRead;
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

fn dispatch(state: &mut ScreenState, msg: Msg, runner: &EffectRunner) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
}

fn parse_command(line: &str) -> Option<Msg> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    match command {
        "help" => {
            print_help();
            None
        }
        "filter" => match rest.first() {
            None | Some(&"all") => Some(Msg::StatusFilterChanged(None)),
            Some(name) => match parse_status(name) {
                Some(status) => Some(Msg::StatusFilterChanged(Some(status))),
                None => {
                    eprintln!("unknown status '{name}', see 'help'");
                    None
                }
            },
        },
        "search" => Some(Msg::SearchChanged(rest.join(" "))),
        "refresh" => Some(Msg::RefreshRequested),
        "next" => Some(Msg::NextPage),
        "prev" => Some(Msg::PrevPage),
        "toggle" => parse_id(rest.first()).map(|id| Msg::RowToggled { id }),
        "page" => Some(Msg::PageToggled),
        "all" => Some(Msg::SelectAllMatching),
        "clear" => Some(Msg::SelectionCleared),
        "bulk" => parse_bulk(&rest),
        "confirm" => Some(Msg::BulkConfirmed),
        "dismiss" => Some(Msg::BulkDismissed),
        "ok" => Some(Msg::DismissError),
        "set" => match (parse_id(rest.first()), rest.get(1).and_then(|s| parse_status(s))) {
            (Some(id), Some(status)) => Some(Msg::UpdateStatusRequested { id, status }),
            _ => {
                eprintln!("usage: set <id> <status>");
                None
            }
        },
        "reset" => parse_id(rest.first()).map(|id| Msg::ResetRequested { id }),
        "delete" => parse_id(rest.first()).map(|id| Msg::DeleteRequested { id }),
        "add" => {
            let raw = rest.join(" ");
            if raw.is_empty() {
                eprintln!("usage: add <number>[,<number>...]");
                None
            } else {
                Some(Msg::NumbersSubmitted { raw })
            }
        }
        "upload" => match rest.first() {
            Some(path) => read_upload(path),
            None => {
                eprintln!("usage: upload <path>");
                None
            }
        },
        other => {
            eprintln!("unknown command '{other}', try 'help'");
            None
        }
    }
}

fn parse_bulk(rest: &[&str]) -> Option<Msg> {
    match rest.first() {
        Some(&"status") => match rest.get(1).and_then(|s| parse_status(s)) {
            Some(status) => Some(Msg::BulkRequested {
                action: BulkAction::UpdateStatus(status),
            }),
            None => {
                eprintln!("usage: bulk status <status>");
                None
            }
        },
        Some(&"reset") => Some(Msg::BulkRequested {
            action: BulkAction::Reset,
        }),
        Some(&"delete") => Some(Msg::BulkRequested {
            action: BulkAction::Delete,
        }),
        _ => {
            eprintln!("usage: bulk status <status> | bulk reset | bulk delete");
            None
        }
    }
}

fn parse_id(raw: Option<&&str>) -> Option<RecordId> {
    match raw.and_then(|s| s.parse::<u64>().ok()) {
        Some(id) => Some(RecordId(id)),
        None => {
            eprintln!("expected a numeric record id");
            None
        }
    }
}

fn parse_status(name: &str) -> Option<CallStatus> {
    CallStatus::parse(&name.to_ascii_uppercase())
}

fn read_upload(path: &str) -> Option<Msg> {
    let path = Path::new(path);
    match fs::read(path) {
        Ok(bytes) => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.csv".to_owned());
            Some(Msg::UploadPicked { filename, bytes })
        }
        Err(err) => {
            eprintln!("cannot read {}: {err}", path.display());
            None
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  filter <status>|all      filter by call status");
    println!("  search [term]            filter by number substring (empty clears)");
    println!("  refresh                  reload the current page and count");
    println!("  next | prev              page navigation");
    println!("  toggle <id>              toggle one row's selection");
    println!("  page                     toggle every visible row");
    println!("  all                      select every record matching the filter");
    println!("  clear                    clear the selection");
    println!("  bulk status <status>     set status on the selection");
    println!("  bulk reset | bulk delete reset or delete the selection");
    println!("  confirm | dismiss        answer a pending confirmation");
    println!("  set <id> <status>        set one record's status");
    println!("  reset <id>               reset one record");
    println!("  delete <id>              delete one record");
    println!("  add <numbers>            add comma-separated numbers");
    println!("  upload <path>            upload a CSV/XLSX file");
    println!("  ok                       dismiss the last error");
    println!("  quit");
    print!("  statuses:");
    for status in CallStatus::ALL {
        print!(" {status}");
    }
    println!();
}

fn render(view: &ScreenViewModel) {
    println!();
    match view.total {
        Some(total) => println!(
            "page {} (size {}) of {} records{}",
            view.page + 1,
            view.page_size,
            total,
            if view.loading { ", loading..." } else { "" }
        ),
        None => println!(
            "page {} (size {}){}",
            view.page + 1,
            view.page_size,
            if view.loading { ", loading..." } else { "" }
        ),
    }

    println!("{:>3} {:>6} {:<16} {:<14} {:>4} {:<16}", "", "id", "number", "status", "try", "last attempt");
    for row in &view.rows {
        println!(
            "{:>3} {:>6} {:<16} {:<14} {:>4} {:<16}",
            if row.selected { "[x]" } else { "[ ]" },
            row.id,
            row.phone_number,
            row.status,
            row.total_attempts,
            row.last_attempt_at.as_deref().unwrap_or("-"),
        );
    }
    if view.rows.is_empty() {
        println!("  (no records)");
    }
    if view.has_more {
        println!("  more pages available ('next')");
    }

    if view.selected_count > 0 || view.select_all_active {
        println!(
            "selected: {}{}",
            view.selected_count,
            if view.select_all_active {
                " (all matching)"
            } else {
                ""
            }
        );
    }
    if view.bulk_in_flight {
        println!("bulk action in flight...");
    }
    if let Some(action) = view.pending_confirm {
        let label = match action {
            BulkAction::UpdateStatus(status) => format!("set status to {status}"),
            BulkAction::Reset => "reset".to_owned(),
            BulkAction::Delete => "DELETE".to_owned(),
        };
        println!(
            "confirm {label} on {} records? ('confirm' / 'dismiss')",
            view.selected_count
        );
    }
    if let Some(outcome) = view.last_bulk_outcome {
        println!(
            "last bulk action: {} updated, {} reset, {} deleted",
            outcome.updated, outcome.reset, outcome.deleted
        );
    }
    if let Some(report) = &view.last_import {
        println!(
            "last import: {} inserted, {} duplicates, {} invalid",
            report.inserted, report.duplicates, report.invalid
        );
        if !report.invalid_samples.is_empty() {
            println!("  invalid samples: {}", report.invalid_samples.join(", "));
        }
    }
    if let Some(error) = &view.error {
        println!("error: {error} ('ok' to dismiss)");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn filter_command_accepts_wire_names_case_insensitively() {
        assert_eq!(
            parse_command("filter not_interested"),
            Some(Msg::StatusFilterChanged(Some(CallStatus::NotInterested)))
        );
        assert_eq!(parse_command("filter all"), Some(Msg::StatusFilterChanged(None)));
        assert_eq!(parse_command("filter bogus"), None);
    }

    #[test]
    fn search_command_joins_the_rest_of_the_line() {
        assert_eq!(
            parse_command("search 0912 000"),
            Some(Msg::SearchChanged("0912 000".to_string()))
        );
        assert_eq!(parse_command("search"), Some(Msg::SearchChanged(String::new())));
    }

    #[test]
    fn bulk_commands_build_the_right_actions() {
        assert_eq!(
            parse_command("bulk status failed"),
            Some(Msg::BulkRequested {
                action: BulkAction::UpdateStatus(CallStatus::Failed),
            })
        );
        assert_eq!(
            parse_command("bulk delete"),
            Some(Msg::BulkRequested {
                action: BulkAction::Delete,
            })
        );
        assert_eq!(parse_command("bulk"), None);
    }

    #[test]
    fn record_commands_require_numeric_ids() {
        assert_eq!(parse_command("toggle 12"), Some(Msg::RowToggled { id: RecordId(12) }));
        assert_eq!(parse_command("toggle twelve"), None);
        assert_eq!(
            parse_command("set 3 queued"),
            Some(Msg::UpdateStatusRequested {
                id: RecordId(3),
                status: CallStatus::Queued,
            })
        );
    }

    #[test]
    fn upload_command_reads_the_file_bytes() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"09120000001\n").expect("write");
        let path = file.path().to_string_lossy().into_owned();

        match parse_command(&format!("upload {path}")) {
            Some(Msg::UploadPicked { filename, bytes }) => {
                assert_eq!(bytes, b"09120000001\n");
                assert!(!filename.is_empty());
            }
            other => panic!("expected UploadPicked, got {other:?}"),
        }

        assert_eq!(parse_command("upload /no/such/file"), None);
    }
}
