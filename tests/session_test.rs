use std::sync::Arc;
use std::time::Duration;

use photon::normalizer::parse_headers;
use photon::{
    spawn, Auth, Command, FileStateStore, HttpMethod, MemoryStateStore, OutcomeStatus, Reply,
    RequestDescriptor, SendRequestPayload, SessionHandle,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

fn memory_session() -> SessionHandle {
    spawn(Arc::new(MemoryStateStore::new()), test_client())
}

fn send(url: &str) -> Command {
    Command::SendRequest(SendRequestPayload {
        method: HttpMethod::GET,
        url: url.to_string(),
        ..Default::default()
    })
}

async fn history(session: &mut SessionHandle) -> Vec<photon::HistoryEntry> {
    match session.request(Command::LoadHistory).await {
        Some(Reply::HistoryData { history }) => history,
        other => panic!("unexpected reply: {:?}", other),
    }
}

async fn saved(session: &mut SessionHandle, command: Command) -> Vec<photon::SavedRequest> {
    match session.request(command).await {
        Some(Reply::SavedRequestsData { saved }) => saved,
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[tokio::test]
async fn test_send_replies_with_outcome_and_history() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pong": true})))
        .mount(&mock_server)
        .await;

    let mut session = memory_session();
    let url = format!("{}/ping", mock_server.uri());

    match session.request(send(&url)).await {
        Some(Reply::Response { outcome, history }) => {
            assert_eq!(outcome.status, OutcomeStatus::Http(200));
            assert_eq!(outcome.data, json!({"pong": true}));
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].request.url, url);
        }
        other => panic!("unexpected reply: {:?}", other),
    }

    assert_eq!(history(&mut session).await.len(), 1);
}

#[tokio::test]
async fn test_bad_headers_are_reported_and_recorded() {
    let mut session = memory_session();
    let command = Command::SendRequest(SendRequestPayload {
        method: HttpMethod::POST,
        url: "api.test/x".into(),
        headers: "{oops".into(),
        ..Default::default()
    });

    match session.request(command).await {
        Some(Reply::Response { outcome, history }) => {
            assert_eq!(outcome.status, OutcomeStatus::Error);
            assert_eq!(outcome.status_text, "Invalid Headers JSON format");
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].request.headers, "{oops");
            assert_eq!(history[0].request.url, "api.test/x");
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_still_recorded() {
    let mut session = memory_session();

    match session.request(send("photon-test-host.invalid")).await {
        Some(Reply::Response { outcome, history }) => {
            assert!(outcome.status.is_error());
            assert!(
                outcome.status_text == "Address Not Found"
                    || outcome.status_text == "Request Timeout",
                "unexpected status text: {}",
                outcome.status_text
            );
            assert_eq!(history.len(), 1);
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[tokio::test]
async fn test_clear_history() {
    let mut session = memory_session();
    session.request(send("")).await;
    assert_eq!(history(&mut session).await.len(), 1);

    match session.request(Command::ClearHistory).await {
        Some(Reply::HistoryData { history }) => assert!(history.is_empty()),
        other => panic!("unexpected reply: {:?}", other),
    }
    assert!(history(&mut session).await.is_empty());
}

#[tokio::test]
async fn test_overlapping_sends_all_land_in_history() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .mount(&mock_server)
        .await;

    let mut session = memory_session();
    for i in 0..5 {
        session
            .commands
            .send(send(&format!("{}/item/{}", mock_server.uri(), i)))
            .unwrap();
    }

    // history answers while the sends are still in flight
    session.commands.send(Command::LoadHistory).unwrap();

    let mut responses = 0;
    let mut saw_history = false;
    while responses < 5 {
        match session.replies.recv().await {
            Some(Reply::Response { outcome, .. }) => {
                assert_eq!(outcome.status, OutcomeStatus::Http(200));
                responses += 1;
            }
            Some(Reply::HistoryData { history }) => {
                assert_eq!(responses, 0);
                assert_eq!(history.len(), 5);
                saw_history = true;
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }
    assert!(saw_history);

    let entries = history(&mut session).await;
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].request.url, format!("{}/item/4", mock_server.uri()));
    let mut ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_in_flight_request_answered_after_commands_close() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(100)))
        .mount(&mock_server)
        .await;

    let SessionHandle {
        commands,
        mut replies,
    } = memory_session();
    commands.send(send(&mock_server.uri())).unwrap();
    drop(commands);

    match replies.recv().await {
        Some(Reply::Response { outcome, .. }) => {
            assert_eq!(outcome.status, OutcomeStatus::Http(204))
        }
        other => panic!("unexpected reply: {:?}", other),
    }
    assert!(replies.recv().await.is_none());
}

#[tokio::test]
async fn test_save_list_delete() {
    let mut session = memory_session();

    saved(
        &mut session,
        Command::SaveRequest {
            name: "first".into(),
            req: RequestDescriptor::new(HttpMethod::GET, "a.test"),
        },
    )
    .await;
    let list = saved(
        &mut session,
        Command::SaveRequest {
            name: "second".into(),
            req: RequestDescriptor::new(HttpMethod::POST, "b.test"),
        },
    )
    .await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].name, "second");

    let unchanged = saved(
        &mut session,
        Command::DeleteSavedRequest {
            id: "missing".into(),
        },
    )
    .await;
    assert_eq!(unchanged, list);

    let after = saved(
        &mut session,
        Command::DeleteSavedRequest {
            id: list[1].id.clone(),
        },
    )
    .await;
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "first");

    assert_eq!(saved(&mut session, Command::GetSavedRequests).await, after);
}

#[tokio::test]
async fn test_export_then_import_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("collection.json");
    let mut session = memory_session();

    let original = saved(
        &mut session,
        Command::SaveRequest {
            name: "with auth".into(),
            req: RequestDescriptor::new(HttpMethod::PATCH, "https://api.test/x")
                .with_headers(r#"{"X":"1"}"#)
                .with_body("hello")
                .with_auth(Auth::Bearer {
                    token: "secret".into(),
                }),
        },
    )
    .await
    .remove(0);

    match session
        .request(Command::ExportSaved { path: path.clone() })
        .await
    {
        Some(Reply::Exported { count, .. }) => assert_eq!(count, 1),
        other => panic!("unexpected reply: {:?}", other),
    }

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(document["info"]["schema"]
        .as_str()
        .unwrap()
        .contains("schema.getpostman.com"));

    let list = saved(&mut session, Command::ImportSaved { path }).await;
    assert_eq!(list.len(), 2);

    let copy = &list[1];
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.request.method, HttpMethod::PATCH);
    assert_eq!(copy.request.url, "https://api.test/x");
    assert_eq!(copy.request.body, "hello");
    assert_eq!(copy.request.auth, Auth::None);
    let headers = parse_headers(&copy.request.headers).unwrap();
    assert_eq!(headers.get("X").map(String::as_str), Some("1"));
    assert_eq!(headers.len(), 1);
}

#[tokio::test]
async fn test_malformed_import_is_rejected_atomically() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{\"item\": [").unwrap();

    let mut session = memory_session();
    saved(
        &mut session,
        Command::SaveRequest {
            name: "kept".into(),
            req: RequestDescriptor::default(),
        },
    )
    .await;

    match session.request(Command::ImportSaved { path }).await {
        Some(Reply::Error { message }) => assert!(message.starts_with("Import failed")),
        other => panic!("unexpected reply: {:?}", other),
    }
    assert_eq!(saved(&mut session, Command::GetSavedRequests).await.len(), 1);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut session = spawn(Arc::new(FileStateStore::new(temp_dir.path())), test_client());
        saved(
            &mut session,
            Command::SaveRequest {
                name: "persisted".into(),
                req: RequestDescriptor::new(HttpMethod::GET, "api.test"),
            },
        )
        .await;
        session.request(send("")).await;
    }

    let mut session = spawn(Arc::new(FileStateStore::new(temp_dir.path())), test_client());
    let list = saved(&mut session, Command::GetSavedRequests).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "persisted");
    assert_eq!(history(&mut session).await.len(), 1);
}
