//! End-to-end checks of the countdown HTTP contract over a real socket

use std::{sync::Arc, time::Duration};

use serde_json::{json, Value};
use shared_countdown::{
    api::{create_router, COUNTDOWN_PATH},
    client::{Controller, EndTimeCache, Screen, ServerNotifier, Status},
    services::{CountdownService, GistBackend, MemoryBackend, RemoteStateStore},
    state::{AppState, RemainingTime},
    tasks::CountdownRunner,
    utils::now_millis,
};
use tokio::net::TcpListener;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

struct NullScreen;

impl Screen for NullScreen {
    fn show_time(&mut self, _time: RemainingTime) {}
    fn show_status(&mut self, _status: Status) {}
}

/// Serve the router on an ephemeral port and return the countdown URL
async fn spawn_server(store: RemoteStateStore) -> String {
    let state = Arc::new(AppState::new(CountdownService::new(store), 0, "127.0.0.1".to_string()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{}{}", addr, COUNTDOWN_PATH)
}

#[tokio::test]
async fn start_then_query_shares_the_deadline() {
    let url = spawn_server(RemoteStateStore::configured(MemoryBackend::new())).await;
    let http = reqwest::Client::new();

    let end_time = now_millis() + 60_000;
    let started: Value = http
        .post(&url)
        .json(&json!({ "action": "start", "endTime": end_time }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(started, json!({ "success": true, "endTime": end_time }));

    // A second client sees the same deadline
    let notifier = ServerNotifier::new(url.clone());
    let first = notifier.fetch_status().await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = notifier.fetch_status().await.unwrap();

    assert!(first.is_active && second.is_active);
    assert_eq!(first.end_time, Some(end_time));
    assert!(second.time_remaining < first.time_remaining);
}

#[tokio::test]
async fn clearing_reports_inactive() {
    let url = spawn_server(RemoteStateStore::configured(MemoryBackend::new())).await;
    let notifier = ServerNotifier::new(url.clone());

    notifier.notify_start(now_millis() + 60_000).await.unwrap();
    let cleared: Value = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "action": "start", "endTime": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cleared, json!({ "success": true, "endTime": null }));

    let status = notifier.fetch_status().await.unwrap();
    assert!(!status.is_active);
    assert_eq!(status.end_time, None);
    assert_eq!(status.time_remaining, 0);
}

#[tokio::test]
async fn unconfigured_store_accepts_writes_and_stays_inactive() {
    let url = spawn_server(RemoteStateStore::Unconfigured).await;
    let notifier = ServerNotifier::new(url);

    let outcome = notifier.notify_start(now_millis() + 60_000).await.unwrap();
    assert!(outcome.success);
    assert!(!notifier.fetch_status().await.unwrap().is_active);
}

#[tokio::test]
async fn unreachable_gist_degrades_to_inactive() {
    let gist = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gists/g1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&gist)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/gists/g1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&gist)
        .await;

    let backend = GistBackend::new(&gist.uri(), "g1", "token", "state.json");
    let url = spawn_server(RemoteStateStore::configured(backend)).await;
    let http = reqwest::Client::new();

    let query = http.get(&url).send().await.unwrap();
    assert_eq!(query.status(), 200);
    let body: Value = query.json().await.unwrap();
    assert_eq!(body, json!({ "endTime": null, "isActive": false, "timeRemaining": 0 }));

    let end_time = now_millis() + 60_000;
    let start = http
        .post(&url)
        .json(&json!({ "action": "start", "endTime": end_time }))
        .send()
        .await
        .unwrap();
    assert_eq!(start.status(), 200);
    let body: Value = start.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "endTime": end_time }));
}

#[tokio::test]
async fn gist_record_with_stale_active_flag_is_inactive() {
    let gist = MockServer::start().await;
    let stale = json!({ "endTime": now_millis() - 1_000, "isActive": true }).to_string();
    Mock::given(method("GET"))
        .and(path("/gists/g1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "files": { "state.json": { "content": stale } } })),
        )
        .mount(&gist)
        .await;

    let backend = GistBackend::new(&gist.uri(), "g1", "token", "state.json");
    let url = spawn_server(RemoteStateStore::configured(backend)).await;

    let status = ServerNotifier::new(url).fetch_status().await.unwrap();
    assert!(!status.is_active);
    assert_eq!(status.end_time, None);
}

#[tokio::test]
async fn client_start_reaches_server_and_second_client_adopts_it() {
    let url = spawn_server(RemoteStateStore::configured(MemoryBackend::new())).await;
    let dir = tempfile::tempdir().unwrap();

    let mut first = CountdownRunner::new(
        Controller::new(3_600_000),
        EndTimeCache::new(dir.path().join("first")),
        NullScreen,
        Some(ServerNotifier::new(url.clone())),
    );
    first.start(now_millis());
    first.drain_notifications(Duration::from_secs(5)).await;
    let end_time = first.controller().end_time();

    // A fresh client with an empty cache picks the deadline up from the server
    let mut second = CountdownRunner::new(
        Controller::new(3_600_000),
        EndTimeCache::new(dir.path().join("second")),
        NullScreen,
        Some(ServerNotifier::new(url)),
    );
    second.resume(now_millis());
    assert!(!second.is_ticking());
    second.sync_with_server().await;

    assert!(second.is_ticking());
    assert_eq!(second.controller().end_time(), end_time);
    assert_eq!(
        EndTimeCache::new(dir.path().join("second")).read(),
        end_time.map(|t| t.to_string())
    );
}
