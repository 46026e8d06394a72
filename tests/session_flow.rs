//! End-to-end session flows against a scripted search API.

use async_trait::async_trait;
use photoscout::api::SearchApi;
use photoscout::app::{ListMode, SortMode, ViewState};
use photoscout::{build_runtime_with_api, Config, Event, Photo, PhotoscoutError, Result, SessionRuntime};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedApi {
    calls: Mutex<Vec<(String, SortMode, u32)>>,
}

impl ScriptedApi {
    fn calls(&self) -> Vec<(String, SortMode, u32)> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SearchApi for ScriptedApi {
    async fn search(&self, query: &str, sort: SortMode, page: u32) -> Result<Vec<Photo>> {
        self.calls.lock().expect("lock").push((query.to_string(), sort, page));

        let delay = if query == "slow" { 500 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if query == "boom" {
            return Err(PhotoscoutError::Transport("Rate Limit Exceeded".to_string()));
        }
        Ok((0..30)
            .map(|i| {
                Photo::new(format!("{query}-{page}-{i}"), Some(format!("{query} {i}").as_str()), "Ana")
                    .with_url("small", format!("https://img/{query}/{page}/{i}/s"))
                    .with_url("regular", format!("https://img/{query}/{page}/{i}/r"))
            })
            .collect())
    }

    async fn fetch_details(&self, id: &str) -> Result<Photo> {
        Ok(Photo::new(id, None, "Ana").with_url("regular", "https://img/detail"))
    }
}

fn config_in(dir: &TempDir) -> Config {
    Config {
        history_file: dir.path().join("history.json"),
        ..Config::default()
    }
}

fn runtime(dir: &TempDir, api: &Arc<ScriptedApi>) -> SessionRuntime {
    let api: Arc<dyn SearchApi> = api.clone();
    build_runtime_with_api(&config_in(dir), api).expect("runtime")
}

async fn search(rt: &mut SessionRuntime, text: &str) {
    rt.dispatch(Event::QueryTextChanged(text.to_string())).expect("typed");
    rt.process_next().await.expect("debounce tick");
    rt.process_next().await.expect("page");
}

#[tokio::test(start_paused = true)]
async fn newer_query_wins_over_slow_response() {
    let dir = TempDir::new().expect("tempdir");
    let api = Arc::new(ScriptedApi::default());
    let mut rt = runtime(&dir, &api);
    rt.start().expect("start");

    rt.dispatch(Event::QueryTextChanged("slow".to_string())).expect("typed");
    rt.process_next().await.expect("tick for slow");

    rt.dispatch(Event::QueryTextChanged("fast".to_string())).expect("typed");
    rt.process_next().await.expect("tick for fast");
    assert_eq!(rt.state().view_state, ViewState::Loading);
    assert!(rt.state().results.is_empty());

    // The slow page arrives first and is dropped; the queued search goes out.
    rt.process_next().await.expect("stale page");
    assert!(rt.state().results.is_empty());

    rt.process_next().await.expect("fresh page");
    assert_eq!(rt.state().view_state, ViewState::Content);
    assert_eq!(rt.state().results.len(), 30);
    assert!(rt.state().results.iter().all(|p| p.id.starts_with("fast-1-")));

    let queries: Vec<String> = api.calls().into_iter().map(|(q, _, _)| q).collect();
    assert_eq!(queries, ["slow", "fast"]);
}

#[tokio::test(start_paused = true)]
async fn paging_and_sorting_drive_request_parameters() {
    let dir = TempDir::new().expect("tempdir");
    let api = Arc::new(ScriptedApi::default());
    let mut rt = runtime(&dir, &api);
    rt.start().expect("start");

    search(&mut rt, "cats").await;
    rt.dispatch(Event::ScrolledNearBottom).expect("scrolled");
    assert_eq!(rt.state().view_state, ViewState::LoadingMore);
    rt.process_next().await.expect("second page");
    assert_eq!(rt.state().results.len(), 60);
    assert_eq!(rt.state().page, 3);

    rt.dispatch(Event::SortModeChanged(SortMode::Date)).expect("sorted");
    rt.process_next().await.expect("re-sorted page");
    assert_eq!(rt.state().results.len(), 30);

    assert_eq!(
        api.calls(),
        vec![
            ("cats".to_string(), SortMode::Popularity, 1),
            ("cats".to_string(), SortMode::Popularity, 2),
            ("cats".to_string(), SortMode::Date, 1),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn scrolling_before_debounce_tick_keeps_queries_apart() {
    let dir = TempDir::new().expect("tempdir");
    let api = Arc::new(ScriptedApi::default());
    let mut rt = runtime(&dir, &api);
    rt.start().expect("start");

    search(&mut rt, "cats").await;
    rt.dispatch(Event::QueryTextChanged("dogs".to_string())).expect("typed");
    let outcome = rt.dispatch(Event::ScrolledNearBottom).expect("scrolled");
    assert!(!outcome.render);
    assert_eq!(rt.state().view_state, ViewState::Content);

    rt.process_next().await.expect("debounce tick");
    rt.process_next().await.expect("page");
    assert_eq!(rt.state().results.len(), 30);
    assert!(rt.state().results.iter().all(|p| p.id.starts_with("dogs-1-")));

    assert_eq!(
        api.calls(),
        vec![
            ("cats".to_string(), SortMode::Popularity, 1),
            ("dogs".to_string(), SortMode::Popularity, 1),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_search_shows_error_message() {
    let dir = TempDir::new().expect("tempdir");
    let api = Arc::new(ScriptedApi::default());
    let mut rt = runtime(&dir, &api);
    rt.start().expect("start");

    search(&mut rt, "boom").await;
    assert_eq!(rt.state().view_state, ViewState::Error("Rate Limit Exceeded".to_string()));
    assert!(rt.view_model().rows.is_empty());
}

#[tokio::test(start_paused = true)]
async fn opened_photos_survive_a_restart() {
    let dir = TempDir::new().expect("tempdir");
    let api = Arc::new(ScriptedApi::default());

    {
        let mut rt = runtime(&dir, &api);
        rt.start().expect("start");
        search(&mut rt, "owl").await;

        // Matching history rows are listed before results, so skip past them.
        for k in 0..6 {
            let row = rt.state().filtered_history.len() + k;
            let outcome = rt.dispatch(Event::ResultSelected(row)).expect("selected");
            assert_eq!(outcome.details[0].id, format!("owl-1-{k}"));
        }
        assert_eq!(rt.state().history.len(), 5);
        assert_eq!(rt.state().history[0].id, "owl-1-5");
    }

    let mut rt = runtime(&dir, &api);
    rt.start().expect("restart");
    assert_eq!(rt.state().list_mode, ListMode::History);
    assert_eq!(rt.state().history.len(), 5);
    assert_eq!(rt.view_model().rows.len(), 5);
}
