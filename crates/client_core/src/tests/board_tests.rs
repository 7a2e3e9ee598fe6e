use super::*;
use crate::gateway::{GatewayClient, GatewayClientError};
use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct ScriptedGateway {
    reply: Result<Value, u16>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    fn replying(reply: Value) -> Self {
        Self {
            reply: Ok(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PromptGateway for ScriptedGateway {
    async fn generate(&self, prompt: &str) -> Result<Value, GatewayClientError> {
        self.prompts.lock().await.push(prompt.to_string());
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err(status) => Err(GatewayClientError::Gateway {
                status: *status,
                message: "Failed to generate content".into(),
            }),
        }
    }
}

async fn spawn_gateway(status: StatusCode, reply: Value) -> String {
    let app = Router::new().route(
        "/api/gettasks",
        post(move |Json(body): Json<Value>| {
            let reply = reply.clone();
            async move {
                assert!(body["prompt"].as_str().is_some());
                (status, Json(reply))
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn categorize_sends_built_prompt_and_extracts_fenced_reply() {
    let gateway = ScriptedGateway::replying(json!({
        "text": "```json\n[{\"highPriority\":[\"A\"]},{\"mediumPriority\":[\"B\",\"C\"]},{\"lowPriority\":[]}]\n```"
    }));

    let outcome = categorize(&gateway, "A\nB\nC").await;
    assert_eq!(
        outcome,
        CategorizationOutcome::Categorized(TaskSet::new(
            labels(&["A"]),
            labels(&["B", "C"]),
            Vec::new()
        ))
    );

    let prompts = gateway.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("Tasks to categorize:\nA\nB\nC"));
}

#[tokio::test]
async fn categorize_reports_parse_failure() {
    let gateway = ScriptedGateway::replying(json!({ "text": "not json at all" }));
    let outcome = categorize(&gateway, "A").await;
    let CategorizationOutcome::ParseFailed(failure) = outcome else {
        panic!("expected parse failure");
    };
    assert_eq!(failure.candidate, "not json at all");
}

#[tokio::test]
async fn categorize_reports_gateway_failure() {
    let gateway = ScriptedGateway::failing(500);
    let outcome = categorize(&gateway, "A").await;
    assert!(matches!(outcome, CategorizationOutcome::RequestFailed(_)));
}

#[tokio::test]
async fn reply_without_text_yields_empty_board_without_error() {
    let gateway = ScriptedGateway::replying(json!({ "unexpected": true }));
    let outcome = categorize(&gateway, "A").await;
    assert_eq!(outcome, CategorizationOutcome::Categorized(TaskSet::default()));
    let state = BoardState::default()
        .begin_submission()
        .finish_submission(outcome);
    assert!(state.error.is_none());
}

#[test]
fn submission_lifecycle_toggles_loading_and_replaces_tasks() {
    let stale = TaskSet::new(labels(&["old"]), Vec::new(), Vec::new());
    let state = BoardState {
        tasks: stale.clone(),
        error: Some(PARSE_FAILED_MESSAGE.to_string()),
        loading: false,
    };
    assert!(state.can_submit("task"));
    assert!(!state.can_submit("   "));

    let pending = state.begin_submission();
    assert!(pending.loading);
    assert!(pending.error.is_none());
    assert_eq!(pending.tasks, stale);
    assert!(!pending.can_submit("task"));

    let fresh = TaskSet::new(Vec::new(), labels(&["new"]), Vec::new());
    let done = pending.finish_submission(CategorizationOutcome::Categorized(fresh.clone()));
    assert!(!done.loading);
    assert_eq!(done.tasks, fresh);
    assert!(done.error.is_none());
}

#[test]
fn failures_reset_tasks_and_show_banner() {
    let populated = BoardState {
        tasks: TaskSet::new(labels(&["x"]), labels(&["y"]), labels(&["z"])),
        ..BoardState::default()
    };

    let parse_failed = populated
        .clone()
        .begin_submission()
        .finish_submission(CategorizationOutcome::ParseFailed(ExtractionFailure {
            reason: "expected value".into(),
            candidate: "nope".into(),
        }));
    assert!(parse_failed.tasks.is_empty());
    assert_eq!(parse_failed.error.as_deref(), Some(PARSE_FAILED_MESSAGE));

    let request_failed = populated
        .begin_submission()
        .finish_submission(CategorizationOutcome::RequestFailed("boom".into()));
    assert!(request_failed.tasks.is_empty());
    assert_eq!(request_failed.error.as_deref(), Some(REQUEST_FAILED_MESSAGE));
    assert!(request_failed.dismiss_error().error.is_none());
}

#[test]
fn reorder_returns_new_state() {
    let state = BoardState {
        tasks: TaskSet::new(labels(&["a", "b", "c"]), Vec::new(), Vec::new()),
        ..BoardState::default()
    };
    let next = state.clone().reorder(&DragEnd::new("c", Some("a")));
    assert_eq!(next.tasks.high_priority, labels(&["c", "a", "b"]));
    assert_eq!(state.tasks.high_priority, labels(&["a", "b", "c"]));

    let same = state.clone().reorder(&DragEnd::new("b", Some("b")));
    assert_eq!(same, state);
}

#[tokio::test]
async fn gateway_client_round_trips_through_http() {
    let server_url = spawn_gateway(
        StatusCode::OK,
        json!({ "text": "{\"highPriority\":[\"X\"]}" }),
    )
    .await;
    let client = GatewayClient::new(&server_url).expect("client");
    assert_eq!(client.endpoint().path(), "/api/gettasks");

    let outcome = categorize(&client, "X").await;
    assert_eq!(
        outcome,
        CategorizationOutcome::Categorized(TaskSet::new(labels(&["X"]), Vec::new(), Vec::new()))
    );
}

#[tokio::test]
async fn gateway_client_surfaces_error_envelope() {
    let server_url = spawn_gateway(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Failed to generate content" }),
    )
    .await;
    let client = GatewayClient::new(&server_url).expect("client");

    let err = client.generate("X").await.expect_err("should fail");
    let GatewayClientError::Gateway { status, message } = err else {
        panic!("expected gateway error");
    };
    assert_eq!(status, 500);
    assert_eq!(message, "Failed to generate content");
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = GatewayClient::new(&format!("http://{addr}")).expect("client");
    let err = client.generate("X").await.expect_err("should fail");
    assert!(matches!(err, GatewayClientError::Transport(_)));
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = GatewayClient::new("not a url").expect_err("should fail");
    assert!(matches!(err, GatewayClientError::InvalidUrl { .. }));
}
