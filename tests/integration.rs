//! End-to-end integration tests for the conformance harness
//!
//! These tests exercise the full pipeline by:
//! 1. Spawning shell stubs that play the server-under-test role
//! 2. Driving them through the process transport
//! 3. Validating the recovered responses against the built-in schemas
//!
//! The mock-server binary (src/bin/mock_server.rs) covers the happy path;
//! the stubs cover ordering, noise, timeouts and short answers.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::{json, Value};

use mcp_conformance::scenario::{builtin, Expectation, Runner, Scenario, Step};
use mcp_conformance::{Error, ProcessTransport, SchemaRegistry, ServerCommand};

/// A shell script standing in for the server under test
struct StubServer {
    // Held so the script outlives the test
    _dir: tempfile::TempDir,
    script: PathBuf,
}

impl StubServer {
    fn new(script: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("stub.sh");
        fs::write(&path, script).expect("Failed to write stub script");
        Self { _dir: dir, script: path }
    }

    fn command(&self) -> ServerCommand {
        ServerCommand {
            program: PathBuf::from("/bin/sh"),
            args: vec![self.script.to_string_lossy().into_owned()],
            cwd: None,
        }
    }
}

fn mock_server_command() -> ServerCommand {
    ServerCommand {
        program: PathBuf::from(env!("CARGO_BIN_EXE_mock_server")),
        args: Vec::new(),
        cwd: None,
    }
}

fn initialize_request(id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "1.0.0" }
        }
    })
}

const TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn transport_preserves_response_order() {
    let stub = StubServer::new(
        r#"n=0
while IFS= read -r line; do
  n=$((n+1))
  printf '{"echo":%d}\n' "$n"
done
"#,
    );
    let transport = ProcessTransport::new(stub.command(), TIMEOUT);

    let requests: Vec<Value> = (1..=5).map(|i| json!({"id": i, "method": "ping"})).collect();
    let exchange = transport.send_and_collect(&requests).await.unwrap();

    let expected: Vec<Value> = (1..=5).map(|i| json!({"echo": i})).collect();
    assert_eq!(exchange.responses, expected);
}

#[tokio::test]
async fn noise_lines_are_filtered_from_responses() {
    let stub = StubServer::new(
        r#"cat >/dev/null
echo "mock server booting"
printf '{"seq":1}\n'
echo "[INFO] something happened"
printf 'this { is not json\n'
printf '{"seq":2}\n'
"#,
    );
    let transport = ProcessTransport::new(stub.command(), TIMEOUT);

    let exchange = transport
        .send_and_collect(&[json!({"id": 1, "method": "ping"})])
        .await
        .unwrap();

    assert_eq!(exchange.responses, vec![json!({"seq": 1}), json!({"seq": 2})]);
}

#[tokio::test]
async fn timeout_kills_slow_server() {
    // Writes a valid response, but only after the deadline
    let stub = StubServer::new(
        r#"sleep 5
printf '{"late":true}\n'
"#,
    );
    let transport = ProcessTransport::new(stub.command(), Duration::from_secs(1));

    let err = transport
        .send_and_collect(&[json!({"id": 1, "method": "ping"})])
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::Timeout(t) if t == Duration::from_secs(1)),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn early_stdin_close_still_collects_responses() {
    // Closes its end of stdin immediately, then answers anyway; the
    // resulting broken pipe on our side must not discard the response
    let stub = StubServer::new(
        r#"exec 0<&-
sleep 1
printf '{"ok":true}\n'
"#,
    );
    let transport = ProcessTransport::new(stub.command(), TIMEOUT);

    let requests: Vec<Value> = (1..=200)
        .map(|i| json!({"jsonrpc": "2.0", "id": i, "method": "ping"}))
        .collect();
    let exchange = transport.send_and_collect(&requests).await.unwrap();

    assert_eq!(exchange.responses, vec![json!({"ok": true})]);
}

#[tokio::test]
async fn spawn_failure_is_reported() {
    let command = ServerCommand {
        program: PathBuf::from("/nonexistent/definitely-not-a-server"),
        args: Vec::new(),
        cwd: None,
    };
    let transport = ProcessTransport::new(command, TIMEOUT);

    let err = transport.send_and_collect(&[]).await.unwrap_err();
    assert!(matches!(err, Error::SpawnFailed(_)), "got: {err:?}");
}

#[tokio::test]
async fn empty_batch_yields_empty_exchange() {
    let stub = StubServer::new("exit 0\n");
    let transport = ProcessTransport::new(stub.command(), TIMEOUT);

    let exchange = transport.send_and_collect(&[]).await.unwrap();
    assert!(exchange.responses.is_empty());
}

#[tokio::test]
async fn stderr_is_captured_as_auxiliary_text() {
    let stub = StubServer::new(
        r#"cat >/dev/null
echo "warning: deprecated flag" >&2
printf '{"ok":true}\n'
"#,
    );
    let transport = ProcessTransport::new(stub.command(), TIMEOUT);

    let exchange = transport
        .send_and_collect(&[json!({"id": 1, "method": "ping"})])
        .await
        .unwrap();

    assert_eq!(exchange.responses, vec![json!({"ok": true})]);
    assert!(exchange.stderr.contains("deprecated flag"));
}

#[tokio::test]
async fn literal_initialize_exchange_validates() {
    // The canonical handshake: literal request in, literal response out
    let stub = StubServer::new(
        r#"cat >/dev/null
printf '{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05","capabilities":{},"serverInfo":{"name":"x","version":"0.1"}}}\n'
"#,
    );
    let transport = ProcessTransport::new(stub.command(), TIMEOUT);

    let exchange = transport
        .send_and_collect(&[initialize_request(1)])
        .await
        .unwrap();
    assert_eq!(exchange.responses.len(), 1);

    let registry = SchemaRegistry::builtin();
    let result = registry
        .validate(&exchange.responses[0], "InitializeResponse")
        .unwrap();
    assert!(result.is_valid(), "diagnostics: {:?}", result.diagnostics);
}

#[tokio::test]
async fn builtin_scenarios_pass_against_mock_server() {
    let runner = Runner::new(mock_server_command(), TIMEOUT);
    let summary = runner.run_all(&builtin::all()).await;

    assert!(
        summary.all_passed(),
        "failures: {:?}",
        summary
            .outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| (&o.name, &o.diagnostics))
            .collect::<Vec<_>>()
    );
    assert_eq!(summary.passed, 3);
    assert_eq!(summary.total, 3);
}

#[tokio::test]
async fn mock_server_response_ids_match_request_ids() {
    let transport = ProcessTransport::new(mock_server_command(), TIMEOUT);

    let requests = vec![
        initialize_request(1),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {}}),
    ];
    let exchange = transport.send_and_collect(&requests).await.unwrap();

    assert_eq!(exchange.responses.len(), 2);
    assert_eq!(exchange.responses[0]["id"], json!(1));
    assert_eq!(exchange.responses[1]["id"], json!(2));
}

#[tokio::test]
async fn unknown_method_still_yields_an_outcome() {
    let transport = ProcessTransport::new(mock_server_command(), TIMEOUT);

    let requests = vec![
        initialize_request(1),
        json!({"jsonrpc": "2.0", "id": 2, "method": "no/such/method", "params": {}}),
    ];
    let exchange = transport.send_and_collect(&requests).await.unwrap();

    assert_eq!(exchange.responses.len(), 2);
    let error = &exchange.responses[1]["error"];
    assert!(error.is_object());
    assert_eq!(error["code"], json!(-32601));
}

#[tokio::test]
async fn unknown_schema_fails_only_that_scenario() {
    let bogus = Scenario {
        name: "bogus-schema".to_string(),
        description: None,
        steps: vec![Step {
            request: initialize_request(1),
            expect: Some(Expectation {
                schema: Some("NoSuchSchema".to_string()),
                ..Default::default()
            }),
        }],
    };

    let runner = Runner::new(mock_server_command(), TIMEOUT);
    let summary = runner.run_all(&[bogus, builtin::initialize()]).await;

    assert_eq!(summary.passed, 1);
    assert_eq!(summary.total, 2);
    let failed = &summary.outcomes[0];
    assert!(!failed.passed);
    assert!(failed.diagnostics[0].contains("Unknown schema 'NoSuchSchema'"));
}

#[tokio::test]
async fn short_answer_is_a_scenario_failure_not_a_transport_error() {
    // Answers the handshake, then drops the second request on the floor
    let stub = StubServer::new(
        r#"cat >/dev/null
printf '{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05","capabilities":{},"serverInfo":{"name":"x","version":"0.1"}}}\n'
"#,
    );

    let scenario = Scenario {
        name: "short-answer".to_string(),
        description: None,
        steps: vec![
            Step {
                request: initialize_request(1),
                expect: Some(Expectation {
                    schema: Some("InitializeResponse".to_string()),
                    ..Default::default()
                }),
            },
            Step {
                request: json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {}}),
                expect: Some(Expectation {
                    require_outcome: true,
                    ..Default::default()
                }),
            },
        ],
    };

    let runner = Runner::new(stub.command(), TIMEOUT);
    let outcome = runner.run_scenario(&scenario).await;

    assert!(!outcome.passed);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.diagnostics[0].contains("no response for request 1"));
}
