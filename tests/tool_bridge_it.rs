// crates.io
use serde_json::json;
// self
use forevervm_bridge::{
	_preludet::*,
	bridge::Bridge,
	config::{EmptySecretPolicy, SignerConfig},
	error::ConfigError,
	repl::{ExecResult, Execution, OutputStream, ReplError, StandardOutput},
	tool::{FunctionCall, RENDER_ALTAIR, RUN_PYTHON, ToolCall},
};

fn call(id: &str, name: &str, args: Value) -> FunctionCall {
	FunctionCall { id: id.into(), name: name.into(), args }
}

async fn init_bridge() -> (Bridge, ScriptedConnector) {
	let connector = ScriptedConnector::default();
	let bridge = Bridge::init(test_signer_config(), &connector)
		.await
		.expect("Bridge should initialize against the scripted connector.");

	(bridge, connector)
}

#[tokio::test]
async fn init_presents_a_verifiable_token() {
	let (bridge, connector) = init_bridge().await;
	let tokens = connector.tokens();

	assert_eq!(tokens.len(), 1);

	let claims = bridge
		.signer()
		.verify_at(&tokens[0], OffsetDateTime::now_utc())
		.expect("Bootstrap token should verify under the shared secret.");

	assert_eq!(claims.sub, "forevervm-com");
	assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn declarations_advertise_both_tools() {
	let (bridge, _) = init_bridge().await;
	let names =
		bridge.declarations().into_iter().map(|declaration| declaration.name).collect::<Vec<_>>();

	assert_eq!(names, vec![RENDER_ALTAIR.to_owned(), RUN_PYTHON.to_owned()]);
	assert!(bridge.registry().contains(RUN_PYTHON));
}

#[tokio::test]
async fn mixed_batch_renders_chart_and_runs_python() {
	let (bridge, connector) = init_bridge().await;

	connector.session.push(Ok(Execution {
		output: vec![StandardOutput { stream: OutputStream::Stdout, data: "6\n".into(), seq: 0 }],
		result: ExecResult { value: None, error: None, runtime_ms: 12 },
	}));

	let batch = ToolCall {
		function_calls: vec![
			call("c1", RENDER_ALTAIR, json!({ "json_graph": r#"{"mark":"line"}"# })),
			call("c2", RUN_PYTHON, json!({ "code": "print(1 + 2 + 3)" })),
			call("c3", "google_search", json!({ "query": "weather" })),
		],
	};
	let responses =
		bridge.handle_tool_call(&batch).await.expect("Known tools should produce responses.");

	assert_eq!(responses.len(), 2);
	assert_eq!(responses[0].id, "c1");
	assert_eq!(responses[0].response, json!({ "output": { "success": true } }));
	assert_eq!(responses[1].id, "c2");
	assert_eq!(responses[1].response["output"]["output"][0]["data"], "6\n");
	assert_eq!(responses[1].response["output"]["result"]["runtime_ms"], 12);
	assert_eq!(connector.session.executed(), vec!["print(1 + 2 + 3)".to_owned()]);
	assert_eq!(bridge.chart().latest(), Some(json!({ "mark": "line" })));
}

#[tokio::test]
async fn unknown_only_batch_sends_nothing() {
	let (bridge, _) = init_bridge().await;
	let batch = ToolCall { function_calls: vec![call("x", "unknown_tool", json!({}))] };

	assert!(bridge.handle_tool_call(&batch).await.is_none());
	assert!(bridge.handle_tool_call(&ToolCall::default()).await.is_none());
}

#[tokio::test]
async fn handler_failures_become_error_responses() {
	let (bridge, connector) = init_bridge().await;

	connector.session.push(Err(ReplError::Exec { message: "kernel died".into() }));

	let batch = ToolCall {
		function_calls: vec![
			call("bad-chart", RENDER_ALTAIR, json!({ "json_graph": "not json" })),
			call("dead-repl", RUN_PYTHON, json!({ "code": "1" })),
		],
	};
	let responses = bridge.handle_tool_call(&batch).await.expect("Failures should be reported.");

	assert_eq!(responses.len(), 2);

	for response in &responses {
		assert!(response.response["error"].is_string(), "{response:?}");
	}

	assert!(
		responses[1].response["error"]
			.as_str()
			.is_some_and(|message| message.contains("kernel died"))
	);
	assert!(bridge.chart().latest().is_none());
}

#[tokio::test]
async fn refused_connection_fails_init() {
	let connector = ScriptedConnector::refusing("token rejected");
	let err = Bridge::init(test_signer_config(), &connector)
		.await
		.expect_err("Refused connection must fail initialization.");

	assert!(matches!(err, Error::Repl(ReplError::Connect { .. })));
	assert_eq!(connector.tokens().len(), 1);
}

#[tokio::test]
async fn legacy_empty_secret_mode_still_connects() {
	let config = SignerConfig::builder()
		.empty_secret(EmptySecretPolicy::Allow)
		.validity(Duration::seconds(60))
		.build()
		.expect("Allow policy should accept an empty secret.");
	let connector = ScriptedConnector::default();
	let bridge =
		Bridge::init(config, &connector).await.expect("Legacy empty-secret mode still connects.");
	let tokens = connector.tokens();
	let claims = bridge
		.signer()
		.verify_at(&tokens[0], OffsetDateTime::now_utc())
		.expect("Empty-key token verifies under the empty key.");

	assert_eq!(claims.exp - claims.iat, 60);
	assert_eq!(
		SignerConfig::builder().build().expect_err("Default policy rejects empty secret."),
		ConfigError::EmptySecret
	);
}
