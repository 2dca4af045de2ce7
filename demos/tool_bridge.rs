//! Wires the tool bridge to a scripted REPL session and dispatches one assistant turn.

// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use forevervm_bridge::{
	_preludet::{ScriptedConnector, test_signer_config},
	bridge::Bridge,
	tool::{FunctionCall, RENDER_ALTAIR, RUN_PYTHON, ToolCall},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let connector = ScriptedConnector::default();
	let bridge = Bridge::init(test_signer_config(), &connector).await?;

	println!("tools = {}", serde_json::to_string_pretty(&bridge.declarations())?);

	let turn = ToolCall {
		function_calls: vec![
			FunctionCall {
				id: "chart-1".into(),
				name: RENDER_ALTAIR.into(),
				args: json!({ "json_graph": r#"{"mark":"bar","data":{"values":[{"a":1}]}}"# }),
			},
			FunctionCall {
				id: "py-1".into(),
				name: RUN_PYTHON.into(),
				args: json!({ "code": "import math\nmath.pi" }),
			},
		],
	};

	if let Some(responses) = bridge.handle_tool_call(&turn).await {
		println!("responses = {}", serde_json::to_string_pretty(&responses)?);
	}

	println!("chart = {:?}", bridge.chart().latest());

	Ok(())
}
