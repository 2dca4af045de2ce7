//! `run_python`: forwards code to the shared REPL session.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	repl::{ExecResult, ReplHandle, StandardOutput},
	tool::{ToolFuture, ToolHandler, parse_args, string_parameter_schema},
};

/// Tool name advertised to the assistant.
pub const RUN_PYTHON: &str = "run_python";

#[derive(Deserialize)]
struct RunPythonArgs {
	code: String,
}

#[derive(Serialize)]
struct RunPythonOutput<'a> {
	output: &'a [StandardOutput],
	result: &'a ExecResult,
}

/// Runs Python code once on the REPL and returns its output lines and result.
#[derive(Clone, Debug)]
pub struct RunPythonTool {
	repl: ReplHandle,
}
impl RunPythonTool {
	/// Creates the tool bound to a connected session.
	pub fn new(repl: ReplHandle) -> Self {
		Self { repl }
	}
}
impl ToolHandler for RunPythonTool {
	fn name(&self) -> &'static str {
		RUN_PYTHON
	}

	fn description(&self) -> &'static str {
		"Run Python code in a stateful read-eval-print loop. Variables, imports, and functions are \
		 persisted between calls. Imports of common packages, including requests, matplotlib, and \
		 pandas, are permitted, but you may not install libraries."
	}

	fn parameter_schema(&self) -> Value {
		string_parameter_schema("code", "The Python code to run")
	}

	fn invoke<'a>(&'a self, args: &'a Value) -> ToolFuture<'a> {
		Box::pin(async move {
			let RunPythonArgs { code } = parse_args(RUN_PYTHON, args)?;
			let execution = self.repl.exec(&code).await?;
			let output = RunPythonOutput { output: &execution.output, result: &execution.result };

			Ok(json!({ "output": output }))
		})
	}
}
