//! Tool-call bridge between the conversational assistant and statically registered handlers.
//!
//! Each handler implements [`ToolHandler`] and is registered once in a [`ToolRegistry`]. The
//! registry exposes [`FunctionDeclaration`]s for the assistant configuration and dispatches a
//! [`ToolCall`] batch to the matching handlers, producing one [`FunctionResponse`] per call it
//! recognizes.

pub mod chart;
pub mod python;

pub use chart::*;
pub use python::*;

// crates.io
use serde::de::DeserializeOwned;
use serde_json::json;
// self
use crate::{
	_prelude::*,
	obs::{self, OpOutcome, OpSpan},
	repl::ReplError,
};

/// Boxed future returned by [`ToolHandler::invoke`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + 'a + Send>>;

/// Errors raised while registering or invoking tools.
#[derive(Debug, ThisError)]
pub enum ToolError {
	/// A handler with the same name is already registered.
	#[error("Tool `{name}` is already registered.")]
	Duplicate {
		/// Conflicting tool name.
		name: &'static str,
	},
	/// No handler is registered under the requested name.
	#[error("Tool `{name}` is not registered.")]
	Unknown {
		/// Requested tool name.
		name: String,
	},
	/// Call arguments do not match the handler's parameter schema.
	#[error("Tool `{tool}` received invalid arguments: {source}.")]
	InvalidArguments {
		/// Tool that rejected the arguments.
		tool: &'static str,
		/// Path-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The chart specification string is not JSON.
	#[error("Chart specification is not valid JSON: {source}.")]
	InvalidChart {
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// The REPL service failed while running a tool.
	#[error(transparent)]
	Repl(#[from] ReplError),
}

/// Batch of function calls emitted by the assistant in one turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
	/// Calls in the order the assistant issued them.
	pub function_calls: Vec<FunctionCall>,
}

/// A single function call request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
	/// Assistant-assigned call identifier echoed in the response.
	pub id: String,
	/// Name of the requested tool.
	pub name: String,
	/// JSON arguments matching the tool's parameter schema.
	#[serde(default)]
	pub args: Value,
}

/// Response to one [`FunctionCall`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
	/// Identifier of the call being answered.
	pub id: String,
	/// Handler output, or `{"error": ..}` when the handler failed.
	pub response: Value,
}

/// Tool description advertised to the assistant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
	/// Tool name the assistant calls.
	pub name: String,
	/// Natural-language description for the model.
	pub description: String,
	/// JSON schema of the arguments object.
	pub parameters: Value,
}

/// Capability invoked by name from assistant tool calls.
pub trait ToolHandler
where
	Self: Send + Sync,
{
	/// Name the assistant uses to call the tool.
	fn name(&self) -> &'static str;

	/// Description advertised to the model.
	fn description(&self) -> &'static str;

	/// JSON schema describing the arguments object.
	fn parameter_schema(&self) -> Value;

	/// Runs the tool with the raw JSON arguments.
	fn invoke<'a>(&'a self, args: &'a Value) -> ToolFuture<'a>;
}

/// Name-keyed set of tool handlers.
#[derive(Clone, Default)]
pub struct ToolRegistry {
	handlers: BTreeMap<&'static str, Arc<dyn ToolHandler>>,
}
impl ToolRegistry {
	/// Registers `handler` under its [`ToolHandler::name`].
	pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
		let name = handler.name();

		if self.handlers.contains_key(name) {
			return Err(ToolError::Duplicate { name });
		}

		self.handlers.insert(name, handler);

		Ok(())
	}

	/// Returns `true` if a handler is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.handlers.contains_key(name)
	}

	/// Declarations for every registered handler, ordered by name.
	pub fn declarations(&self) -> Vec<FunctionDeclaration> {
		self.handlers
			.values()
			.map(|handler| FunctionDeclaration {
				name: handler.name().into(),
				description: handler.description().into(),
				parameters: handler.parameter_schema(),
			})
			.collect()
	}

	/// Invokes the handler registered under `name`.
	pub async fn invoke(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
		let handler =
			self.handlers.get(name).ok_or_else(|| ToolError::Unknown { name: name.into() })?;

		handler.invoke(args).await
	}

	/// Runs every call in `call` sequentially and collects the responses.
	///
	/// Calls naming an unregistered tool are skipped. Handler failures are reported to the
	/// assistant as `{"error": "<message>"}` and do not stop the batch.
	pub async fn dispatch(&self, call: &ToolCall) -> Vec<FunctionResponse> {
		let mut responses = Vec::with_capacity(call.function_calls.len());

		for function_call in &call.function_calls {
			let Some(handler) = self.handlers.get(function_call.name.as_str()) else {
				obs::warn_unknown_tool(&function_call.name);

				continue;
			};
			let tool = handler.name();
			let span = OpSpan::tool_call(tool);

			obs::record_tool_outcome(tool, OpOutcome::Attempt);

			let response = match span.instrument(handler.invoke(&function_call.args)).await {
				Ok(output) => {
					obs::record_tool_outcome(tool, OpOutcome::Success);

					output
				},
				Err(e) => {
					obs::record_tool_outcome(tool, OpOutcome::Failure);

					json!({ "error": e.to_string() })
				},
			};

			responses.push(FunctionResponse { id: function_call.id.clone(), response });
		}

		responses
	}
}
impl Debug for ToolRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ToolRegistry").field("tools", &self.handlers.keys()).finish()
	}
}

/// Decodes tool arguments, reporting the offending field path on failure.
pub fn parse_args<T>(tool: &'static str, args: &Value) -> Result<T, ToolError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(args)
		.map_err(|source| ToolError::InvalidArguments { tool, source })
}

fn string_parameter_schema(name: &str, description: &str) -> Value {
	json!({
		"type": "object",
		"properties": {
			name: { "type": "string", "description": description },
		},
		"required": [name],
	})
}
