//! `render_altair`: accepts a Vega-Lite chart specification serialized as a JSON string.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	tool::{ToolError, ToolFuture, ToolHandler, parse_args, string_parameter_schema},
};

/// Tool name advertised to the assistant.
pub const RENDER_ALTAIR: &str = "render_altair";

/// Latest chart specification handed over by the assistant, shared with the renderer.
#[derive(Clone, Debug, Default)]
pub struct ChartSlot(Arc<RwLock<Option<Value>>>);
impl ChartSlot {
	/// Replaces the current specification.
	pub fn store(&self, spec: Value) {
		*self.0.write() = Some(spec);
	}

	/// Returns a copy of the current specification, if any.
	pub fn latest(&self) -> Option<Value> {
		self.0.read().clone()
	}
}

#[derive(Deserialize)]
struct RenderChartArgs {
	json_graph: String,
}

/// Parses the chart JSON and publishes it to a [`ChartSlot`].
#[derive(Clone, Debug)]
pub struct RenderChartTool {
	slot: ChartSlot,
}
impl RenderChartTool {
	/// Creates the tool publishing into `slot`.
	pub fn new(slot: ChartSlot) -> Self {
		Self { slot }
	}
}
impl ToolHandler for RenderChartTool {
	fn name(&self) -> &'static str {
		RENDER_ALTAIR
	}

	fn description(&self) -> &'static str {
		"Displays an altair graph in json format."
	}

	fn parameter_schema(&self) -> Value {
		string_parameter_schema(
			"json_graph",
			"JSON STRING representation of the graph to render. Must be a string, not a json object",
		)
	}

	fn invoke<'a>(&'a self, args: &'a Value) -> ToolFuture<'a> {
		Box::pin(async move {
			let RenderChartArgs { json_graph } = parse_args(RENDER_ALTAIR, args)?;
			let spec = serde_json::from_str::<Value>(&json_graph)
				.map_err(|source| ToolError::InvalidChart { source })?;

			self.slot.store(spec);

			Ok(json!({ "output": { "success": true } }))
		})
	}
}
