//! Explicit bootstrap of the REPL client and tool registry.
//!
//! [`Bridge::init`] is called once by the application: it signs a bearer token, connects to the
//! REPL service with it, and registers the `render_altair` and `run_python` tools. Nothing is
//! contacted unless token issuance succeeds.

// self
use crate::{
	_prelude::*,
	config::SignerConfig,
	obs::{self, OpKind, OpOutcome, OpSpan},
	repl::{ReplConnector, ReplHandle},
	token::TokenSigner,
	tool::{
		ChartSlot, FunctionDeclaration, FunctionResponse, RenderChartTool, RunPythonTool,
		ToolCall, ToolRegistry,
	},
};

/// Connected bridge handle owning the signer, REPL session, and tool registry.
#[derive(Clone, Debug)]
pub struct Bridge {
	signer: TokenSigner,
	repl: ReplHandle,
	chart: ChartSlot,
	registry: ToolRegistry,
}
impl Bridge {
	/// Issues a token, connects through `connector`, and registers the built-in tools.
	pub async fn init<C>(config: SignerConfig, connector: &C) -> Result<Self>
	where
		C: ?Sized + ReplConnector,
	{
		const KIND: OpKind = OpKind::Bootstrap;

		let span = OpSpan::new(KIND, "init");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let signer = TokenSigner::new(config);
				let token = signer.issue()?;
				let repl = ReplHandle::new(connector.connect(&token).await?);
				let chart = ChartSlot::default();
				let mut registry = ToolRegistry::default();

				registry.register(Arc::new(RenderChartTool::new(chart.clone())))?;
				registry.register(Arc::new(RunPythonTool::new(repl.clone())))?;

				Ok(Self { signer, repl, chart, registry })
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}

	/// Signer used for the bootstrap token; reusable for fresh tokens.
	pub fn signer(&self) -> &TokenSigner {
		&self.signer
	}

	/// Shared REPL session handle.
	pub fn repl(&self) -> &ReplHandle {
		&self.repl
	}

	/// Slot receiving chart specifications from `render_altair`.
	pub fn chart(&self) -> &ChartSlot {
		&self.chart
	}

	/// Registered tools.
	pub fn registry(&self) -> &ToolRegistry {
		&self.registry
	}

	/// Declarations to advertise in the assistant configuration.
	pub fn declarations(&self) -> Vec<FunctionDeclaration> {
		self.registry.declarations()
	}

	/// Dispatches a tool-call batch; returns `None` when there is nothing to send back.
	pub async fn handle_tool_call(&self, call: &ToolCall) -> Option<Vec<FunctionResponse>> {
		let responses = self.registry.dispatch(call).await;

		if responses.is_empty() { None } else { Some(responses) }
	}
}
