// self
use crate::{_prelude::*, obs::OpKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// A span builder used by bridge operations.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	pub fn new(kind: OpKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("forevervm_bridge.op", op = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Creates a `tool_call` span carrying the dispatched tool's name in its own `tool` field.
	pub fn tool_call(tool: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"forevervm_bridge.op",
				op = OpKind::ToolCall.as_str(),
				stage = "dispatch",
				tool
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = tool;

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> OpSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OpSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OpSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`OpSpan::entered`].
pub struct OpSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for OpSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OpSpanGuard(..)")
	}
}

/// Emits a warning event tagged with the operation kind (when tracing is enabled).
pub fn warn_event(kind: OpKind, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(op = kind.as_str(), "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, message);
	}
}

/// Warns that an assistant asked for a tool nobody registered.
pub fn warn_unknown_tool(tool: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(op = OpKind::ToolCall.as_str(), tool, "Skipping unknown tool.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = tool;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn op_span_noop_without_tracing() {
		let _guard = OpSpan::new(OpKind::IssueToken, "test").entered();
		let _tool = OpSpan::tool_call("run_python").entered();

		warn_event(OpKind::ToolCall, "smoke");
		warn_unknown_tool("missing_tool");
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn tool_call_span_records_tool_field() {
		// std
		use std::sync::Mutex;
		// crates.io
		use tracing::{
			Event, Metadata, Subscriber,
			field::{Field, Visit},
			span::{Attributes, Id, Record},
		};

		struct FieldCapture(Arc<Mutex<Vec<(String, String)>>>);
		impl Visit for FieldCapture {
			fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
				self.0
					.lock()
					.expect("Capture lock should not be poisoned.")
					.push((field.name().into(), format!("{value:?}")));
			}

			fn record_str(&mut self, field: &Field, value: &str) {
				self.0
					.lock()
					.expect("Capture lock should not be poisoned.")
					.push((field.name().into(), value.into()));
			}
		}

		struct Capture(Arc<Mutex<Vec<(String, String)>>>);
		impl Subscriber for Capture {
			fn enabled(&self, _: &Metadata<'_>) -> bool {
				true
			}

			fn new_span(&self, span: &Attributes<'_>) -> Id {
				span.record(&mut FieldCapture(self.0.clone()));

				Id::from_u64(1)
			}

			fn record(&self, _: &Id, _: &Record<'_>) {}

			fn record_follows_from(&self, _: &Id, _: &Id) {}

			fn event(&self, _: &Event<'_>) {}

			fn enter(&self, _: &Id) {}

			fn exit(&self, _: &Id) {}
		}

		let fields = Arc::new(Mutex::new(Vec::new()));

		tracing::subscriber::with_default(Capture(fields.clone()), || {
			let _span = OpSpan::tool_call("render_altair");
		});

		let fields = fields.lock().expect("Capture lock should not be poisoned.");

		assert!(fields.contains(&("op".into(), "tool_call".into())));
		assert!(fields.contains(&("stage".into(), "dispatch".into())));
		assert!(fields.contains(&("tool".into(), "render_altair".into())));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OpSpan::new(OpKind::ToolCall, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
