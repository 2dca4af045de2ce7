//! Optional observability helpers for token issuance and tool dispatch.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `forevervm_bridge.op` with the `op` and
//!   `stage` (call site) fields. Tool dispatch spans add a `tool` field naming the handler.
//!   Warning events cover unknown tools and empty-secret signing.
//! - Enable `metrics` to increment the `forevervm_bridge_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome` (+ `tool` for tool calls).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Signing a bearer token.
	IssueToken,
	/// Issuing the bootstrap token and connecting to the REPL service.
	Bootstrap,
	/// Dispatching one assistant tool call.
	ToolCall,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::IssueToken => "issue_token",
			OpKind::Bootstrap => "bootstrap",
			OpKind::ToolCall => "tool_call",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
