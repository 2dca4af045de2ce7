//! Contracts for the external stateful REPL service.
//!
//! The crate never executes code itself. A [`ReplConnector`] turns a bearer token into a
//! [`ReplSession`], and [`ReplHandle`] serializes calls on that session because state
//! (variables, imports) carries over between executions.

// self
use crate::_prelude::*;

/// Boxed future returned by REPL service clients.
pub type ReplFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ReplError>> + 'a + Send>>;

/// Stream a line of output was written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
	/// Standard output.
	Stdout,
	/// Standard error.
	Stderr,
}

/// One chunk of output streamed while code runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardOutput {
	/// Originating stream.
	pub stream: OutputStream,
	/// Text written to the stream.
	pub data: String,
	/// Sequence number within the execution.
	pub seq: u64,
}

/// Final outcome of an execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
	/// `repr` of the last expression, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Exception raised by the code, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Wall time spent executing, in milliseconds.
	#[serde(default)]
	pub runtime_ms: u64,
}
impl ExecResult {
	/// Returns `true` when the code raised.
	pub fn is_error(&self) -> bool {
		self.error.is_some()
	}
}

/// Collected output lines plus the final result of one execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
	/// Output in the order it was produced.
	pub output: Vec<StandardOutput>,
	/// Final result.
	pub result: ExecResult,
}

/// Error type produced by REPL service clients.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ReplError {
	/// The service refused the connection (bad token, unreachable host).
	#[error("Failed to connect to the REPL service: {message}.")]
	Connect {
		/// Client-supplied message.
		message: String,
	},
	/// The service failed to run the submitted code.
	#[error("REPL execution failed: {message}.")]
	Exec {
		/// Client-supplied message.
		message: String,
	},
}

/// A stateful session on the REPL service.
pub trait ReplSession
where
	Self: Send + Sync,
{
	/// Runs `code` and collects its output and result.
	fn exec<'a>(&'a self, code: &'a str) -> ReplFuture<'a, Execution>;
}

/// Opens sessions on the REPL service using a bearer token.
pub trait ReplConnector
where
	Self: Send + Sync,
{
	/// Authenticates with `token` and returns a fresh session.
	fn connect<'a>(&'a self, token: &'a str) -> ReplFuture<'a, Arc<dyn ReplSession>>;
}

/// Shared handle that lets one execution run at a time on a session.
#[derive(Clone)]
pub struct ReplHandle {
	session: Arc<dyn ReplSession>,
	turn: Arc<AsyncMutex<()>>,
}
impl ReplHandle {
	/// Wraps a connected session.
	pub fn new(session: Arc<dyn ReplSession>) -> Self {
		Self { session, turn: Default::default() }
	}

	/// Runs `code`, waiting for any in-flight execution on the same session to finish.
	pub async fn exec(&self, code: &str) -> Result<Execution, ReplError> {
		let _turn = self.turn.lock().await;

		self.session.exec(code).await
	}
}
impl Debug for ReplHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReplHandle(..)")
	}
}
