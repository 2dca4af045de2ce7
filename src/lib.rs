//! Mint short-lived HS256 bearer tokens for a stateful REPL service and bridge assistant tool
//! calls (chart rendering, Python execution) to statically registered handlers.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod bridge;
pub mod config;
pub mod error;
pub mod ext;
pub mod obs;
pub mod repl;
pub mod token;
pub mod tool;
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and scripted REPL fixtures for integration tests and demos.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		config::SignerConfig,
		repl::{
			ExecResult, Execution, OutputStream, ReplConnector, ReplError, ReplFuture,
			ReplSession, StandardOutput,
		},
	};

	/// Shared secret used by test signer fixtures.
	pub const TEST_SECRET: &str = "test-secret";

	/// Builds a signer configuration keyed with [`TEST_SECRET`] and default subject/validity.
	pub fn test_signer_config() -> SignerConfig {
		SignerConfig::builder()
			.secret(TEST_SECRET)
			.build()
			.expect("Test signer configuration should build successfully.")
	}

	/// REPL session that records submitted code and replays queued executions.
	///
	/// When the queue is empty the session echoes the submitted code on stdout.
	#[derive(Debug, Default)]
	pub struct ScriptedSession {
		executed: Mutex<Vec<String>>,
		queued: Mutex<VecDeque<Result<Execution, ReplError>>>,
	}
	impl ScriptedSession {
		/// Queues the outcome returned by the next `exec` call.
		pub fn push(&self, outcome: Result<Execution, ReplError>) {
			self.queued.lock().push_back(outcome);
		}

		/// Returns every code snippet submitted so far, in order.
		pub fn executed(&self) -> Vec<String> {
			self.executed.lock().clone()
		}
	}
	impl ReplSession for ScriptedSession {
		fn exec<'a>(&'a self, code: &'a str) -> ReplFuture<'a, Execution> {
			Box::pin(async move {
				self.executed.lock().push(code.to_owned());

				match self.queued.lock().pop_front() {
					Some(outcome) => outcome,
					None => Ok(Execution {
						output: vec![StandardOutput {
							stream: OutputStream::Stdout,
							data: code.to_owned(),
							seq: 0,
						}],
						result: ExecResult::default(),
					}),
				}
			})
		}
	}

	/// Connector that hands out a single [`ScriptedSession`] and records presented tokens.
	#[derive(Debug, Default)]
	pub struct ScriptedConnector {
		/// Session returned by every successful `connect` call.
		pub session: Arc<ScriptedSession>,
		tokens: Mutex<Vec<String>>,
		refusal: Option<String>,
	}
	impl ScriptedConnector {
		/// Builds a connector whose `connect` always fails with the provided message.
		pub fn refusing(message: impl Into<String>) -> Self {
			Self { refusal: Some(message.into()), ..Default::default() }
		}

		/// Returns every bearer token presented to the connector.
		pub fn tokens(&self) -> Vec<String> {
			self.tokens.lock().clone()
		}
	}
	impl ReplConnector for ScriptedConnector {
		fn connect<'a>(&'a self, token: &'a str) -> ReplFuture<'a, Arc<dyn ReplSession>> {
			Box::pin(async move {
				self.tokens.lock().push(token.to_owned());

				if let Some(message) = &self.refusal {
					return Err(ReplError::Connect { message: message.clone() });
				}

				let session: Arc<dyn ReplSession> = self.session.clone();

				Ok(session)
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
#[cfg(test)] use {color_eyre as _, httpmock as _};
