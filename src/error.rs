//! Crate-level error types shared by the signer, tool bridge, and REPL contracts.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The signing primitive could not be used.
	#[error(transparent)]
	Crypto(#[from] CryptoError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A presented token failed structural or signature checks.
	#[error(transparent)]
	Token(#[from] crate::token::TokenError),
	/// Tool registration or invocation failure.
	#[error(transparent)]
	Tool(#[from] crate::tool::ToolError),
	/// The external REPL service rejected or failed a request.
	#[error(transparent)]
	Repl(#[from] crate::repl::ReplError),

	/// Header or claims could not be serialized.
	#[error("Token segment could not be serialized.")]
	Serialization(#[from] serde_json::Error),
}

/// Failures of the HMAC-SHA256 primitive. Never downgraded to a weaker signature.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CryptoError {
	/// HMAC-SHA256 could not be keyed or invoked.
	#[error("HMAC-SHA256 is unavailable: {reason}.")]
	Unavailable {
		/// Primitive-supplied reason string.
		reason: String,
	},
}

/// Configuration and validation failures raised before any token is signed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// The signing secret is empty or its environment variable is unset.
	#[error("Signing secret is empty; refusing to sign with an empty key.")]
	EmptySecret,
	/// The secret environment variable holds non-UTF-8 data.
	#[error("Environment variable `{var}` is not valid UTF-8.")]
	SecretNotUnicode {
		/// Variable that was read.
		var: String,
	},
	/// The subject claim is empty.
	#[error("Subject claim cannot be empty.")]
	EmptySubject,
	/// Token validity window must be positive.
	#[error("Token validity must be positive, got {seconds} seconds.")]
	NonPositiveValidity {
		/// Rejected window length in seconds.
		seconds: i64,
	},
	/// Issued-at plus validity overflows the supported date range.
	#[error("Token expiry exceeds the supported date range.")]
	ValidityOutOfRange,
}
