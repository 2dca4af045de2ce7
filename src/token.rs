//! HS256 JSON Web Token construction for the REPL service bearer credential.
//!
//! A token is `base64url(header).base64url(claims).base64url(HMAC-SHA256(..))`, each segment
//! unpadded. Base64url and HMAC come from `base64`, `hmac`, and `sha2`; only the three-segment
//! assembly lives here.

pub mod claims;
pub mod secret;
pub mod segment;
pub mod signer;

pub use claims::*;
pub use secret::*;
pub use segment::*;
pub use signer::*;

// self
use crate::_prelude::*;

/// Errors raised while inspecting or verifying a presented token.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// The token does not consist of exactly three dot-separated segments.
	#[error("Token must have exactly three dot-separated segments.")]
	Malformed,
	/// A segment is not valid base64url.
	#[error("The {segment} segment is not valid base64url.")]
	InvalidSegment {
		/// Segment label (header, payload, signature).
		segment: &'static str,
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// A segment decoded to bytes that are not the expected JSON document.
	#[error("The {segment} segment is not valid JSON.")]
	InvalidJson {
		/// Segment label (header or payload).
		segment: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// The header names an algorithm or type other than HS256/JWT.
	#[error("Unsupported token header: alg={alg}, typ={typ}.")]
	UnsupportedHeader {
		/// Algorithm named by the header.
		alg: String,
		/// Type named by the header.
		typ: String,
	},
	/// The signature does not match the header and payload under the configured secret.
	#[error("Token signature does not match.")]
	SignatureMismatch,
	/// The token expired at the contained instant (unix seconds).
	#[error("Token expired at {exp}.")]
	Expired {
		/// Expiry claim in unix seconds.
		exp: i64,
	},
}
