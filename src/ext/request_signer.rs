//! Request signing contracts that let downstream crates attach REPL bearer tokens to arbitrary
//! HTTP clients.

// self
use crate::{_prelude::*, token::TokenSigner};

/// Describes how to attach a bearer credential to an outbound request without constraining the
/// HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects authorization state.
	fn attach_token(&self, request: Request) -> Result<Request, Error>;
}

/// Signs every request with a token minted at attach time.
#[derive(Clone, Debug)]
pub struct BearerSigner {
	signer: TokenSigner,
}
impl BearerSigner {
	/// Wraps a configured [`TokenSigner`].
	pub fn new(signer: TokenSigner) -> Self {
		Self { signer }
	}

	/// Returns an `Authorization` header value carrying a fresh token.
	pub fn authorization_value(&self) -> Result<String> {
		Ok(format!("Bearer {}", self.signer.issue()?))
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, Error> for BearerSigner {
	fn attach_token(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
		Ok(request.bearer_auth(self.signer.issue()?))
	}
}
