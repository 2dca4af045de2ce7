//! HMAC-SHA256 signing and token issuance.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	config::{EmptySecretPolicy, SignerConfig},
	error::{ConfigError, CryptoError},
	obs::{self, OpKind, OpOutcome, OpSpan},
	token::{Claims, JwtHeader, TokenError, decode_segment, encode_segment},
};

type HmacSha256 = Hmac<Sha256>;

/// Computes HMAC-SHA256 over `message` keyed by `secret` and returns it as unpadded base64url.
///
/// The key is not policed here: an empty `secret` produces a well-formed signature that anyone
/// can recompute. [`TokenSigner`] and [`issue_token`] enforce [`EmptySecretPolicy`] on top.
pub fn sign(message: &str, secret: &str) -> Result<String, CryptoError> {
	let mut mac = keyed_mac(secret.as_bytes())?;

	mac.update(message.as_bytes());

	Ok(encode_segment(mac.finalize().into_bytes()))
}

/// Issues a token for `subject` valid for `validity_seconds` from the current wall-clock time.
///
/// `subject` is copied into the `sub` claim verbatim. Rejects an empty `secret` and a
/// non-positive window with [`ConfigError`].
pub fn issue_token(subject: &str, secret: &str, validity_seconds: i64) -> Result<String> {
	let config = SignerConfig::builder()
		.subject(subject)
		.secret(secret)
		.validity(Duration::seconds(validity_seconds))
		.build()?;

	TokenSigner::new(config).issue()
}

/// Stateless issuer of HS256 bearer tokens bound to a validated [`SignerConfig`].
#[derive(Clone, Debug)]
pub struct TokenSigner {
	config: SignerConfig,
}
impl TokenSigner {
	/// Creates a signer for the provided configuration.
	pub fn new(config: SignerConfig) -> Self {
		Self { config }
	}

	/// Configuration the signer was built with.
	pub fn config(&self) -> &SignerConfig {
		&self.config
	}

	/// Builds fresh claims as if issued at `now`.
	pub fn claims_at(&self, now: OffsetDateTime) -> Result<Claims> {
		Ok(Claims::new(self.config.subject(), now, self.config.validity())?)
	}

	/// Issues a token using the current UTC instant.
	pub fn issue(&self) -> Result<String> {
		self.issue_at(OffsetDateTime::now_utc())
	}

	/// Issues a token as if the clock read `now`.
	pub fn issue_at(&self, now: OffsetDateTime) -> Result<String> {
		const KIND: OpKind = OpKind::IssueToken;

		let _span = OpSpan::new(KIND, "issue_at").entered();

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = self.claims_at(now).and_then(|claims| self.sign_claims(&claims));

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}

	/// Encodes the fixed header and `claims`, signs them, and joins the three segments.
	pub fn sign_claims(&self, claims: &Claims) -> Result<String> {
		let secret = self.config.secret();

		if secret.is_empty() {
			match self.config.empty_secret() {
				EmptySecretPolicy::Reject => return Err(ConfigError::EmptySecret.into()),
				EmptySecretPolicy::Allow => obs::warn_event(
					OpKind::IssueToken,
					"Signing with an empty secret; the token can be forged by anyone.",
				),
			}
		}

		let header = encode_segment(serde_json::to_vec(&JwtHeader::hs256())?);
		let payload = encode_segment(serde_json::to_vec(claims)?);
		let signing_input = format!("{header}.{payload}");
		let signature = sign(&signing_input, secret.expose())?;

		Ok(format!("{signing_input}.{signature}"))
	}

	/// Verifies a token minted under the same secret and returns its claims.
	///
	/// Checks the segment layout, the HS256 header, the signature (constant time), and expiry
	/// relative to `now`.
	pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims> {
		let mut segments = token.split('.');
		let (Some(header), Some(payload), Some(signature), None) =
			(segments.next(), segments.next(), segments.next(), segments.next())
		else {
			return Err(TokenError::Malformed.into());
		};
		let decoded_header: JwtHeader = decode_json(header, "header")?;

		if decoded_header != JwtHeader::hs256() {
			return Err(TokenError::UnsupportedHeader {
				alg: decoded_header.alg,
				typ: decoded_header.typ,
			}
			.into());
		}

		let signature = decode_segment(signature)
			.map_err(|source| TokenError::InvalidSegment { segment: "signature", source })?;
		let mut mac = keyed_mac(self.config.secret().expose().as_bytes())?;

		mac.update(header.as_bytes());
		mac.update(b".");
		mac.update(payload.as_bytes());
		mac.verify_slice(&signature).map_err(|_| TokenError::SignatureMismatch)?;

		let claims: Claims = decode_json(payload, "payload")?;

		if claims.is_expired_at(now) {
			return Err(TokenError::Expired { exp: claims.exp }.into());
		}

		Ok(claims)
	}
}

fn keyed_mac(key: &[u8]) -> Result<HmacSha256, CryptoError> {
	<HmacSha256 as Mac>::new_from_slice(key)
		.map_err(|e| CryptoError::Unavailable { reason: e.to_string() })
}

fn decode_json<T>(segment: &str, label: &'static str) -> Result<T, TokenError>
where
	T: for<'de> Deserialize<'de>,
{
	let bytes = decode_segment(segment)
		.map_err(|source| TokenError::InvalidSegment { segment: label, source })?;

	serde_json::from_slice(&bytes).map_err(|source| TokenError::InvalidJson { segment: label, source })
}
