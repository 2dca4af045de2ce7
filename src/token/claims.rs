//! Header and claim documents carried by the first two token segments.

// self
use crate::{_prelude::*, error::ConfigError};

/// Algorithm identifier written into every header.
pub const JWT_ALGORITHM: &str = "HS256";
/// Token type written into every header.
pub const JWT_TYPE: &str = "JWT";

/// Fixed JOSE header; serializes byte-exact as `{"alg":"HS256","typ":"JWT"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
	/// Signing algorithm.
	pub alg: String,
	/// Token type.
	pub typ: String,
}
impl JwtHeader {
	/// Returns the HS256/JWT header used for every issued token.
	pub fn hs256() -> Self {
		Self { alg: JWT_ALGORITHM.into(), typ: JWT_TYPE.into() }
	}
}
impl Default for JwtHeader {
	fn default() -> Self {
		Self::hs256()
	}
}

/// Registered claims of a REPL bearer token, serialized in `jti, sub, iat, exp` order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Random UUID v4 identifying this issuance.
	pub jti: String,
	/// Subject identifying the caller.
	pub sub: String,
	/// Issued-at instant in unix seconds.
	pub iat: i64,
	/// Expiry instant in unix seconds (`iat` + validity).
	pub exp: i64,
}
impl Claims {
	/// Builds fresh claims for `subject`, issued at `issued_at` and valid for `validity`.
	///
	/// Sub-second precision of `issued_at` is truncated.
	pub fn new(
		subject: impl Into<String>,
		issued_at: OffsetDateTime,
		validity: Duration,
	) -> Result<Self, ConfigError> {
		let seconds = validity.whole_seconds();

		if seconds <= 0 {
			return Err(ConfigError::NonPositiveValidity { seconds });
		}

		let iat = issued_at.unix_timestamp();
		let exp = iat.checked_add(seconds).ok_or(ConfigError::ValidityOutOfRange)?;

		OffsetDateTime::from_unix_timestamp(exp).map_err(|_| ConfigError::ValidityOutOfRange)?;

		Ok(Self { jti: new_jti(), sub: subject.into(), iat, exp })
	}

	/// Returns `true` once `instant` reaches the expiry claim.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant.unix_timestamp() >= self.exp
	}
}

fn new_jti() -> String {
	uuid::Builder::from_random_bytes(rand::random()).into_uuid().to_string()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn header_serializes_byte_exact() {
		let json = serde_json::to_string(&JwtHeader::hs256())
			.expect("Header should serialize successfully.");

		assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
	}

	#[test]
	fn claims_keep_key_order_and_window() {
		let issued = macros::datetime!(2001-09-09 01:46:40 UTC);
		let claims = Claims::new("forevervm-com", issued, Duration::hours(1))
			.expect("Claims fixture should build successfully.");
		let json = serde_json::to_string(&claims).expect("Claims should serialize successfully.");

		assert_eq!(claims.iat, 1_000_000_000);
		assert_eq!(claims.exp, 1_000_003_600);
		assert_eq!(
			json,
			format!(
				r#"{{"jti":"{}","sub":"forevervm-com","iat":1000000000,"exp":1000003600}}"#,
				claims.jti
			)
		);
	}

	#[test]
	fn jti_is_a_random_v4_uuid() {
		let issued = OffsetDateTime::now_utc();
		let first = Claims::new("sub", issued, Duration::minutes(5))
			.expect("First claims fixture should build successfully.");
		let second = Claims::new("sub", issued, Duration::minutes(5))
			.expect("Second claims fixture should build successfully.");
		let parsed =
			uuid::Uuid::parse_str(&first.jti).expect("The jti claim should be a valid UUID.");

		assert_eq!(parsed.get_version_num(), 4);
		assert_ne!(first.jti, second.jti);
		assert_eq!((first.iat, first.exp), (second.iat, second.exp));
	}

	#[test]
	fn validity_must_be_positive_and_in_range() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);

		assert_eq!(
			Claims::new("sub", issued, Duration::ZERO),
			Err(ConfigError::NonPositiveValidity { seconds: 0 })
		);
		assert_eq!(
			Claims::new("sub", issued, Duration::seconds(-30)),
			Err(ConfigError::NonPositiveValidity { seconds: -30 })
		);
		assert_eq!(
			Claims::new("sub", issued, Duration::MAX),
			Err(ConfigError::ValidityOutOfRange)
		);
	}

	#[test]
	fn expiry_is_inclusive() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let claims = Claims::new("sub", issued, Duration::seconds(10))
			.expect("Claims fixture should build successfully.");

		assert!(!claims.is_expired_at(issued + Duration::seconds(9)));
		assert!(claims.is_expired_at(issued + Duration::seconds(10)));
	}
}
