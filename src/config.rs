//! Signer configuration: subject, validity window, secret source, and empty-secret policy.

// std
use std::env::{self, VarError};
// self
use crate::{_prelude::*, error::ConfigError, token::SigningSecret};

/// Subject claim presented to the REPL service.
pub const DEFAULT_SUBJECT: &str = "forevervm-com";
/// Environment variable holding the shared signing secret.
pub const DEFAULT_SECRET_ENV: &str = "FOREVERVM_JWT_SECRET";
/// Lifetime of an issued token.
pub const DEFAULT_VALIDITY: Duration = Duration::hours(1);

/// What the signer does when the configured secret is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmptySecretPolicy {
	/// Refuse to build a configuration (and therefore to sign) with an empty secret.
	#[default]
	Reject,
	/// Sign with the empty key and warn on every issuance. The resulting tokens are
	/// syntactically valid but forgeable by anyone.
	Allow,
}

/// Validated configuration for [`crate::token::TokenSigner`].
#[derive(Clone, Debug)]
pub struct SignerConfig {
	subject: String,
	secret: SigningSecret,
	validity: Duration,
	empty_secret: EmptySecretPolicy,
}
impl SignerConfig {
	/// Returns a builder seeded with the default subject, validity, and policy.
	pub fn builder() -> SignerConfigBuilder {
		SignerConfigBuilder::default()
	}

	/// Loads the secret from [`DEFAULT_SECRET_ENV`] and applies every other default.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::builder().secret_from_env(DEFAULT_SECRET_ENV).build()
	}

	/// Subject claim written into every token.
	pub fn subject(&self) -> &str {
		&self.subject
	}

	/// Shared signing secret.
	pub fn secret(&self) -> &SigningSecret {
		&self.secret
	}

	/// Validity window added to the issued-at instant.
	pub fn validity(&self) -> Duration {
		self.validity
	}

	/// Policy applied when the secret is empty.
	pub fn empty_secret(&self) -> EmptySecretPolicy {
		self.empty_secret
	}
}

#[derive(Clone, Debug)]
enum SecretSource {
	Unset,
	Value(SigningSecret),
	Env(String),
}

/// Builder for [`SignerConfig`] values.
#[derive(Clone, Debug)]
pub struct SignerConfigBuilder {
	subject: String,
	secret: SecretSource,
	validity: Duration,
	empty_secret: EmptySecretPolicy,
}
impl SignerConfigBuilder {
	/// Overrides the subject claim.
	pub fn subject(mut self, subject: impl Into<String>) -> Self {
		self.subject = subject.into();

		self
	}

	/// Uses the provided secret directly.
	pub fn secret(mut self, secret: impl Into<SigningSecret>) -> Self {
		self.secret = SecretSource::Value(secret.into());

		self
	}

	/// Reads the secret from `var` when [`build`](Self::build) runs; unset counts as empty.
	pub fn secret_from_env(mut self, var: impl Into<String>) -> Self {
		self.secret = SecretSource::Env(var.into());

		self
	}

	/// Overrides the validity window.
	pub fn validity(mut self, validity: Duration) -> Self {
		self.validity = validity;

		self
	}

	/// Overrides the empty-secret policy.
	pub fn empty_secret(mut self, policy: EmptySecretPolicy) -> Self {
		self.empty_secret = policy;

		self
	}

	/// Resolves the secret source and validates the configuration.
	pub fn build(self) -> Result<SignerConfig, ConfigError> {
		let Self { subject, secret, validity, empty_secret } = self;

		if subject.is_empty() {
			return Err(ConfigError::EmptySubject);
		}

		let seconds = validity.whole_seconds();

		if seconds <= 0 {
			return Err(ConfigError::NonPositiveValidity { seconds });
		}

		let secret = match secret {
			SecretSource::Unset => SigningSecret::new(String::new()),
			SecretSource::Value(secret) => secret,
			SecretSource::Env(var) => resolve_secret(var, |name| env::var(name))?,
		};

		if secret.is_empty() && empty_secret == EmptySecretPolicy::Reject {
			return Err(ConfigError::EmptySecret);
		}

		Ok(SignerConfig { subject, secret, validity, empty_secret })
	}
}

// An unset variable resolves to the empty secret; the caller applies the policy.
fn resolve_secret<F>(var: String, lookup: F) -> Result<SigningSecret, ConfigError>
where
	F: Fn(&str) -> Result<String, VarError>,
{
	match lookup(&var) {
		Ok(value) => Ok(SigningSecret::new(value)),
		Err(VarError::NotPresent) => Ok(SigningSecret::new(String::new())),
		Err(VarError::NotUnicode(_)) => Err(ConfigError::SecretNotUnicode { var }),
	}
}

impl Default for SignerConfigBuilder {
	fn default() -> Self {
		Self {
			subject: DEFAULT_SUBJECT.into(),
			secret: SecretSource::Unset,
			validity: DEFAULT_VALIDITY,
			empty_secret: EmptySecretPolicy::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_repl_service_expectations() {
		let config = SignerConfig::builder()
			.secret("test-secret")
			.build()
			.expect("Configuration with a secret should build.");

		assert_eq!(config.subject(), "forevervm-com");
		assert_eq!(config.validity(), Duration::seconds(3600));
		assert_eq!(config.empty_secret(), EmptySecretPolicy::Reject);
		assert_eq!(config.secret().expose(), "test-secret");
	}

	#[test]
	fn missing_or_empty_secret_is_rejected() {
		assert_eq!(SignerConfig::builder().build().unwrap_err(), ConfigError::EmptySecret);
		assert_eq!(
			SignerConfig::builder().secret("").build().unwrap_err(),
			ConfigError::EmptySecret
		);
		assert_eq!(
			SignerConfig::builder()
				.secret_from_env("FOREVERVM_BRIDGE_CONFIG_TEST_UNSET")
				.build()
				.unwrap_err(),
			ConfigError::EmptySecret
		);
	}

	#[test]
	fn allow_policy_accepts_empty_secret() {
		let config = SignerConfig::builder()
			.empty_secret(EmptySecretPolicy::Allow)
			.build()
			.expect("Allow policy should accept an empty secret.");

		assert!(config.secret().is_empty());
	}

	#[test]
	fn env_lookup_outcomes_map_to_secrets() {
		let present = resolve_secret("SECRET".into(), |name| {
			assert_eq!(name, "SECRET");

			Ok("from-env".into())
		})
		.expect("Present variable should resolve.");

		assert_eq!(present.expose(), "from-env");

		let missing = resolve_secret("SECRET".into(), |_| Err(VarError::NotPresent))
			.expect("Missing variable should resolve to an empty secret.");

		assert!(missing.is_empty());
		assert_eq!(
			resolve_secret("SECRET".into(), |_| Err(VarError::NotUnicode("\u{fffd}".into())))
				.unwrap_err(),
			ConfigError::SecretNotUnicode { var: "SECRET".into() }
		);
	}

	#[test]
	fn subject_and_validity_are_validated() {
		let builder = SignerConfig::builder().secret("test-secret");

		assert_eq!(builder.clone().subject("").build().unwrap_err(), ConfigError::EmptySubject);
		assert_eq!(
			builder
				.clone()
				.subject("forever vm ü")
				.build()
				.expect("Any non-empty subject should be accepted.")
				.subject(),
			"forever vm ü"
		);
		assert_eq!(
			builder.validity(Duration::seconds(-1)).build().unwrap_err(),
			ConfigError::NonPositiveValidity { seconds: -1 }
		);
	}
}
