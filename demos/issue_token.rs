//! Issues a REPL bearer token from `FOREVERVM_JWT_SECRET` and prints its decoded claims.

// crates.io
use color_eyre::Result;
// self
use forevervm_bridge::{
	config::SignerConfig,
	token::{TokenSigner, decode_segment},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let signer = TokenSigner::new(SignerConfig::from_env()?);
	let token = signer.issue()?;
	let payload = token.split('.').nth(1).unwrap_or_default();
	let claims = String::from_utf8(decode_segment(payload)?)?;

	println!("token  = {token}");
	println!("claims = {claims}");

	Ok(())
}
