#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use forevervm_bridge::{
	_preludet::*,
	ext::{BearerSigner, RequestSignerExt},
	reqwest::{Client, header::AUTHORIZATION},
	token::TokenSigner,
};

fn bearer_signer() -> (BearerSigner, TokenSigner) {
	let signer = TokenSigner::new(test_signer_config());

	(BearerSigner::new(signer.clone()), signer)
}

#[test]
fn attached_header_carries_a_fresh_verifiable_token() {
	let (bearer, signer) = bearer_signer();
	let client = Client::new();
	let first = bearer
		.attach_token(client.get("http://localhost/v1/whoami"))
		.expect("Token should attach.")
		.build()
		.expect("Request should build.");
	let second = bearer
		.attach_token(client.get("http://localhost/v1/whoami"))
		.expect("Token should attach.")
		.build()
		.expect("Request should build.");
	let header = |request: &forevervm_bridge::reqwest::Request| {
		request
			.headers()
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned)
			.expect("Authorization header should be present.")
	};
	let first_header = header(&first);
	let token = first_header.strip_prefix("Bearer ").expect("Header should use the Bearer scheme.");

	signer.verify_at(token, OffsetDateTime::now_utc()).expect("Attached token should verify.");

	assert_ne!(first_header, header(&second), "Each request should carry its own token.");
}

#[tokio::test]
async fn signed_request_reaches_the_service() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/whoami").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body("{\"ok\":true}");
		})
		.await;
	let (bearer, _) = bearer_signer();
	let response = bearer
		.attach_token(Client::new().get(server.url("/v1/whoami")))
		.expect("Token should attach.")
		.send()
		.await
		.expect("Request should reach the mock server.");

	assert_eq!(response.status().as_u16(), 200);

	mock.assert_async().await;
}
