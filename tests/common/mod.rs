//! Shared fixtures for integration tests: a recording stub transport plus UPS payload builders.

#![allow(dead_code, unused_imports)]

// std
pub use std::{
	collections::{HashMap, VecDeque},
	sync::Arc,
};
// crates.io
pub use parking_lot::Mutex;
pub use serde_json::{Value, json};
pub use time::Duration;
pub use url::Url;
// self
pub use carrier_rates::{
	auth::TokenManager,
	carrier::{Carrier, CarrierId, ups::UpsCarrier},
	config::UpsConfig,
	domain::{Address, DimensionUnit, Money, Package, RateQuote, RateRequest, WeightUnit},
	error::{Error, ErrorKind},
	http::{HttpClient, HttpFuture, HttpRequest, HttpResponse},
};

pub const AUTH_URL: &str = "https://auth.ups.test/security/v1/oauth/token";
pub const RATING_URL: &str = "https://rating.ups.test/api/rating/v2409/Shop";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "test-token-abc123";

/// Transport failure raised by [`StubHttpClient`].
#[derive(Debug, thiserror::Error)]
pub enum StubTransportError {
	#[error("Connection refused by the stub transport.")]
	ConnectionRefused,
	#[error("No scripted response for {0}.")]
	Unscripted(String),
}

enum Scripted {
	Respond(HttpResponse),
	Fail,
}

/// Records every POST and replays scripted responses per URL in FIFO order.
#[derive(Default)]
pub struct StubHttpClient {
	routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
	calls: Mutex<Vec<HttpRequest>>,
}
impl StubHttpClient {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Queues a response for the next call to `url`.
	pub fn respond(&self, url: &str, response: HttpResponse) -> &Self {
		self.push(url, Scripted::Respond(response))
	}

	/// Queues a transport failure for the next call to `url`.
	pub fn fail(&self, url: &str) -> &Self {
		self.push(url, Scripted::Fail)
	}

	pub fn calls(&self) -> Vec<HttpRequest> {
		self.calls.lock().clone()
	}

	pub fn calls_to(&self, url: &str) -> Vec<HttpRequest> {
		self.calls.lock().iter().filter(|call| call.url.as_str() == url).cloned().collect()
	}

	fn push(&self, url: &str, scripted: Scripted) -> &Self {
		self.routes.lock().entry(url.to_owned()).or_default().push_back(scripted);

		self
	}
}
impl HttpClient for StubHttpClient {
	type TransportError = StubTransportError;

	fn post(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let url = request.url.to_string();
		let next = self.routes.lock().get_mut(&url).and_then(VecDeque::pop_front);

		self.calls.lock().push(request);

		let outcome = match next {
			Some(Scripted::Respond(response)) => Ok(response),
			Some(Scripted::Fail) => Err(StubTransportError::ConnectionRefused),
			None => Err(StubTransportError::Unscripted(url)),
		};

		// Yield once so concurrent callers interleave at the transport.
		Box::pin(async move {
			tokio::task::yield_now().await;

			outcome
		})
	}
}

pub fn url(raw: &str) -> Url {
	Url::parse(raw).expect("Fixture URL should parse.")
}

pub fn config() -> UpsConfig {
	UpsConfig::builder()
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.auth_url(AUTH_URL)
		.rating_url(RATING_URL)
		.build()
		.expect("Fixture configuration should build.")
}

pub fn ups_carrier(stub: &Arc<StubHttpClient>) -> UpsCarrier<StubHttpClient> {
	UpsCarrier::from_config(Arc::clone(stub), &config())
}

/// Realistic UPS OAuth token response.
pub fn auth_ok(expires_in: i64) -> HttpResponse {
	auth_token(ACCESS_TOKEN, expires_in)
}

/// Token response carrying a specific access token.
pub fn auth_token(access_token: &str, expires_in: i64) -> HttpResponse {
	HttpResponse::new(
		200,
		json!({
			"access_token": access_token,
			"token_type": "Bearer",
			"expires_in": expires_in,
		}),
	)
}

/// Realistic UPS shop response with two services.
pub fn rating_ok() -> HttpResponse {
	HttpResponse::new(
		200,
		json!({
			"RateResponse": {
				"Response": { "ResponseStatus": { "Code": "1", "Description": "Success" } },
				"RatedShipment": [
					{
						"Service": { "Code": "03", "Description": "Ground" },
						"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "24.50" },
						"TimeInTransit": { "BusinessDaysInTransit": "3" },
					},
					{
						"Service": { "Code": "12", "Description": "3 Day Select" },
						"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "38.00" },
						"TimeInTransit": { "BusinessDaysInTransit": "3" },
					},
				],
			},
		}),
	)
}

/// Timonium, MD to Alpharetta, GA with one imperial package.
pub fn rate_request() -> RateRequest {
	RateRequest::new(
		Address::new("123 Origin St", "Timonium", "21093", "US").with_state_or_province("MD"),
		Address::new("456 Dest Ave", "Alpharetta", "30005", "US").with_state_or_province("GA"),
		vec![
			Package::new(2.5, 10., 8., 6.)
				.with_weight_unit(WeightUnit::Lb)
				.with_dimension_unit(DimensionUnit::In),
		],
	)
	.expect("Fixture rate request should be valid.")
}
