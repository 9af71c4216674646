//! UPS carrier façade: token acquisition, the rating call, and HTTP status classification.

// self
use crate::{
	_prelude::*,
	auth::TokenManager,
	carrier::{
		Carrier, CarrierFuture, CarrierId,
		ups::{map_rate_request, parse_rate_response},
	},
	config::UpsConfig,
	domain::{RateQuote, RateRequest},
	error::HttpStatusError,
	http::{HttpClient, HttpRequest, HttpResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// UPS implementation of [`Carrier`].
///
/// The adapter shares one transport with its [`TokenManager`], so a single stub or connection
/// pool observes both the token exchange and the rating call.
pub struct UpsCarrier<C>
where
	C: ?Sized + HttpClient,
{
	id: CarrierId,
	http_client: Arc<C>,
	token_manager: Arc<TokenManager<C>>,
	rating_url: Url,
}
impl<C> UpsCarrier<C>
where
	C: ?Sized + HttpClient,
{
	/// Wires an adapter from an existing token manager.
	pub fn new(
		http_client: impl Into<Arc<C>>,
		token_manager: impl Into<Arc<TokenManager<C>>>,
		rating_url: Url,
	) -> Self {
		Self {
			id: CarrierId::UPS,
			http_client: http_client.into(),
			token_manager: token_manager.into(),
			rating_url,
		}
	}

	/// Builds the adapter and its token manager from resolved configuration.
	pub fn from_config(http_client: impl Into<Arc<C>>, config: &UpsConfig) -> Self {
		let http_client = http_client.into();
		let token_manager = TokenManager::<C>::new(
			CarrierId::UPS,
			config.auth_url.clone(),
			Arc::clone(&http_client),
		)
		.with_credentials(config.client_id.clone(), config.client_secret.clone());

		Self::new(http_client, token_manager, config.rating_url.clone())
	}

	/// Token manager backing this adapter.
	pub fn token_manager(&self) -> &Arc<TokenManager<C>> {
		&self.token_manager
	}

	/// Rating endpoint used by [`UpsCarrier::get_rates`].
	pub fn rating_url(&self) -> &Url {
		&self.rating_url
	}

	/// Fetches every available UPS service quote for `request`.
	///
	/// The request is expected to be validated by the caller. Quotes keep the order UPS returned
	/// them in; an empty list means UPS offered no valid service.
	pub async fn get_rates(&self, request: &RateRequest) -> Result<Vec<RateQuote>> {
		const KIND: CallKind = CallKind::Rating;

		let span = CallSpan::new(KIND, &self.id);

		obs::record_call_outcome(KIND, &self.id, CallOutcome::Attempt);

		let result = span.instrument(self.request_rates(request)).await;

		obs::record_call_outcome(KIND, &self.id, CallOutcome::of(&result));

		result
	}

	async fn request_rates(&self, request: &RateRequest) -> Result<Vec<RateQuote>> {
		let token = self.token_manager.get_token().await?;
		let payload = serde_json::to_value(map_rate_request(request)).map_err(|e| {
			self.tag(Error::network("Failed to encode the UPS rate request.")).with_source(e)
		})?;
		let http_request = HttpRequest::json(self.rating_url.clone(), payload)
			.with_header("Authorization", format!("Bearer {}", token.secret()));
		let response = self.http_client.post(http_request).await.map_err(|e| {
			self.tag(Error::network("Failed to reach the UPS rating endpoint.")).with_source(e)
		})?;
		let data = self.classify(response)?;

		parse_rate_response(data).map_err(|e| match e {
			Error::InvalidResponse { .. } => e.with_carrier(self.id.clone()),
			other => self
				.tag(Error::invalid_response("Failed to parse the UPS rate response."))
				.with_source(other),
		})
	}

	fn classify(&self, response: HttpResponse) -> Result<Value> {
		let HttpResponse { status, data, retry_after } = response;
		let err = match status {
			401 => Error::authentication("UPS rejected the access token for the rating request."),
			429 => Error::rate_limit("UPS is rate limiting rating requests.", retry_after),
			status if status >= 400 =>
				Error::network(format!("UPS rating request failed with status {status}.")),
			_ => return Ok(data),
		};

		Err(self.tag(err).with_source(HttpStatusError::new(status, data)))
	}

	fn tag(&self, err: Error) -> Error {
		err.with_carrier(self.id.clone())
	}
}
impl<C> Carrier for UpsCarrier<C>
where
	C: ?Sized + HttpClient,
{
	fn id(&self) -> &CarrierId {
		&self.id
	}

	fn get_rates<'a>(&'a self, request: &'a RateRequest) -> CarrierFuture<'a> {
		Box::pin(UpsCarrier::get_rates(self, request))
	}
}
impl<C> Debug for UpsCarrier<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UpsCarrier")
			.field("id", &self.id)
			.field("rating_url", &self.rating_url.as_str())
			.field("token_manager", &self.token_manager)
			.finish()
	}
}
