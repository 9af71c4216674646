//! OAuth client-credentials token manager with a single in-memory cache slot.
//!
//! [`TokenManager::get_token`] returns the cached token while it is valid (expiry minus a refresh
//! buffer) and otherwise performs exactly one refresh against the token endpoint. The slot is only
//! locked for the validity check and the final write, never across the refresh itself, so two
//! concurrent callers that both observe an expired token may both refresh; the last write wins.
//! Failed refreshes propagate immediately and leave the slot untouched.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	AccessToken, ClientId, ClientSecret,
	auth::CachedToken,
	carrier::CarrierId,
	error::HttpStatusError,
	http::{HttpClient, HttpRequest, HttpResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Tokens are treated as expired this long before their real expiry.
pub const DEFAULT_REFRESH_BUFFER: Duration = Duration::seconds(60);
/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: Duration = Duration::seconds(3_600);

/// Owns the client-credentials exchange and the cache slot for one carrier account.
pub struct TokenManager<C>
where
	C: ?Sized + HttpClient,
{
	http_client: Arc<C>,
	carrier: CarrierId,
	auth_url: Url,
	client_id: Option<ClientId>,
	client_secret: Option<ClientSecret>,
	refresh_buffer: Duration,
	cache: Mutex<Option<CachedToken>>,
}
impl<C> TokenManager<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a token manager without credentials; attach them with
	/// [`TokenManager::with_credentials`] or the single-field helpers.
	pub fn new(carrier: CarrierId, auth_url: Url, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			carrier,
			auth_url,
			client_id: None,
			client_secret: None,
			refresh_buffer: DEFAULT_REFRESH_BUFFER,
			cache: Mutex::new(None),
		}
	}

	/// Replaces both credentials at once.
	pub fn with_credentials(
		mut self,
		client_id: Option<ClientId>,
		client_secret: Option<ClientSecret>,
	) -> Self {
		self.client_id = client_id;
		self.client_secret = client_secret;

		self
	}

	/// Sets or replaces the client identifier.
	pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(ClientId::new(client_id.into()));

		self
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(ClientSecret::new(secret.into()));

		self
	}

	/// Overrides the refresh buffer (defaults to 60 seconds); negative values clamp to zero.
	pub fn with_refresh_buffer(mut self, buffer: Duration) -> Self {
		self.refresh_buffer = if buffer.is_negative() { Duration::ZERO } else { buffer };

		self
	}

	/// Carrier the managed credentials belong to.
	pub fn carrier(&self) -> &CarrierId {
		&self.carrier
	}

	/// Token endpoint used for refreshes.
	pub fn auth_url(&self) -> &Url {
		&self.auth_url
	}

	/// Snapshot of the cache slot, valid or not.
	pub fn cached_token(&self) -> Option<CachedToken> {
		self.cache.lock().clone()
	}

	/// Empties the cache slot so the next [`TokenManager::get_token`] refreshes.
	pub fn invalidate(&self) {
		*self.cache.lock() = None;
	}

	/// Returns the cached token while valid, otherwise refreshes it.
	pub async fn get_token(&self) -> Result<AccessToken> {
		let now = OffsetDateTime::now_utc();
		let cached = self
			.cache
			.lock()
			.as_ref()
			.filter(|token| token.is_valid_at(now, self.refresh_buffer))
			.map(|token| token.access_token.clone());

		if let Some(token) = cached {
			return Ok(token);
		}

		let fresh = self.refresh().await?;
		let token = fresh.access_token.clone();

		*self.cache.lock() = Some(fresh);

		Ok(token)
	}

	async fn refresh(&self) -> Result<CachedToken> {
		const KIND: CallKind = CallKind::TokenRefresh;

		let span = CallSpan::new(KIND, &self.carrier);

		obs::record_call_outcome(KIND, &self.carrier, CallOutcome::Attempt);

		let result = span.instrument(self.request_token()).await;

		obs::record_call_outcome(KIND, &self.carrier, CallOutcome::of(&result));

		result
	}

	async fn request_token(&self) -> Result<CachedToken> {
		let request = self.build_request()?;
		let response = self.http_client.post(request).await.map_err(|e| {
			self.tag(Error::network(format!("Failed to request a {} access token.", self.carrier)))
				.with_source(e)
		})?;
		let issued_at = OffsetDateTime::now_utc();
		let data = self.classify(response)?;
		let parsed: TokenResponse = serde_path_to_error::deserialize(data).map_err(|e| {
			self.tag(Error::invalid_response(format!(
				"The {} token response is missing a string access_token.",
				self.carrier
			)))
			.with_source(e)
		})?;
		let expires_in =
			parsed.expires_in.and_then(|value| value.as_duration()).unwrap_or(DEFAULT_EXPIRES_IN);

		Ok(CachedToken::new(AccessToken::new(parsed.access_token), issued_at, expires_in))
	}

	fn build_request(&self) -> Result<HttpRequest> {
		let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
			let missing = if self.client_id.is_none() { "client id" } else { "client secret" };

			return Err(self.tag(Error::authentication(format!(
				"Missing {} OAuth {missing}.",
				self.carrier
			))));
		};
		let credentials =
			STANDARD.encode(format!("{}:{}", client_id.as_str(), client_secret.secret()));
		let body = form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "client_credentials")
			.finish();

		Ok(HttpRequest::form(self.auth_url.clone(), body)
			.with_header("Authorization", format!("Basic {credentials}")))
	}

	fn classify(&self, response: HttpResponse) -> Result<Value> {
		let HttpResponse { status, data, retry_after } = response;
		let err = match status {
			401 => Error::authentication(format!(
				"The {} token endpoint rejected the client credentials.",
				self.carrier
			)),
			429 => Error::rate_limit(
				format!("The {} token endpoint is rate limiting requests.", self.carrier),
				retry_after,
			),
			status if status >= 400 => Error::authentication(format!(
				"The {} token request failed with status {status}.",
				self.carrier
			)),
			_ => return Ok(data),
		};

		Err(self.tag(err).with_source(HttpStatusError::new(status, data)))
	}

	fn tag(&self, err: Error) -> Error {
		err.with_carrier(self.carrier.clone())
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("carrier", &self.carrier)
			.field("auth_url", &self.auth_url.as_str())
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("refresh_buffer", &self.refresh_buffer)
			.field("cache", &*self.cache.lock())
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default)]
	expires_in: Option<ExpiresIn>,
}

/// `expires_in` as sent on the wire; some carriers send numeric strings.
///
/// Any other JSON type is kept as [`ExpiresIn::Other`] and treated like an absent value.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
	Seconds(i64),
	Fractional(f64),
	Text(String),
	Other(Value),
}
impl ExpiresIn {
	fn as_duration(&self) -> Option<Duration> {
		match self {
			Self::Seconds(secs) => Some(Duration::seconds(*secs)),
			Self::Fractional(secs) => secs.is_finite().then(|| Duration::seconds(*secs as i64)),
			Self::Text(raw) => raw.trim().parse::<i64>().ok().map(Duration::seconds),
			Self::Other(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn expires_in(raw: &str) -> Option<Duration> {
		serde_json::from_str::<ExpiresIn>(raw).ok().and_then(|value| value.as_duration())
	}

	#[test]
	fn expires_in_accepts_numbers_and_numeric_strings() {
		assert_eq!(expires_in("3600"), Some(Duration::hours(1)));
		assert_eq!(expires_in("14399.5"), Some(Duration::seconds(14_399)));
		assert_eq!(expires_in("\"14399\""), Some(Duration::seconds(14_399)));
		assert_eq!(expires_in("\"soon\""), None);
		assert_eq!(expires_in("true"), None);
		assert_eq!(expires_in("{}"), None);
	}

	#[test]
	fn token_response_requires_a_string_access_token() {
		let ok: Result<TokenResponse, _> =
			serde_json::from_str(r#"{"access_token":"abc","token_type":"Bearer"}"#);
		let numeric: Result<TokenResponse, _> = serde_json::from_str(r#"{"access_token":42}"#);
		let missing: Result<TokenResponse, _> = serde_json::from_str(r#"{"expires_in":60}"#);

		let odd_lifetime: Result<TokenResponse, _> =
			serde_json::from_str(r#"{"access_token":"abc","expires_in":true}"#);

		assert!(ok.is_ok_and(|parsed| parsed.expires_in.is_none()));
		assert!(odd_lifetime.is_ok_and(|parsed| {
			parsed.expires_in.and_then(|value| value.as_duration()).is_none()
		}));
		assert!(numeric.is_err());
		assert!(missing.is_err());
	}
}
