//! Explicit carrier configuration plus the environment adapter used at process boundaries.
//!
//! Constructors never read the process environment. Binaries call
//! [`UpsConfigBuilder::fill_from_env`] (or [`UpsConfigBuilder::fill_from_lookup`] in tests) to
//! populate whatever the caller left unset; explicitly configured values always win.

// self
use crate::{_prelude::*, ClientId, ClientSecret, error::ConfigError};

/// Environment variable holding the UPS OAuth client identifier.
pub const ENV_UPS_CLIENT_ID: &str = "UPS_CLIENT_ID";
/// Environment variable holding the UPS OAuth client secret.
pub const ENV_UPS_CLIENT_SECRET: &str = "UPS_CLIENT_SECRET";
/// Environment variable overriding the UPS OAuth token endpoint.
pub const ENV_UPS_AUTH_URL: &str = "UPS_AUTH_URL";
/// Environment variable overriding the UPS rating endpoint.
pub const ENV_UPS_RATING_URL: &str = "UPS_RATING_URL";

/// Default UPS OAuth client-credentials token endpoint.
pub const DEFAULT_UPS_AUTH_URL: &str = "https://onboarding.ups.com/security/v1/oauth/token";
/// Default UPS rating endpoint (shop mode returns every available service).
pub const DEFAULT_UPS_RATING_URL: &str = "https://onlinetools.ups.com/api/rating/v2409/Shop";

/// Resolved UPS adapter settings.
///
/// Credentials stay optional here: a missing client id or secret surfaces as an authentication
/// error the first time a token is requested, not while wiring the adapter.
#[derive(Clone, Debug)]
pub struct UpsConfig {
	/// OAuth client identifier.
	pub client_id: Option<ClientId>,
	/// OAuth client secret.
	pub client_secret: Option<ClientSecret>,
	/// OAuth token endpoint.
	pub auth_url: Url,
	/// Rating endpoint.
	pub rating_url: Url,
}
impl UpsConfig {
	/// Creates a new builder with nothing configured.
	pub fn builder() -> UpsConfigBuilder {
		UpsConfigBuilder::default()
	}

	/// Builds a configuration entirely from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::builder().fill_from_env().build()
	}
}

/// Builder for [`UpsConfig`] values.
#[derive(Clone, Default)]
pub struct UpsConfigBuilder {
	/// OAuth client identifier.
	pub client_id: Option<String>,
	/// OAuth client secret.
	pub client_secret: Option<String>,
	/// Token endpoint override.
	pub auth_url: Option<String>,
	/// Rating endpoint override.
	pub rating_url: Option<String>,
}
impl UpsConfigBuilder {
	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Overrides the OAuth token endpoint.
	pub fn auth_url(mut self, value: impl Into<String>) -> Self {
		self.auth_url = Some(value.into());

		self
	}

	/// Overrides the rating endpoint.
	pub fn rating_url(mut self, value: impl Into<String>) -> Self {
		self.rating_url = Some(value.into());

		self
	}

	/// Fills unset fields from the process environment.
	pub fn fill_from_env(self) -> Self {
		self.fill_from_lookup(|name| std::env::var(name).ok())
	}

	/// Fills unset fields using `lookup`; empty values are treated as absent.
	pub fn fill_from_lookup<F>(mut self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

		self.client_id = self.client_id.or_else(|| read(ENV_UPS_CLIENT_ID));
		self.client_secret = self.client_secret.or_else(|| read(ENV_UPS_CLIENT_SECRET));
		self.auth_url = self.auth_url.or_else(|| read(ENV_UPS_AUTH_URL));
		self.rating_url = self.rating_url.or_else(|| read(ENV_UPS_RATING_URL));

		self
	}

	/// Consumes the builder, applying endpoint defaults and validating URLs.
	pub fn build(self) -> Result<UpsConfig, ConfigError> {
		let auth_url = parse_endpoint("auth", self.auth_url.as_deref(), DEFAULT_UPS_AUTH_URL)?;
		let rating_url =
			parse_endpoint("rating", self.rating_url.as_deref(), DEFAULT_UPS_RATING_URL)?;

		Ok(UpsConfig {
			client_id: self.client_id.map(ClientId::new),
			client_secret: self.client_secret.map(ClientSecret::new),
			auth_url,
			rating_url,
		})
	}
}
impl Debug for UpsConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UpsConfigBuilder")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("auth_url", &self.auth_url)
			.field("rating_url", &self.rating_url)
			.finish()
	}
}

fn parse_endpoint(
	endpoint: &'static str,
	value: Option<&str>,
	default: &str,
) -> Result<Url, ConfigError> {
	Url::parse(value.unwrap_or(default))
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
