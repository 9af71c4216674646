//! Transport primitives for carrier calls.
//!
//! The module exposes [`HttpClient`], the crate's only dependency on an HTTP stack, alongside the
//! transport-neutral [`HttpRequest`] and [`HttpResponse`] values. Implementations resolve with a
//! response for every HTTP status and reserve errors for transport failures (DNS, TCP, TLS,
//! timeouts); status classification happens in the carrier adapters.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::_prelude::*;

/// Boxed future returned by [`HttpClient::post`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing carrier POST requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared (behind
/// `Arc`) by a token manager and the carrier adapters that consume it. The returned futures must be
/// `Send` so carrier futures can hop executors.
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends a POST request and resolves with the status + decoded body.
	fn post(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Request body variants understood by carrier endpoints.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
	/// JSON document, serialized by the transport.
	Json(Value),
	/// Pre-encoded `application/x-www-form-urlencoded` body.
	Form(String),
}

/// Transport-neutral POST request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
	/// Target endpoint.
	pub url: Url,
	/// Request headers keyed by their canonical name.
	pub headers: BTreeMap<String, String>,
	/// Request body.
	pub body: RequestBody,
}
impl HttpRequest {
	/// Creates a JSON POST request.
	pub fn json(url: Url, body: Value) -> Self {
		Self { url, headers: BTreeMap::new(), body: RequestBody::Json(body) }
			.with_header("Content-Type", "application/json")
	}

	/// Creates a form-urlencoded POST request.
	pub fn form(url: Url, body: impl Into<String>) -> Self {
		Self { url, headers: BTreeMap::new(), body: RequestBody::Form(body.into()) }
			.with_header("Content-Type", "application/x-www-form-urlencoded")
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Looks up a header value using a case-insensitive name match.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Returns the JSON body, if this is a JSON request.
	pub fn json_body(&self) -> Option<&Value> {
		match &self.body {
			RequestBody::Json(value) => Some(value),
			RequestBody::Form(_) => None,
		}
	}

	/// Returns the encoded form body, if this is a form request.
	pub fn form_body(&self) -> Option<&str> {
		match &self.body {
			RequestBody::Form(form) => Some(form),
			RequestBody::Json(_) => None,
		}
	}
}

/// Response returned by an [`HttpClient`] for any HTTP status.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Decoded body; see [`decode_body`] for the decoding rules.
	pub data: Value,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl HttpResponse {
	/// Creates a response without a Retry-After hint.
	pub fn new(status: u16, data: Value) -> Self {
		Self { status, data, retry_after: None }
	}

	/// Attaches a Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
		self.retry_after = Some(retry_after);

		self
	}

	/// Returns `true` for 4xx and 5xx statuses.
	pub fn is_error(&self) -> bool {
		self.status >= 400
	}
}

/// Decodes a raw response body.
///
/// Empty bodies become [`Value::Null`], valid JSON is parsed, and anything else is kept verbatim as
/// a [`Value::String`] so downstream validation can reject it with context.
pub fn decode_body(bytes: &[u8]) -> Value {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Value::Null;
	}

	serde_json::from_slice(bytes)
		.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let HttpRequest { url, headers, body } = request;
			let mut builder = client.post(url);

			for (name, value) in &headers {
				builder = builder.header(name.as_str(), value.as_str());
			}

			let builder = match body {
				RequestBody::Json(value) => builder.body(value.to_string()),
				RequestBody::Form(form) => builder.body(form),
			};
			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let bytes = response.bytes().await?;

			Ok(HttpResponse { status, data: decode_body(&bytes), retry_after })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://rating.test/api/rating/v2409/Shop").expect("Test URL should parse.")
	}

	#[test]
	fn decode_body_handles_empty_json_and_text() {
		assert_eq!(decode_body(b""), Value::Null);
		assert_eq!(decode_body(b"  \n"), Value::Null);
		assert_eq!(decode_body(br#"{"ok":true}"#), serde_json::json!({ "ok": true }));
		assert_eq!(decode_body(b"<html>oops</html>"), Value::String("<html>oops</html>".into()));
	}

	#[test]
	fn request_constructors_set_content_type() {
		let json = HttpRequest::json(url(), Value::Null).with_header("Authorization", "Bearer t");
		let form = HttpRequest::form(url(), "grant_type=client_credentials");

		assert_eq!(json.header("content-type"), Some("application/json"));
		assert_eq!(json.header("AUTHORIZATION"), Some("Bearer t"));
		assert_eq!(json.json_body(), Some(&Value::Null));
		assert_eq!(json.form_body(), None);
		assert_eq!(form.header("Content-Type"), Some("application/x-www-form-urlencoded"));
		assert_eq!(form.form_body(), Some("grant_type=client_credentials"));
	}

	#[test]
	fn error_statuses_start_at_400() {
		assert!(!HttpResponse::new(200, Value::Null).is_error());
		assert!(!HttpResponse::new(399, Value::Null).is_error());
		assert!(HttpResponse::new(400, Value::Null).is_error());
		assert!(HttpResponse::new(503, Value::Null).is_error());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn retry_after_accepts_delta_seconds_and_dates() {
		let mut headers = HeaderMap::new();

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, "120".parse().expect("Header value should parse."));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(120)));

		headers.insert(
			RETRY_AFTER,
			"Wed, 21 Oct 2015 07:28:00 GMT".parse().expect("Header value should parse."),
		);

		assert_eq!(parse_retry_after(&headers), None);
	}
}
