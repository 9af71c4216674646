//! Carrier-level error taxonomy shared by the token manager, mappers, and carrier adapters.
//!
//! Every failure surfaced by a carrier call is exactly one [`Error`] variant. The variant is the
//! error *kind* ([`ErrorKind`]); each one carries the originating carrier, a human-readable
//! message, and the underlying cause when one exists.

// self
use crate::{_prelude::*, carrier::CarrierId};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed, thread-safe error used as the cause of an [`Error`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Discriminant of an [`Error`], useful for retry policies and metrics labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Credentials were rejected or are missing.
	Authentication,
	/// The carrier signalled throttling.
	RateLimit,
	/// Transport failure or a non-specific HTTP error status.
	Network,
	/// The carrier response failed structural validation.
	InvalidResponse,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Authentication => "authentication",
			ErrorKind::RateLimit => "rate_limit",
			ErrorKind::Network => "network",
			ErrorKind::InvalidResponse => "invalid_response",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical carrier error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential rejection or missing credentials.
	#[error("{message}")]
	Authentication {
		/// Carrier that produced the failure.
		carrier: Option<CarrierId>,
		/// Human-readable summary.
		message: String,
		/// Underlying cause, when available.
		#[source]
		source: Option<BoxError>,
	},
	/// Carrier signalled throttling.
	#[error("{message}")]
	RateLimit {
		/// Carrier that produced the failure.
		carrier: Option<CarrierId>,
		/// Human-readable summary.
		message: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
		/// Underlying cause, when available.
		#[source]
		source: Option<BoxError>,
	},
	/// Transport failure or any non-specific HTTP error status.
	#[error("{message}")]
	Network {
		/// Carrier that produced the failure.
		carrier: Option<CarrierId>,
		/// Human-readable summary.
		message: String,
		/// Underlying cause, when available.
		#[source]
		source: Option<BoxError>,
	},
	/// Response failed structural validation or lacks required top-level fields.
	#[error("{message}")]
	InvalidResponse {
		/// Carrier that produced the failure.
		carrier: Option<CarrierId>,
		/// Human-readable summary.
		message: String,
		/// Underlying cause, when available.
		#[source]
		source: Option<BoxError>,
	},
}
impl Error {
	/// Creates an [`Error::Authentication`] with the provided message.
	pub fn authentication(message: impl Into<String>) -> Self {
		Self::Authentication { carrier: None, message: message.into(), source: None }
	}

	/// Creates an [`Error::RateLimit`] with the provided message and retry hint.
	pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
		Self::RateLimit { carrier: None, message: message.into(), retry_after, source: None }
	}

	/// Creates an [`Error::Network`] with the provided message.
	pub fn network(message: impl Into<String>) -> Self {
		Self::Network { carrier: None, message: message.into(), source: None }
	}

	/// Creates an [`Error::InvalidResponse`] with the provided message.
	pub fn invalid_response(message: impl Into<String>) -> Self {
		Self::InvalidResponse { carrier: None, message: message.into(), source: None }
	}

	/// Tags the error with the carrier that produced it.
	pub fn with_carrier(mut self, id: CarrierId) -> Self {
		*self.carrier_slot() = Some(id);

		self
	}

	/// Attaches the underlying cause.
	pub fn with_source(mut self, src: impl Into<BoxError>) -> Self {
		*self.source_slot() = Some(src.into());

		self
	}

	/// Returns the error kind.
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::Authentication { .. } => ErrorKind::Authentication,
			Self::RateLimit { .. } => ErrorKind::RateLimit,
			Self::Network { .. } => ErrorKind::Network,
			Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
		}
	}

	/// Returns the carrier that produced the error, if tagged.
	pub fn carrier(&self) -> Option<&CarrierId> {
		match self {
			Self::Authentication { carrier, .. }
			| Self::RateLimit { carrier, .. }
			| Self::Network { carrier, .. }
			| Self::InvalidResponse { carrier, .. } => carrier.as_ref(),
		}
	}

	/// Returns the human-readable message.
	pub fn message(&self) -> &str {
		match self {
			Self::Authentication { message, .. }
			| Self::RateLimit { message, .. }
			| Self::Network { message, .. }
			| Self::InvalidResponse { message, .. } => message,
		}
	}

	/// Returns the Retry-After hint carried by [`Error::RateLimit`].
	pub fn retry_after(&self) -> Option<Duration> {
		match self {
			Self::RateLimit { retry_after, .. } => *retry_after,
			_ => None,
		}
	}

	/// Returns the HTTP status that triggered the error, when the cause is an [`HttpStatusError`].
	pub fn http_status(&self) -> Option<u16> {
		self.source()?.downcast_ref::<HttpStatusError>().map(|err| err.status)
	}

	/// Returns `true` when callers may reasonably retry the call later.
	pub fn is_retryable(&self) -> bool {
		matches!(self.kind(), ErrorKind::RateLimit | ErrorKind::Network)
	}

	fn carrier_slot(&mut self) -> &mut Option<CarrierId> {
		match self {
			Self::Authentication { carrier, .. }
			| Self::RateLimit { carrier, .. }
			| Self::Network { carrier, .. }
			| Self::InvalidResponse { carrier, .. } => carrier,
		}
	}

	fn source_slot(&mut self) -> &mut Option<BoxError> {
		match self {
			Self::Authentication { source, .. }
			| Self::RateLimit { source, .. }
			| Self::Network { source, .. }
			| Self::InvalidResponse { source, .. } => source,
		}
	}
}

/// Cause attached to errors derived from an HTTP status code.
#[derive(Debug, ThisError)]
#[error("Carrier responded with HTTP status {status}.")]
pub struct HttpStatusError {
	/// HTTP status code returned by the carrier.
	pub status: u16,
	/// Decoded response body.
	pub body: Value,
}
impl HttpStatusError {
	/// Captures the status + body of a failed response.
	pub fn new(status: u16, body: Value) -> Self {
		Self { status, body }
	}
}

/// Configuration failures raised while assembling carrier settings.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
