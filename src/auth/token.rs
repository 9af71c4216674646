//! Cached access token record and its validity rule.

// self
use crate::{_prelude::*, AccessToken};

/// Access token held in a [`TokenManager`](crate::auth::TokenManager) cache slot.
#[derive(Clone)]
pub struct CachedToken {
	/// Bearer token presented on carrier calls; callers must avoid logging it.
	pub access_token: AccessToken,
	/// Instant the token endpoint answered.
	pub issued_at: OffsetDateTime,
	/// Absolute expiry derived from `issued_at + expires_in`.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates a record that expires `expires_in` after `issued_at`.
	///
	/// An `expires_in` that overflows the calendar yields an already-expired record.
	pub fn new(access_token: AccessToken, issued_at: OffsetDateTime, expires_in: Duration) -> Self {
		let expires_at = issued_at.checked_add(expires_in).unwrap_or(issued_at);

		Self { access_token, issued_at, expires_at }
	}

	/// Returns `true` while `instant` is earlier than `expires_at - buffer`.
	pub fn is_valid_at(&self, instant: OffsetDateTime, buffer: Duration) -> bool {
		self.expires_at.checked_sub(buffer).is_some_and(|deadline| instant < deadline)
	}

	/// Time left before the hard expiry, negative once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn token(expires_in: Duration) -> CachedToken {
		CachedToken::new(
			AccessToken::new("token-abc".into()),
			macros::datetime!(2025-11-10 12:00 UTC),
			expires_in,
		)
	}

	#[test]
	fn validity_honours_the_refresh_buffer() {
		let record = token(Duration::hours(1));
		let buffer = Duration::seconds(60);
		let issued = record.issued_at;

		assert!(record.is_valid_at(issued, buffer));
		assert!(record.is_valid_at(issued + Duration::seconds(3539), buffer));
		assert!(!record.is_valid_at(issued + Duration::seconds(3540), buffer));
		assert!(!record.is_valid_at(issued + Duration::hours(2), buffer));
		assert_eq!(record.remaining_at(issued + Duration::minutes(59)), Duration::minutes(1));
	}

	#[test]
	fn zero_lifetime_is_never_valid() {
		let record = token(Duration::ZERO);

		assert!(!record.is_valid_at(record.issued_at, Duration::seconds(60)));
		assert!(!record.is_valid_at(record.issued_at, Duration::ZERO));
	}

	#[test]
	fn overflowing_lifetime_is_treated_as_expired() {
		let record = token(Duration::MAX);

		assert_eq!(record.expires_at, record.issued_at);
	}

	#[test]
	fn debug_output_redacts_the_token() {
		assert!(!format!("{:?}", token(Duration::hours(1))).contains("token-abc"));
	}
}
