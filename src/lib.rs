//! Carrier-agnostic shipping rate quotes: OAuth-managed carrier adapters, tolerant response
//! normalization, and a typed error taxonomy, with UPS as the reference carrier.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod carrier;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod obs;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2::{AccessToken, ClientId, ClientSecret};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
