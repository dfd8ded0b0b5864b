//! Async client for a parcel-tracking and shipment API, built around password-grant sessions
//! that re-authenticate lazily and translate failed responses into structured errors.
//!
//! The entry point is [`session::Session`], which owns the credentials and the current bearer
//! [`auth::Token`]. Every call checks the token first, re-authenticates lazily when it is missing
//! or expired, and translates failed responses into [`translate::StructuredError`] values.
//! Inbound webhook callbacks are verified with [`webhook::authenticate`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod query;
pub mod resources;
pub mod session;
pub mod translate;
pub mod webhook;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
