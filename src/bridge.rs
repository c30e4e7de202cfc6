//! Access to the bridge resources.
use crate::error::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder};
use std::time::Duration;

/// The transport a [`Light`](crate::Light) uses to reach its bridge.
///
/// Paths are absolute on the bridge, e.g. `/api/<username>/lights/1`.
/// Each call returns the raw response body.
pub trait Bridge: Send + Sync {
	/// The whitelisted user every resource path is prefixed with.
	fn username(&self) -> &str;
	fn get(&self, path: &str) -> Result<String>;
	fn put(&self, path: &str, body: &serde_json::Value) -> Result<String>;
	fn delete(&self, path: &str) -> Result<String>;
}

/// A bridge reached over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpBridge {
	base_url: String,
	username: String,
	client: Client,
}

impl HttpBridge {
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

	/// `host` may be a bare address or carry its own scheme.
	pub fn new(host: impl Into<String>, username: impl Into<String>) -> Result<Self> {
		Self::with_timeout(host, username, Self::DEFAULT_TIMEOUT)
	}

	pub fn with_timeout(
		host: impl Into<String>,
		username: impl Into<String>,
		timeout: Duration,
	) -> Result<Self> {
		let host = host.into();
		let host = host.trim_end_matches('/');
		let base_url = if host.starts_with("http://") || host.starts_with("https://") {
			host.to_string()
		} else {
			format!("http://{}", host)
		};
		let client = Client::builder().timeout(timeout).build()?;
		Ok(HttpBridge {
			base_url,
			username: username.into(),
			client,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<String> {
		tracing::debug!(method, path, "bridge request");
		let response = request.send()?;
		let status = response.status();
		if !status.is_success() {
			return Err(Error::Status(status.as_u16()));
		}
		let body = response.text()?;
		tracing::trace!(body = %body, "bridge response");
		Ok(body)
	}
}

impl Bridge for HttpBridge {
	fn username(&self) -> &str {
		&self.username
	}

	fn get(&self, path: &str) -> Result<String> {
		self.send("GET", path, self.client.get(self.url(path)))
	}

	fn put(&self, path: &str, body: &serde_json::Value) -> Result<String> {
		self.send("PUT", path, self.client.put(self.url(path)).json(body))
	}

	fn delete(&self, path: &str) -> Result<String> {
		self.send("DELETE", path, self.client.delete(self.url(path)))
	}
}
