//! Credentials, timeout and endpoint settings shared by every request.

use std::{env, time::Duration};

use crate::error::FcmError;

/// Default time a single request may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_SEND_MESSAGE: &str = "https://fcm.googleapis.com/fcm/send";
pub const API_APP_INSTANCE: &str = "https://iid.googleapis.com/iid/info";
pub const API_USER_LOOKUP: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";
pub const API_TOPIC_BATCH_ADD: &str = "https://iid.googleapis.com/iid/v1:batchAdd";
pub const API_TOPIC_BATCH_REMOVE: &str = "https://iid.googleapis.com/iid/v1:batchRemove";

/// Base URLs of the remote services. The defaults point to Google, tests
/// and proxies can point them elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub send_message: String,
    /// Prefix of the app-instance info call, the token is appended as a path
    /// segment.
    pub app_instance: String,
    /// The API key is appended as the `key` query parameter.
    pub user_lookup: String,
    pub topic_batch_add: String,
    pub topic_batch_remove: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            send_message: API_SEND_MESSAGE.into(),
            app_instance: API_APP_INSTANCE.into(),
            user_lookup: API_USER_LOOKUP.into(),
            topic_batch_add: API_TOPIC_BATCH_ADD.into(),
            topic_batch_remove: API_TOPIC_BATCH_REMOVE.into(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint to the same host, keeping the Google paths.
    ///
    /// ```
    /// # use fcm_client::Endpoints;
    /// let endpoints = Endpoints::with_base_url("http://localhost:8080");
    /// assert_eq!("http://localhost:8080/fcm/send", endpoints.send_message);
    /// ```
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');

        Self {
            send_message: format!("{}/fcm/send", base),
            app_instance: format!("{}/iid/info", base),
            user_lookup: format!("{}/v1/accounts:lookup", base),
            topic_batch_add: format!("{}/iid/v1:batchAdd", base),
            topic_batch_remove: format!("{}/iid/v1:batchRemove", base),
        }
    }
}

/// Everything a client needs to talk to the services. Cannot be changed
/// after it has been built.
#[derive(Clone, PartialEq, Eq)]
pub struct FcmConfig {
    api_key: String,
    server_key: String,
    timeout: Duration,
    endpoints: Endpoints,
}

impl std::fmt::Debug for FcmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FcmConfig")
            .field("timeout", &self.timeout)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl FcmConfig {
    /// Creates a configuration with the default timeout and endpoints.
    ///
    /// The `api_key` is the project's web API key, the `server_key` comes
    /// from Firebase console > Project Settings > Cloud Messaging.
    pub fn new<S>(api_key: S, server_key: S) -> Result<Self, FcmError>
    where
        S: Into<String>,
    {
        Self::builder(api_key, server_key).build()
    }

    pub fn builder<S>(api_key: S, server_key: S) -> FcmConfigBuilder
    where
        S: Into<String>,
    {
        FcmConfigBuilder {
            api_key: api_key.into(),
            server_key: server_key.into(),
            timeout: None,
            endpoints: None,
        }
    }

    /// Reads `FCM_API_KEY`, `FCM_SERVER_KEY` and the optional
    /// `FCM_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, FcmError> {
        let api_key = env::var("FCM_API_KEY").unwrap_or_default();
        let server_key = env::var("FCM_SERVER_KEY").unwrap_or_default();

        let mut builder = Self::builder(api_key, server_key);

        if let Ok(secs) = env::var("FCM_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| FcmError::InvalidTimeout)?;
            builder.set_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn server_key(&self) -> &str {
        &self.server_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Collects the optional settings of a [`FcmConfig`], validating all of them
/// in [`build`](FcmConfigBuilder::build).
#[derive(Debug)]
pub struct FcmConfigBuilder {
    api_key: String,
    server_key: String,
    timeout: Option<Duration>,
    endpoints: Option<Endpoints>,
}

impl FcmConfigBuilder {
    /// How long a single request may take, including reading the response.
    /// Defaults to 30 seconds.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn set_endpoints(&mut self, endpoints: Endpoints) -> &mut Self {
        self.endpoints = Some(endpoints);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.set_endpoints(endpoints);
        self
    }

    pub fn build(self) -> Result<FcmConfig, FcmError> {
        if self.api_key.is_empty() {
            return Err(FcmError::InvalidApiKey);
        }

        if self.server_key.is_empty() {
            return Err(FcmError::InvalidServerKey);
        }

        let timeout = match self.timeout {
            Some(timeout) if timeout.is_zero() => return Err(FcmError::InvalidTimeout),
            Some(timeout) => timeout,
            None => DEFAULT_TIMEOUT,
        };

        Ok(FcmConfig {
            api_key: self.api_key,
            server_key: self.server_key,
            timeout,
            endpoints: self.endpoints.unwrap_or_default(),
        })
    }
}
