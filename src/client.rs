use http::{Request, Response};

use crate::clients::{request_builder, FcmTransport};
use crate::config::FcmConfig;
use crate::error::FcmError;
use crate::info::DeviceInfo;
use crate::message::Message;
use crate::response::SendResult;
use crate::user::User;

#[cfg(feature = "isahc-client")]
use crate::clients::isahc_client::IsahcTransport;

/// A client for the Firebase Cloud Messaging legacy HTTP API and its
/// companion services.
///
/// Every call is a single request with the configured timeout, nothing is
/// retried. The client holds no mutable state, share it freely between tasks.
///
/// ```no_run
/// # use fcm_client::{FcmClient, MessageBuilder, Notification};
/// # async fn run() -> Result<(), fcm_client::FcmError> {
/// let client = FcmClient::new("api-key", "server-key")?;
///
/// let mut builder = MessageBuilder::to("/topics/news");
/// builder.set_notification(Notification::new("Breaking", "Something happened"));
///
/// let result = client.send(&builder.build()?).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FcmClient<T> {
    config: FcmConfig,
    transport: T,
}

impl<T> std::fmt::Debug for FcmClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FcmClient").field("config", &self.config).finish()
    }
}

#[cfg(feature = "isahc-client")]
impl FcmClient<IsahcTransport> {
    /// Creates a client with the default timeout on top of [`isahc`](https://crates.io/crates/isahc).
    pub fn new<S>(api_key: S, server_key: S) -> Result<Self, FcmError>
    where
        S: Into<String>,
    {
        Self::from_config(FcmConfig::new(api_key, server_key)?)
    }

    pub fn from_config(config: FcmConfig) -> Result<Self, FcmError> {
        Ok(Self::with_transport(config, IsahcTransport::new()?))
    }
}

impl<T> FcmClient<T>
where
    T: FcmTransport,
{
    pub fn with_transport(config: FcmConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FcmConfig {
        &self.config
    }

    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, FcmError> {
        trace!("{}", request_builder::describe(&request));

        self.transport.execute(request, self.config.timeout()).await
    }

    /// Sends a message. Invalid messages are rejected before anything goes
    /// over the network.
    ///
    /// See https://firebase.google.com/docs/cloud-messaging/http-server-ref
    pub async fn send(&self, message: &Message) -> Result<SendResult, FcmError> {
        trace!("Message: {:?}", message);

        let request = request_builder::build_send_request(&self.config, message)?;
        let response = self.execute(request).await?;
        let result = request_builder::parse_send_response(response.status(), response.body());

        debug!("Send result: {:?}", result);

        result
    }

    /// Reads the details of an app instance, including its topic subscriptions.
    ///
    /// See https://developers.google.com/instance-id/reference/server#get_information_about_app_instances
    pub async fn get_device_info(&self, token: &str) -> Result<DeviceInfo, FcmError> {
        let request = request_builder::build_device_info_request(&self.config, token)?;
        let response = self.execute(request).await?;
        let result = request_builder::parse_device_info_response(response.status(), response.body());

        debug!("Device info: {:?}", result);

        result
    }

    /// Looks up the user an id token was issued to.
    ///
    /// See https://firebase.google.com/docs/reference/rest/auth
    pub async fn get_user(&self, id_token: &str) -> Result<User, FcmError> {
        let request = request_builder::build_user_request(&self.config, id_token)?;
        let response = self.execute(request).await?;
        let result = request_builder::parse_user_response(response.status(), response.body());

        debug!("User lookup: {:?}", result.as_ref().map(|user| &user.local_id));

        result
    }

    /// Subscribes registration tokens to a topic. The service accepts at most
    /// 1000 tokens per call.
    pub async fn subscribe_to_topic(&self, tokens: &[String], topic: &str) -> Result<(), FcmError> {
        let request = request_builder::build_subscribe_request(&self.config, tokens, topic)?;
        let response = self.execute(request).await?;
        let result = request_builder::parse_topic_response(response.status(), response.body());

        debug!("Subscribe {} tokens to {}: {:?}", tokens.len(), topic, result);

        result
    }

    /// Unsubscribes registration tokens from a topic. The service accepts at
    /// most 1000 tokens per call.
    pub async fn unsubscribe_from_topic(&self, tokens: &[String], topic: &str) -> Result<(), FcmError> {
        let request = request_builder::build_unsubscribe_request(&self.config, tokens, topic)?;
        let response = self.execute(request).await?;
        let result = request_builder::parse_topic_response(response.status(), response.body());

        debug!("Unsubscribe {} tokens from {}: {:?}", tokens.len(), topic, result);

        result
    }
}
