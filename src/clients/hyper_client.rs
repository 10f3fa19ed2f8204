use std::time::Duration;

use async_trait::async_trait;
use hyper::{body::HttpBody, client::HttpConnector, Body, Client, Request, Response};
use hyper_tls::HttpsConnector;

use crate::clients::{request_builder, FcmTransport, MAX_RESPONSE_SIZE};
use crate::error::FcmError;

/// An async transport for the FCM services.
///
/// This transport is thread-safe. Clones of it will share the same underlying resources,
/// so cloning is a cheap and effective method to provide access to it.
///
/// This transport is [`hyper`](https://crates.io/crates/hyper) based, and will only work in Tokio contexts.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpsConnector<HttpConnector>>,
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Client<HttpsConnector<HttpConnector>>> for HyperTransport {
    /// Creates a new transport from a custom hyper HTTP client.
    fn from(client: Client<HttpsConnector<HttpConnector>>) -> Self {
        Self { client }
    }
}

impl HyperTransport {
    /// Creates a new transport.
    pub fn new() -> Self {
        Self {
            client: Client::builder().build(HttpsConnector::new()),
        }
    }

    async fn exchange(&self, request: Request<Body>) -> Result<Response<Vec<u8>>, FcmError> {
        let response = self.client.request(request).await?;

        trace!("Response: {:?}", response);

        let (parts, mut chunks) = response.into_parts();
        trace!("Response status: {}", parts.status);

        let mut body = Vec::new();
        while let Some(chunk) = chunks.data().await {
            body.extend(&chunk?);
            if body.len() > MAX_RESPONSE_SIZE {
                return Err(FcmError::ResponseTooLarge);
            }
        }

        trace!("Body text: {:?}", std::str::from_utf8(&body));

        Ok(Response::from_parts(parts, body))
    }
}

#[async_trait]
impl FcmTransport for HyperTransport {
    /// Sends a request, failing with [`FcmError::Timeout`] after `timeout`.
    async fn execute(&self, request: Request<Vec<u8>>, timeout: Duration) -> Result<Response<Vec<u8>>, FcmError> {
        debug!("Request: {}", request_builder::describe(&request));

        let request: Request<Body> = request.map(Body::from);

        tokio::time::timeout(timeout, self.exchange(request))
            .await
            .map_err(|_| FcmError::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::clients::request_builder::build_send_request;
    use crate::clients::test_server;
    use crate::clients::FcmTransport;
    use crate::clients::hyper_client::HyperTransport;
    use crate::config::{Endpoints, FcmConfig};
    use crate::error::FcmError;
    use crate::message::MessageBuilder;

    #[tokio::test]
    async fn times_out_when_the_server_never_answers() {
        let config = FcmConfig::builder("api_key", "server_key")
            .endpoints(Endpoints::with_base_url(&test_server::silent()))
            .build()
            .unwrap();
        let request = build_send_request(&config, &MessageBuilder::to("T").build().unwrap()).unwrap();

        let result = HyperTransport::new().execute(request, Duration::from_millis(200)).await;

        assert!(matches!(result, Err(FcmError::Timeout)));
    }
}
