use std::{io, time::Duration};

use async_trait::async_trait;
use futures_lite::AsyncReadExt;
use http::{Request, Response};
use isahc::config::Configurable;
use isahc::{AsyncBody, HttpClient};

use crate::clients::{request_builder, FcmTransport, MAX_RESPONSE_SIZE};
use crate::error::FcmError;

/// An async transport for the FCM services. This transport is expensive to create, and
/// should be reused.
///
/// This transport is thread-safe. Clones of it will share the same underlying resources,
/// so cloning is a cheap and effective method to provide access to it.
///
/// This transport is built on [`isahc`](https://crates.io/crates/isahc), and will therefore work on any async executor.
#[derive(Clone)]
pub struct IsahcTransport {
    client: HttpClient,
}

impl From<HttpClient> for IsahcTransport {
    /// Creates a new transport from a custom Isahc HTTP client.
    fn from(client: HttpClient) -> Self {
        Self { client }
    }
}

impl IsahcTransport {
    /// Creates a new transport. Can fail under resource depletion.
    pub fn new() -> Result<Self, FcmError> {
        Ok(Self {
            client: HttpClient::new()?,
        })
    }
}

/// The timeout can still hit while the body is streamed in.
fn read_error(err: io::Error) -> FcmError {
    if err.kind() == io::ErrorKind::TimedOut {
        FcmError::Timeout
    } else {
        FcmError::Io(err)
    }
}

#[async_trait]
impl FcmTransport for IsahcTransport {
    /// Sends a request, failing with [`FcmError::Timeout`] after `timeout`.
    async fn execute(&self, request: Request<Vec<u8>>, timeout: Duration) -> Result<Response<Vec<u8>>, FcmError> {
        let (parts, body) = request.into_parts();

        let mut builder = Request::builder()
            .method(parts.method)
            .uri(parts.uri)
            .timeout(timeout);

        for (name, value) in parts.headers.iter() {
            builder = builder.header(name, value);
        }

        let request = builder.body(AsyncBody::from(body))?;

        trace!("Request: {}", request_builder::describe(&request));

        let response = self.client.send_async(request).await?;

        trace!("Response: {:?}", response);

        let (parts, body) = response.into_parts();
        trace!("Response status: {}", parts.status);

        let mut content = Vec::new();
        if body
            .take(MAX_RESPONSE_SIZE as u64 + 1)
            .read_to_end(&mut content)
            .await
            .map_err(read_error)?
            > MAX_RESPONSE_SIZE
        {
            return Err(FcmError::ResponseTooLarge);
        }

        trace!("Body text: {:?}", std::str::from_utf8(&content));

        Ok(Response::from_parts(parts, content))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::clients::request_builder::build_send_request;
    use crate::clients::test_server;
    use crate::clients::FcmTransport;
    use crate::clients::isahc_client::IsahcTransport;
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

        let result = IsahcTransport::new().unwrap().execute(request, Duration::from_millis(200)).await;

        assert!(matches!(result, Err(FcmError::Timeout)));
    }
}
