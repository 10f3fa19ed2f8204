//! Contains the HTTP transports the client can run on.
//!
//! [`request_builder`] contains the functions used to build requests and consume responses.
//! This module should be consumed by each transport, by using [`http`]'s flexible api.

use std::time::Duration;

use async_trait::async_trait;
use http::{Request, Response};

use crate::error::FcmError;

pub mod request_builder;

#[cfg(feature = "hyper-client")]
pub mod hyper_client;

#[cfg(feature = "hyper-rustls-client")]
pub mod hyper_rustls_client;

#[cfg(feature = "isahc-client")]
pub mod isahc_client;

/// The maximum size of a response body, anything larger is rejected.
pub const MAX_RESPONSE_SIZE: usize = 64 * 1024;

/// Executes a single HTTP request.
///
/// Implementations must not retry. Exceeding `timeout` fails with
/// [`FcmError::Timeout`], any other delivery failure with
/// [`FcmError::Transport`].
#[async_trait]
pub trait FcmTransport: Send + Sync {
    async fn execute(&self, request: Request<Vec<u8>>, timeout: Duration) -> Result<Response<Vec<u8>>, FcmError>;
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// A server that accepts one connection and never answers. Returns its
    /// base url.
    pub fn silent() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(5));
                drop(stream);
            }
        });

        format!("http://{}", addr)
    }
}
