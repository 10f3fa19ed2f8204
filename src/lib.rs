//! # FCM Client
//!
//! A client for sending notifications through Firebase Cloud Messaging's
//! legacy HTTP protocol, managing topic subscriptions through the instance-id
//! service and looking up users of the identity toolkit.
//!
//! Every operation is a single request authorized with the project's server
//! key. Messages are validated before they are sent, nothing is retried.
//!
//! By default the client uses [isahc](https://crates.io/crates/isahc) and works on any executor. The
//! `hyper-client` and `hyper-rustls-client` features provide Tokio based
//! transports instead, and any [`FcmTransport`] can be plugged in with
//! [`FcmClient::with_transport`].
//!
//! # Example
//!
//! ```no_run
//! # use fcm_client::*;
//! # #[tokio::main]
//! # async fn main() -> Result<(), FcmError> {
//! let client = FcmClient::new("api-key", "server-key")?;
//!
//! let mut builder = MessageBuilder::registration_ids(vec!["token-1", "token-2"]);
//! builder.set_notification(Notification::new("Hello", "World"));
//! builder.set_time_to_live(3600);
//!
//! if let SendResult::Multicast(result) = client.send(&builder.build()?).await? {
//!     for outcome in result.results.iter().filter(|r| r.is_unregistered()) {
//!         println!("drop token: {:?}", outcome);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub use crate::client::FcmClient;
#[cfg(feature = "hyper-client")]
pub use crate::clients::hyper_client::HyperTransport;
#[cfg(feature = "hyper-rustls-client")]
pub use crate::clients::hyper_rustls_client::HyperRustlsTransport;
#[cfg(feature = "isahc-client")]
pub use crate::clients::isahc_client::IsahcTransport;
pub use crate::clients::{request_builder, FcmTransport, MAX_RESPONSE_SIZE};
pub use crate::config::{Endpoints, FcmConfig, FcmConfigBuilder, DEFAULT_TIMEOUT};
pub use crate::error::{FcmError, ValidationError};
pub use crate::info::{DeviceInfo, RelDate, Relationship};
pub use crate::message::{
    validate, Message, MessageBuilder, Priority, MAX_CONDITION_OPERATORS, MAX_REGISTRATION_IDS, MAX_TIME_TO_LIVE,
};
pub use crate::notification::Notification;
pub use crate::response::{ErrorCode, MessageResult, MulticastResult, SendResult, TopicResult};
pub use crate::topic::TopicSubscription;
pub use crate::user::{LookupUserResponse, ProviderInfo, User};

mod client;
mod clients;
mod config;
mod error;
mod info;
mod message;
mod notification;
mod response;
mod topic;
mod user;
