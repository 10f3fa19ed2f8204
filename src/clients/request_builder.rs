//! Functions used to build requests for the services and consume their responses.
//! This module can be used to build custom clients.

use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    config::FcmConfig,
    error::FcmError,
    info::DeviceInfo,
    message::Message,
    response::SendResult,
    topic::TopicSubscription,
    user::{LookupUserRequest, LookupUserResponse, User},
};

fn request_builder(config: &FcmConfig, method: Method, uri: &str) -> Result<http::request::Builder, FcmError> {
    let mut authorization =
        HeaderValue::from_str(&format!("key={}", config.server_key())).map_err(http::Error::from)?;
    authorization.set_sensitive(true);

    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .header(CONTENT_TYPE, "application/json"))
}

/// Method and path of a request, safe to log. The query is left out as it
/// can carry the API key.
pub fn describe<T>(request: &Request<T>) -> String {
    format!("{} {}", request.method(), request.uri().path())
}

fn json_request<T, B>(config: &FcmConfig, method: Method, uri: &str, body: &B) -> Result<Request<T>, FcmError>
where
    T: From<Vec<u8>>,
    B: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(body)?;

    Ok(request_builder(config, method, uri)?.body(payload.into())?)
}

/// Builds the request for sending a message. The message is validated first,
/// an invalid message never turns into a request.
///
/// This function is generic over the request body, this means that you can swap out client implementations
/// even if they use different body types.
///
/// # Example
///
/// ```
/// # use fcm_client::{FcmConfig, MessageBuilder, Notification};
/// # use fcm_client::request_builder::build_send_request;
/// let config = FcmConfig::new("api-key", "server-key").unwrap();
///
/// let mut builder = MessageBuilder::to("/topics/news");
/// builder.set_notification(Notification::new("Breaking", "Something happened"));
///
/// let request = build_send_request::<Vec<u8>>(&config, &builder.build().unwrap()).unwrap();
///
/// assert_eq!("key=server-key", request.headers()["Authorization"].to_str().unwrap());
/// //Send using a http client
/// ```
pub fn build_send_request<T>(config: &FcmConfig, message: &Message) -> Result<Request<T>, FcmError>
where
    T: From<Vec<u8>>,
{
    message.validate()?;

    json_request(config, Method::POST, &config.endpoints().send_message, message)
}

/// Builds the request for reading the details of an app instance.
pub fn build_device_info_request<T>(config: &FcmConfig, token: &str) -> Result<Request<T>, FcmError>
where
    T: From<Vec<u8>>,
{
    let uri = format!(
        "{}/{}?details=true",
        config.endpoints().app_instance.trim_end_matches('/'),
        token
    );

    Ok(request_builder(config, Method::GET, &uri)?.body(T::from(Vec::<u8>::new()))?)
}

/// Builds the request for looking up the user owning an id token.
pub fn build_user_request<T>(config: &FcmConfig, id_token: &str) -> Result<Request<T>, FcmError>
where
    T: From<Vec<u8>>,
{
    let uri = format!("{}?key={}", config.endpoints().user_lookup, config.api_key());

    json_request(config, Method::POST, &uri, &LookupUserRequest { id_token })
}

/// Builds the request for subscribing tokens to a topic.
pub fn build_subscribe_request<T>(config: &FcmConfig, tokens: &[String], topic: &str) -> Result<Request<T>, FcmError>
where
    T: From<Vec<u8>>,
{
    let body = TopicSubscription::new(tokens, topic);

    json_request(config, Method::POST, &config.endpoints().topic_batch_add, &body)
}

/// Builds the request for unsubscribing tokens from a topic.
pub fn build_unsubscribe_request<T>(
    config: &FcmConfig,
    tokens: &[String],
    topic: &str,
) -> Result<Request<T>, FcmError>
where
    T: From<Vec<u8>>,
{
    let body = TopicSubscription::new(tokens, topic);

    json_request(config, Method::POST, &config.endpoints().topic_batch_remove, &body)
}

/// Anything but `200 OK` is an error carrying the status. The body is not
/// looked at.
fn check_status(response_status: StatusCode) -> Result<(), FcmError> {
    match response_status {
        StatusCode::OK => Ok(()),
        status => Err(FcmError::Status(status)),
    }
}

fn parse_json<R>(response_status: StatusCode, body: &[u8]) -> Result<R, FcmError>
where
    R: DeserializeOwned,
{
    check_status(response_status)?;

    Ok(serde_json::from_slice(body)?)
}

/// Parses the response of the send endpoint.
pub fn parse_send_response(response_status: StatusCode, body: &[u8]) -> Result<SendResult, FcmError> {
    parse_json(response_status, body)
}

/// Parses the response of the app-instance endpoint.
pub fn parse_device_info_response(response_status: StatusCode, body: &[u8]) -> Result<DeviceInfo, FcmError> {
    parse_json(response_status, body)
}

/// Parses the response of the user lookup, returning the first user found.
pub fn parse_user_response(response_status: StatusCode, body: &[u8]) -> Result<User, FcmError> {
    let lookup: LookupUserResponse = parse_json(response_status, body)?;

    lookup.users.into_iter().next().ok_or(FcmError::UserNotFound)
}

/// Parses the response of a topic batch call. Only the status matters.
pub fn parse_topic_response(response_status: StatusCode, _body: &[u8]) -> Result<(), FcmError> {
    check_status(response_status)
}
