//! Responses of the send endpoint.

use std::str::FromStr;

/// Per-target error codes of the legacy HTTP protocol.
///
/// See https://firebase.google.com/docs/cloud-messaging/http-server-ref#error-codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    MissingRegistration,
    InvalidRegistration,
    NotRegistered,
    InvalidPackageName,
    MismatchSenderId,
    InvalidParameters,
    MessageTooBig,
    InvalidDataKey,
    InvalidTtl,
    Unavailable,
    InternalServerError,
    DeviceMessageRateExceeded,
    TopicsMessageRateExceeded,
    InvalidApnsCredential,
}

impl FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| ())
    }
}

/// Outcome for one registration id of a multicast message, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// The canonical token the caller should use from now on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.message_id.is_some()
    }

    /// The error as a known code, `None` if there was no error or the code
    /// is not documented.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_deref().and_then(|e| e.parse().ok())
    }

    /// The token is no longer valid and should be dropped.
    pub fn is_unregistered(&self) -> bool {
        matches!(
            self.error_code(),
            Some(ErrorCode::NotRegistered) | Some(ErrorCode::InvalidRegistration)
        )
    }
}

/// Response to a message sent to registration tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MulticastResult {
    pub multicast_id: i64,
    pub success: u64,
    pub failure: u64,
    pub canonical_ids: u64,
    pub results: Vec<MessageResult>,
}

/// Response to a message sent to a topic or condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicResult {
    pub message_id: Option<i64>,
    pub error: Option<String>,
}

impl TopicResult {
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_deref().and_then(|e| e.parse().ok())
    }
}

/// Outcome of a successful send request. Which variant is returned depends
/// on the fields the service answered with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSendResponse")]
pub enum SendResult {
    Multicast(MulticastResult),
    Topic(TopicResult),
}

impl SendResult {
    pub fn as_multicast(&self) -> Option<&MulticastResult> {
        match self {
            SendResult::Multicast(result) => Some(result),
            SendResult::Topic(_) => None,
        }
    }

    pub fn as_topic(&self) -> Option<&TopicResult> {
        match self {
            SendResult::Topic(result) => Some(result),
            SendResult::Multicast(_) => None,
        }
    }
}

/// Both response shapes share one JSON object on the wire.
#[derive(Deserialize)]
struct RawSendResponse {
    multicast_id: Option<i64>,
    success: Option<u64>,
    failure: Option<u64>,
    canonical_ids: Option<u64>,
    results: Option<Vec<MessageResult>>,
    message_id: Option<i64>,
    error: Option<String>,
}

impl From<RawSendResponse> for SendResult {
    fn from(raw: RawSendResponse) -> Self {
        if raw.multicast_id.is_some() || raw.results.is_some() {
            SendResult::Multicast(MulticastResult {
                multicast_id: raw.multicast_id.unwrap_or_default(),
                success: raw.success.unwrap_or_default(),
                failure: raw.failure.unwrap_or_default(),
                canonical_ids: raw.canonical_ids.unwrap_or_default(),
                results: raw.results.unwrap_or_default(),
            })
        } else {
            SendResult::Topic(TopicResult {
                message_id: raw.message_id,
                error: raw.error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::response::*;

    #[test]
    fn parses_a_multicast_response() {
        let response = r#"
        {
            "multicast_id": 108,
            "success": 1,
            "failure": 2,
            "canonical_ids": 1,
            "results": [
                { "message_id": "1:08", "registration_id": "new-token" },
                { "error": "NotRegistered" },
                { "error": "SomethingNew" }
            ]
        }
        "#;

        let result: SendResult = serde_json::from_str(response).unwrap();
        let multicast = result.as_multicast().unwrap();

        assert_eq!(108, multicast.multicast_id);
        assert_eq!(1, multicast.success);
        assert_eq!(2, multicast.failure);
        assert_eq!(1, multicast.canonical_ids);
        assert!(multicast.results[0].is_success());
        assert_eq!(Some("new-token"), multicast.results[0].registration_id.as_deref());
        assert!(multicast.results[1].is_unregistered());
        assert_eq!(Some(ErrorCode::NotRegistered), multicast.results[1].error_code());
        assert_eq!(None, multicast.results[2].error_code());
        assert!(!multicast.results[2].is_success());
    }

    #[test]
    fn parses_a_topic_response() {
        let result: SendResult = serde_json::from_str(r#"{"message_id": 5785623423}"#).unwrap();

        assert_eq!(
            SendResult::Topic(TopicResult {
                message_id: Some(5785623423),
                error: None
            }),
            result
        );
        assert!(result.as_multicast().is_none());
    }

    #[test]
    fn parses_a_topic_error_response() {
        let result: SendResult = serde_json::from_str(r#"{"error": "TopicsMessageRateExceeded"}"#).unwrap();
        let topic = result.as_topic().unwrap();

        assert_eq!(None, topic.message_id);
        assert_eq!(Some(ErrorCode::TopicsMessageRateExceeded), topic.error_code());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(serde_json::from_str::<SendResult>(r#"{"multicast_id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<SendResult>("not json").is_err());
    }
}
