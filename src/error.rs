use std::{convert::From, error::Error, fmt, io::Error as IoError};

use http::StatusCode;
use serde_json::error::Error as JsonError;

/// Reasons a [`Message`](crate::Message) is rejected before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No message was given at all
    MissingMessage,
    /// None of `to`, `condition` or `registration_ids` holds a usable target.
    /// A condition with more than five `&&`/`||` operators does not count.
    InvalidTarget,
    /// At most 1000 registration ids can be addressed in one request
    TooManyRegistrationIds,
    /// Time to live cannot be longer than 2419200 seconds (28 days)
    InvalidTimeToLive,
}

impl Error for ValidationError {}

impl ValidationError {
    pub fn short_description(&self) -> &'static str {
        match *self {
            ValidationError::MissingMessage => "missing_message",
            ValidationError::InvalidTarget => "invalid_target",
            ValidationError::TooManyRegistrationIds => "too_many_registration_ids",
            ValidationError::InvalidTimeToLive => "invalid_time_to_live",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::MissingMessage => write!(f, "message is invalid"),
            ValidationError::InvalidTarget => write!(f, "topic is invalid or registration ids are not set"),
            ValidationError::TooManyRegistrationIds => write!(f, "too many registration ids"),
            ValidationError::InvalidTimeToLive => write!(f, "message time-to-live is invalid"),
        }
    }
}

#[derive(Debug)]
pub enum FcmError {
    /// The client API key is empty
    InvalidApiKey,
    /// The server key is empty
    InvalidServerKey,
    /// The request timeout must be longer than zero
    InvalidTimeout,
    /// The message did not pass validation and was never sent
    Validation(ValidationError),
    /// The request could not be assembled, usually because a token or key
    /// contains characters not allowed in a URI or header
    InvalidRequest(http::Error),
    /// The request did not complete within the configured timeout
    Timeout,
    /// The HTTP client failed to deliver the request or read the response
    Transport(String),
    /// Error in reading the response body
    Io(IoError),
    /// The service answered with something other than `200 OK`. The response
    /// body is not inspected.
    Status(StatusCode),
    /// Corrupted response data
    InvalidResponse(JsonError),
    /// The response body exceeded the allowed size
    ResponseTooLarge,
    /// The identity service accepted the token but returned no user
    UserNotFound,
}

impl Error for FcmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FcmError::Validation(err) => Some(err),
            FcmError::InvalidRequest(err) => Some(err),
            FcmError::Io(err) => Some(err),
            FcmError::InvalidResponse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for FcmError {
    fn from(err: ValidationError) -> FcmError {
        FcmError::Validation(err)
    }
}

impl From<JsonError> for FcmError {
    fn from(err: JsonError) -> FcmError {
        FcmError::InvalidResponse(err)
    }
}

impl From<http::Error> for FcmError {
    fn from(err: http::Error) -> FcmError {
        FcmError::InvalidRequest(err)
    }
}

#[cfg(any(feature = "hyper-client", feature = "hyper-rustls-client"))]
impl From<hyper::Error> for FcmError {
    fn from(err: hyper::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(feature = "isahc-client")]
impl From<isahc::Error> for FcmError {
    fn from(err: isahc::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<IoError> for FcmError {
    fn from(err: IoError) -> FcmError {
        FcmError::Io(err)
    }
}

impl FcmError {
    pub fn short_description(&self) -> &'static str {
        match *self {
            FcmError::InvalidApiKey => "invalid_api_key",
            FcmError::InvalidServerKey => "invalid_server_key",
            FcmError::InvalidTimeout => "invalid_timeout",
            FcmError::Validation(ref err) => err.short_description(),
            FcmError::InvalidRequest(_) => "invalid_request",
            FcmError::Timeout => "timeout",
            FcmError::Transport(_) => "transport_error",
            FcmError::Io(_) => "io_error",
            FcmError::Status(_) => "http_status",
            FcmError::InvalidResponse(_) => "invalid_response",
            FcmError::ResponseTooLarge => "response_too_large",
            FcmError::UserNotFound => "user_not_found",
        }
    }

    /// The status text of a non-200 answer, e.g. `404 Not Found`.
    pub fn status_text(&self) -> Option<String> {
        match self {
            FcmError::Status(status) => Some(status.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for FcmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FcmError::InvalidApiKey => write!(f, "client API key is invalid"),
            FcmError::InvalidServerKey => write!(f, "client server key is invalid"),
            FcmError::InvalidTimeout => write!(f, "invalid timeout duration"),
            FcmError::Validation(err) => write!(f, "{}", err),
            FcmError::InvalidRequest(err) => write!(f, "could not build request: {}", err),
            FcmError::Timeout => write!(f, "request timed out"),
            FcmError::Transport(err) => write!(f, "transport error: {}", err),
            FcmError::Io(err) => write!(f, "i/o error: {}", err),
            FcmError::Status(status) => write!(f, "{}", status),
            FcmError::InvalidResponse(err) => write!(f, "could not parse response data: {}", err),
            FcmError::ResponseTooLarge => write!(f, "response from the push service was too large"),
            FcmError::UserNotFound => write!(f, "no user found for the given token"),
        }
    }
}
